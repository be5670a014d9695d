//! Error types used across the workspace.
//!
//! Each failure class has its own typed error and converts into
//! [`BuildError`] via `#[from]`. Every one of them aborts the build.

use crate::component::Capability;
use crate::id::{ComponentId, IdError};
use crate::schema::ConfigPath;

/// Top-level error of a build pass.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Every error collected while validating a build.
    #[error("configuration is invalid ({} error(s))", .0.len())]
    Invalid(Vec<BuildError>),
}

impl BuildError {
    /// Flatten into the list of individual errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<BuildError> {
        match self {
            Self::Invalid(errors) => errors.into_iter().flat_map(Self::into_errors).collect(),
            other => vec![other],
        }
    }
}

/// A record does not match its schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("[{path}] is an invalid option")]
    UnknownOption { path: ConfigPath },

    #[error("required option [{path}] is missing")]
    MissingRequired { path: ConfigPath },

    #[error("expected a {expected} for [{path}], found a {found}")]
    WrongType {
        path: ConfigPath,
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid identifier {value:?} at [{path}]: {reason}")]
    InvalidId {
        path: ConfigPath,
        value: String,
        reason: IdError,
    },

    #[error("identifier `{id}` redefined at [{path}]")]
    DuplicateId { path: ConfigPath, id: ComponentId },

    #[error("unknown platform `{platform}` at [{path}]")]
    UnknownPlatform { path: ConfigPath, platform: String },
}

/// A reference option does not resolve to a suitable declared object.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    #[error("couldn't find ID `{id}` referenced at [{path}], a {expected} is required")]
    NotFound {
        path: ConfigPath,
        id: ComponentId,
        expected: Capability,
    },

    #[error("ID `{id}` referenced at [{path}] is a {found}, expected a {expected}")]
    WrongType {
        path: ConfigPath,
        id: ComponentId,
        expected: Capability,
        found: &'static str,
    },

    #[error("couldn't find any {expected} for [{path}]")]
    NoCandidate {
        path: ConfigPath,
        expected: Capability,
    },

    #[error(
        "too many candidates for [{path}] ({expected}): {}, set the ID explicitly",
        join_ids(.candidates)
    )]
    Ambiguous {
        path: ConfigPath,
        expected: Capability,
        candidates: Vec<ComponentId>,
    },
}

/// The device registry refused an instance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("device `{id}` is already registered")]
    AlreadyRegistered { id: ComponentId },
}

fn join_ids(ids: &[ComponentId]) -> String {
    ids.iter()
        .map(ComponentId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> ComponentId {
        ComponentId::parse(value).unwrap()
    }

    #[test]
    fn should_display_path_in_validation_error() {
        let err = ValidationError::MissingRequired {
            path: ConfigPath::root("climate").index(0).key("platform"),
        };
        assert_eq!(
            err.to_string(),
            "required option [climate -> 0 -> platform] is missing"
        );
    }

    #[test]
    fn should_display_not_found_reference() {
        let err = ReferenceError::NotFound {
            path: ConfigPath::root("climate").index(2).key("sensor"),
            id: id("nope"),
            expected: Capability::Sensor,
        };
        assert_eq!(
            err.to_string(),
            "couldn't find ID `nope` referenced at [climate -> 2 -> sensor], a sensor::Sensor is required"
        );
    }

    #[test]
    fn should_list_candidates_when_ambiguous() {
        let err = ReferenceError::Ambiguous {
            path: ConfigPath::root("climate").index(0).key("transmitter_id"),
            expected: Capability::RemoteTransmitter,
            candidates: vec![id("tx_a"), id("tx_b")],
        };
        assert!(err.to_string().contains("tx_a, tx_b"));
    }

    #[test]
    fn should_flatten_nested_invalid_errors() {
        let leaf = BuildError::from(RegistryError::AlreadyRegistered { id: id("ac1") });
        let nested = BuildError::Invalid(vec![
            BuildError::Invalid(vec![leaf]),
            ValidationError::UnknownOption {
                path: ConfigPath::root("climate").index(0).key("foo"),
            }
            .into(),
        ]);
        let errors = nested.into_errors();
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], BuildError::Registry(_)));
        assert!(matches!(errors[1], BuildError::Validation(_)));
    }

    #[test]
    fn should_count_errors_in_invalid_message() {
        let err = BuildError::Invalid(vec![
            RegistryError::AlreadyRegistered { id: id("ac1") }.into(),
        ]);
        assert_eq!(err.to_string(), "configuration is invalid (1 error(s))");
    }
}
