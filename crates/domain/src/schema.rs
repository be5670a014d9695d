//! Configuration schemas as tables of option specs.
//!
//! A [`Schema`] lists the options a record may carry, what kind of value
//! each one takes and whether it is required, defaulted or generated.
//! Validating a record against it is a pure function: the same record
//! always produces the same [`ValidatedRecord`] or the same errors.
//!
//! Identifier options are only parsed here. Declaring them, generating the
//! missing ones and resolving references needs the whole build and happens
//! in the symbol table of the `app` crate.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::component::{Capability, DeclaredType};
use crate::error::ValidationError;
use crate::id::ComponentId;
use crate::option_value::{OptionValue, RawRecord};

pub const CONF_ID: &str = "id";
pub const CONF_PLATFORM: &str = "platform";
pub const CONF_NAME: &str = "name";
pub const CONF_SENSOR: &str = "sensor";
pub const CONF_TRANSMITTER_ID: &str = "transmitter_id";
pub const CONF_RECEIVER_ID: &str = "receiver_id";
pub const CONF_SUPPORTS_COOL: &str = "supports_cool";
pub const CONF_SUPPORTS_HEAT: &str = "supports_heat";

/// Location of an option inside the build file, e.g. `climate -> 0 -> sensor`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPath(Vec<String>);

impl ConfigPath {
    #[must_use]
    pub fn root(section: &str) -> Self {
        Self(vec![section.to_string()])
    }

    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        self.child(index.to_string())
    }

    #[must_use]
    pub fn key(&self, key: &str) -> Self {
        self.child(key.to_string())
    }

    fn child(&self, segment: String) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" -> "))
    }
}

/// Kind of value an option accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Bool,
    /// Declares a new object of the given type under this identifier.
    DeclareId(DeclaredType),
    /// References a declared object providing the capability.
    UseId(Capability),
}

impl OptionKind {
    fn expected(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "boolean",
            Self::DeclareId(_) | Self::UseId(_) => "identifier",
        }
    }
}

/// What happens when an option is absent.
#[derive(Debug, Clone, PartialEq)]
pub enum Presence {
    Required,
    Optional,
    Default(OptionValue),
    /// Filled in by the symbol table: a fresh identifier for declarations,
    /// the only candidate for references.
    Generated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    pub key: &'static str,
    pub kind: OptionKind,
    pub presence: Presence,
}

impl OptionSpec {
    #[must_use]
    pub fn required(key: &'static str, kind: OptionKind) -> Self {
        Self {
            key,
            kind,
            presence: Presence::Required,
        }
    }

    #[must_use]
    pub fn optional(key: &'static str, kind: OptionKind) -> Self {
        Self {
            key,
            kind,
            presence: Presence::Optional,
        }
    }

    #[must_use]
    pub fn with_default(key: &'static str, kind: OptionKind, value: impl Into<OptionValue>) -> Self {
        Self {
            key,
            kind,
            presence: Presence::Default(value.into()),
        }
    }

    #[must_use]
    pub fn generated(key: &'static str, kind: OptionKind) -> Self {
        Self {
            key,
            kind,
            presence: Presence::Generated,
        }
    }

    /// The `id` option declaring an object of type `ty`, generated if absent.
    #[must_use]
    pub fn declare_id(ty: DeclaredType) -> Self {
        Self::generated(CONF_ID, OptionKind::DeclareId(ty))
    }

    fn check(&self, path: &ConfigPath, value: &OptionValue) -> Result<Checked, ValidationError> {
        match (self.kind, value) {
            (OptionKind::String, OptionValue::String(_)) | (OptionKind::Bool, OptionValue::Bool(_)) => {
                Ok(Checked::Value(value.clone()))
            }
            (OptionKind::DeclareId(_) | OptionKind::UseId(_), OptionValue::String(raw)) => {
                ComponentId::parse(raw.as_str())
                    .map(Checked::Id)
                    .map_err(|reason| ValidationError::InvalidId {
                        path: path.clone(),
                        value: raw.clone(),
                        reason,
                    })
            }
            (kind, value) => Err(ValidationError::WrongType {
                path: path.clone(),
                expected: kind.expected(),
                found: value.type_name(),
            }),
        }
    }
}

enum Checked {
    Value(OptionValue),
    Id(ComponentId),
}

/// Ordered table of option specs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    options: Vec<OptionSpec>,
}

impl Schema {
    #[must_use]
    pub fn new(options: Vec<OptionSpec>) -> Self {
        Self { options }
    }

    /// Add options on top of this schema. A spec whose key already exists
    /// replaces the inherited one in place.
    #[must_use]
    pub fn extend(mut self, options: impl IntoIterator<Item = OptionSpec>) -> Self {
        for spec in options {
            match self.options.iter_mut().find(|o| o.key == spec.key) {
                Some(existing) => *existing = spec,
                None => self.options.push(spec),
            }
        }
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.key == key)
    }

    #[must_use]
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// Check `raw` against the table and apply defaults.
    ///
    /// The `platform` key selects the schema and is never reported as
    /// unknown.
    ///
    /// # Errors
    ///
    /// Returns every [`ValidationError`] found in the record.
    pub fn validate(
        &self,
        path: &ConfigPath,
        raw: &RawRecord,
    ) -> Result<ValidatedRecord, Vec<ValidationError>> {
        let mut errors: Vec<ValidationError> = raw
            .keys()
            .filter(|key| key.as_str() != CONF_PLATFORM && self.get(key).is_none())
            .map(|key| ValidationError::UnknownOption {
                path: path.key(key),
            })
            .collect();

        let mut record = ValidatedRecord::new(path.clone());
        for spec in &self.options {
            let field = path.key(spec.key);
            match (raw.get(spec.key), &spec.presence) {
                (Some(value), _) => match spec.check(&field, value) {
                    Ok(Checked::Value(value)) => {
                        record.values.insert(spec.key.to_string(), value);
                    }
                    Ok(Checked::Id(id)) => {
                        record.ids.insert(spec.key.to_string(), id);
                    }
                    Err(err) => errors.push(err),
                },
                (None, Presence::Required) => {
                    errors.push(ValidationError::MissingRequired { path: field });
                }
                (None, Presence::Optional) => {}
                (None, Presence::Default(value)) => {
                    record.values.insert(spec.key.to_string(), value.clone());
                }
                (None, Presence::Generated) => {
                    record.pending.insert(spec.key.to_string());
                }
            }
        }

        if errors.is_empty() {
            Ok(record)
        } else {
            Err(errors)
        }
    }
}

/// A record that matched its schema, with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRecord {
    path: ConfigPath,
    values: BTreeMap<String, OptionValue>,
    ids: BTreeMap<String, ComponentId>,
    pending: BTreeSet<String>,
}

impl ValidatedRecord {
    fn new(path: ConfigPath) -> Self {
        Self {
            path,
            values: BTreeMap::new(),
            ids: BTreeMap::new(),
            pending: BTreeSet::new(),
        }
    }

    /// Where the record sits in the build file.
    #[must_use]
    pub fn path(&self) -> &ConfigPath {
        &self.path
    }

    #[must_use]
    pub fn value(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    #[must_use]
    pub fn string(&self, key: &str) -> Option<&str> {
        self.value(key).and_then(OptionValue::as_str)
    }

    #[must_use]
    pub fn bool(&self, key: &str) -> Option<bool> {
        self.value(key).and_then(OptionValue::as_bool)
    }

    /// Identifier stored under `key`, given or generated.
    #[must_use]
    pub fn id(&self, key: &str) -> Option<&ComponentId> {
        self.ids.get(key)
    }

    /// Whether `key` was absent and still waits for a generated identifier.
    #[must_use]
    pub fn is_pending(&self, key: &str) -> bool {
        self.pending.contains(key)
    }

    /// Store the identifier generated or resolved for a pending option.
    pub fn fill_id(&mut self, key: &str, id: ComponentId) {
        self.pending.remove(key);
        self.ids.insert(key.to_string(), id);
    }
}
