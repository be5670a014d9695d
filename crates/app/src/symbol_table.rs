//! Symbol table — every identifier declared in a build and its type.
//!
//! Explicit identifiers are declared first so generated ones never take a
//! name the user picked further down the build file.

use std::collections::BTreeMap;

use irbuild_domain::component::{Capability, DeclaredType};
use irbuild_domain::error::{ReferenceError, ValidationError};
use irbuild_domain::id::ComponentId;
use irbuild_domain::schema::ConfigPath;

#[derive(Debug, Clone, PartialEq)]
struct Symbol {
    ty: DeclaredType,
    path: ConfigPath,
}

/// Identifiers declared so far in one build pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    symbols: BTreeMap<ComponentId, Symbol>,
}

impl SymbolTable {
    /// Declare `id` as an object of type `ty`, defined at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateId`] when `id` is already declared.
    pub fn declare(
        &mut self,
        id: ComponentId,
        ty: DeclaredType,
        path: &ConfigPath,
    ) -> Result<(), ValidationError> {
        if let Some(existing) = self.symbols.get(&id) {
            tracing::debug!(%id, first = %existing.path, "identifier redefined");
            return Err(ValidationError::DuplicateId {
                path: path.clone(),
                id,
            });
        }
        self.symbols.insert(
            id,
            Symbol {
                ty,
                path: path.clone(),
            },
        );
        Ok(())
    }

    /// Declare a fresh identifier for an object of type `ty`.
    pub fn generate(&mut self, ty: DeclaredType, path: &ConfigPath) -> ComponentId {
        let stem = ty.id_stem();
        let mut n = 1;
        let id = loop {
            let candidate = ComponentId::generated(&stem, n);
            if !self.symbols.contains_key(&candidate) {
                break candidate;
            }
            n += 1;
        };
        self.symbols.insert(
            id.clone(),
            Symbol {
                ty,
                path: path.clone(),
            },
        );
        id
    }

    /// Check that `id`, referenced at `path`, names an object providing
    /// `capability`.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::NotFound`] for an undeclared identifier and
    /// [`ReferenceError::WrongType`] when its type lacks the capability.
    pub fn resolve(
        &self,
        id: &ComponentId,
        capability: Capability,
        path: &ConfigPath,
    ) -> Result<DeclaredType, ReferenceError> {
        let symbol = self
            .symbols
            .get(id)
            .ok_or_else(|| ReferenceError::NotFound {
                path: path.clone(),
                id: id.clone(),
                expected: capability,
            })?;
        if !symbol.ty.provides(capability) {
            return Err(ReferenceError::WrongType {
                path: path.clone(),
                id: id.clone(),
                expected: capability,
                found: symbol.ty.name,
            });
        }
        Ok(symbol.ty)
    }

    /// The only declared object providing `capability`, for references left
    /// out of a record.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::NoCandidate`] when nothing provides the
    /// capability and [`ReferenceError::Ambiguous`] when several objects do.
    pub fn sole(
        &self,
        capability: Capability,
        path: &ConfigPath,
    ) -> Result<ComponentId, ReferenceError> {
        let mut candidates: Vec<ComponentId> = self
            .symbols
            .iter()
            .filter(|(_, symbol)| symbol.ty.provides(capability))
            .map(|(id, _)| id.clone())
            .collect();
        match candidates.len() {
            0 => Err(ReferenceError::NoCandidate {
                path: path.clone(),
                expected: capability,
            }),
            1 => Ok(candidates.remove(0)),
            _ => Err(ReferenceError::Ambiguous {
                path: path.clone(),
                expected: capability,
                candidates,
            }),
        }
    }

    #[must_use]
    pub fn contains(&self, id: &ComponentId) -> bool {
        self.symbols.contains_key(id)
    }
}
