//! Build service — runs one build pass over the declarations of a build file.
//!
//! The pass is split in two so that nothing is instantiated from a broken
//! configuration:
//!
//! 1. [`validate`](BuildService::validate) checks every record against its
//!    schema, declares identifiers (explicit ones first, then generated
//!    ones) and resolves every reference. All errors are collected.
//! 2. [`run`](BuildService::run) hands each resolved climate record to its
//!    platform descriptor, in declaration order.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use irbuild_domain::climate_ir::DeviceSnapshot;
use irbuild_domain::component::DeclaredType;
use irbuild_domain::declaration::{ClimatePlatform, ComponentDomain, Declaration};
use irbuild_domain::error::{BuildError, ValidationError};
use irbuild_domain::id::ComponentId;
use irbuild_domain::option_value::OptionValue;
use irbuild_domain::platform::TargetPlatform;
use irbuild_domain::schema::{CONF_ID, CONF_PLATFORM, ConfigPath, OptionKind, Schema, ValidatedRecord};
use irbuild_domain::time::{self, Timestamp};

use crate::ports::{ClimateIrRegistrar, DeviceRegistry};
use crate::services::whynter::{self, WhynterDescriptor};
use crate::symbol_table::SymbolTable;

/// Result of a successful build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildSummary {
    pub compiled_at: Timestamp,
    pub platform: TargetPlatform,
    pub loaded_components: BTreeSet<&'static str>,
    pub devices: Vec<DeviceSnapshot>,
}

/// A validated build, ready to be instantiated.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildPlan {
    climates: Vec<PlannedClimate>,
    loaded_components: BTreeSet<&'static str>,
    symbols: SymbolTable,
}

impl BuildPlan {
    /// Resolved climate records, in declaration order.
    pub fn records(&self) -> impl Iterator<Item = &ValidatedRecord> {
        self.climates.iter().map(|planned| &planned.record)
    }

    #[must_use]
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PlannedClimate {
    platform: ClimatePlatform,
    schema: Schema,
    record: ValidatedRecord,
}

enum Entry {
    External {
        path: ConfigPath,
        ty: DeclaredType,
        id: Option<ComponentId>,
    },
    Climate(PlannedClimate),
}

/// Application service running build passes against a device registry.
pub struct BuildService<R, C> {
    registry: R,
    climate_ir: C,
    platform: TargetPlatform,
}

impl<R: DeviceRegistry, C: ClimateIrRegistrar> BuildService<R, C> {
    /// Create a new service writing into `registry`.
    pub fn new(registry: R, climate_ir: C, platform: TargetPlatform) -> Self {
        Self {
            registry,
            climate_ir,
            platform,
        }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Validate every declaration and resolve every reference.
    ///
    /// Starts from an empty symbol table each time, so validating the same
    /// declarations twice gives the same outcome.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Invalid`] carrying every validation and
    /// reference error found.
    #[tracing::instrument(skip_all, fields(declarations = declarations.len()))]
    pub fn validate(&self, declarations: &[Declaration]) -> Result<BuildPlan, BuildError> {
        let mut errors: Vec<BuildError> = Vec::new();
        let mut symbols = SymbolTable::default();
        let mut entries = Vec::with_capacity(declarations.len());
        let mut loaded_components = BTreeSet::new();
        let mut indices: HashMap<ComponentDomain, usize> = HashMap::new();

        // Schemas and explicit identifiers.
        for decl in declarations {
            let index = indices.entry(decl.domain).or_default();
            let path = ConfigPath::root(decl.domain.as_str()).index(*index);
            *index += 1;

            if let Some(ty) = decl.domain.external_type() {
                match external_id(&path, decl) {
                    Ok(Some(id)) => {
                        if let Err(err) = symbols.declare(id.clone(), ty, &path) {
                            errors.push(err.into());
                        }
                        entries.push(Entry::External {
                            path,
                            ty,
                            id: Some(id),
                        });
                    }
                    Ok(None) => entries.push(Entry::External { path, ty, id: None }),
                    Err(err) => errors.push(err.into()),
                }
                continue;
            }

            match self.validate_climate(&path, decl) {
                Ok(planned) => {
                    for (key, ty) in declared_ids(&planned.schema) {
                        if let Some(id) = planned.record.id(key)
                            && let Err(err) = symbols.declare(id.clone(), ty, &path.key(key))
                        {
                            errors.push(err.into());
                        }
                    }
                    loaded_components.extend(auto_load(planned.platform));
                    entries.push(Entry::Climate(planned));
                }
                Err(errs) => errors.extend(errs),
            }
        }

        // Generated identifiers.
        for entry in &mut entries {
            match entry {
                Entry::External { path, ty, id } => {
                    if id.is_none() {
                        *id = Some(symbols.generate(*ty, &path.key(CONF_ID)));
                    }
                }
                Entry::Climate(PlannedClimate { schema, record, .. }) => {
                    for (key, ty) in declared_ids(schema) {
                        if record.is_pending(key) {
                            let id = symbols.generate(ty, &record.path().key(key));
                            record.fill_id(key, id);
                        }
                    }
                }
            }
        }

        // References.
        let mut climates = Vec::new();
        for entry in entries {
            let Entry::Climate(mut planned) = entry else {
                continue;
            };
            let PlannedClimate { schema, record, .. } = &mut planned;
            for spec in schema.options() {
                let OptionKind::UseId(capability) = spec.kind else {
                    continue;
                };
                let field = record.path().key(spec.key);
                if let Some(id) = record.id(spec.key) {
                    if let Err(err) = symbols.resolve(id, capability, &field) {
                        errors.push(err.into());
                    }
                } else if record.is_pending(spec.key) {
                    match symbols.sole(capability, &field) {
                        Ok(id) => record.fill_id(spec.key, id),
                        Err(err) => errors.push(err.into()),
                    }
                }
            }
            climates.push(planned);
        }

        if !errors.is_empty() {
            tracing::debug!(errors = errors.len(), "configuration rejected");
            return Err(BuildError::Invalid(errors));
        }
        Ok(BuildPlan {
            climates,
            loaded_components,
            symbols,
        })
    }

    /// Validate `declarations`, then instantiate and register every device.
    ///
    /// The registry is append-only and outlives a run: devices of earlier
    /// runs stay registered, so declaring one of their ids again fails with
    /// [`BuildError::Registry`]. The summary only lists the devices this run
    /// registered.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Invalid`] when validation fails, in which case
    /// the registry is left untouched, or the first registration error.
    #[tracing::instrument(skip_all, fields(platform = %self.platform))]
    pub fn run(&mut self, declarations: &[Declaration]) -> Result<BuildSummary, BuildError> {
        let plan = self.validate(declarations)?;
        let already_registered = self.registry.devices().len();

        for planned in &plan.climates {
            match planned.platform {
                ClimatePlatform::Whynter => WhynterDescriptor::new(self.platform).to_code(
                    &mut self.registry,
                    &self.climate_ir,
                    &planned.record,
                )?,
            }
        }

        let devices: Vec<DeviceSnapshot> = self
            .registry
            .devices()
            .into_iter()
            .skip(already_registered)
            .map(|device| device.snapshot())
            .collect();
        tracing::info!(devices = devices.len(), "build complete");

        Ok(BuildSummary {
            compiled_at: time::compiled_at(),
            platform: self.platform,
            loaded_components: plan.loaded_components,
            devices,
        })
    }

    fn validate_climate(
        &self,
        path: &ConfigPath,
        decl: &Declaration,
    ) -> Result<PlannedClimate, Vec<BuildError>> {
        let platform_path = path.key(CONF_PLATFORM);
        let platform = match decl.platform() {
            None => {
                return Err(vec![
                    ValidationError::MissingRequired {
                        path: platform_path,
                    }
                    .into(),
                ]);
            }
            Some(OptionValue::String(name)) => ClimatePlatform::from_name(name).ok_or_else(|| {
                vec![BuildError::from(ValidationError::UnknownPlatform {
                    path: platform_path,
                    platform: name.clone(),
                })]
            })?,
            Some(other) => {
                return Err(vec![
                    ValidationError::WrongType {
                        path: platform_path,
                        expected: "string",
                        found: other.type_name(),
                    }
                    .into(),
                ]);
            }
        };

        let schema = match platform {
            ClimatePlatform::Whynter => WhynterDescriptor::schema(&self.climate_ir),
        };
        let record = schema
            .validate(path, &decl.options)
            .map_err(|errs| errs.into_iter().map(BuildError::from).collect::<Vec<_>>())?;
        Ok(PlannedClimate {
            platform,
            schema,
            record,
        })
    }
}

/// Identifier an external component declares, if it sets one.
fn external_id(
    path: &ConfigPath,
    decl: &Declaration,
) -> Result<Option<ComponentId>, ValidationError> {
    match decl.options.get(CONF_ID) {
        None => Ok(None),
        Some(OptionValue::String(raw)) => ComponentId::parse(raw.as_str())
            .map(Some)
            .map_err(|reason| ValidationError::InvalidId {
                path: path.key(CONF_ID),
                value: raw.clone(),
                reason,
            }),
        Some(other) => Err(ValidationError::WrongType {
            path: path.key(CONF_ID),
            expected: "identifier",
            found: other.type_name(),
        }),
    }
}

fn declared_ids(schema: &Schema) -> impl Iterator<Item = (&'static str, DeclaredType)> + '_ {
    schema.options().iter().filter_map(|spec| match spec.kind {
        OptionKind::DeclareId(ty) => Some((spec.key, ty)),
        _ => None,
    })
}

fn auto_load(platform: ClimatePlatform) -> impl Iterator<Item = &'static str> {
    match platform {
        ClimatePlatform::Whynter => whynter::AUTO_LOAD.iter().copied(),
    }
}
