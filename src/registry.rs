//! Mapper unit dispatch.
//!
//! The registry maps `(type set, predicate)` patterns on either side of a
//! profile edge to the [`MapperUnit`] responsible for converting it. Lookup
//! ranks every matching registration by specificity (a declared type set
//! weighs 2, a declared predicate 1) and breaks ties by registration order.
//! When nothing specific matches, the default unit is used.
//!
//! ```
//! use bibld::registry::{UnitKey, UnitPattern, UnitRegistry};
//! use bibld::units::{CoreUnit, TitleUnit};
//!
//! let registry = UnitRegistry::builder()
//!     .register([UnitKey::Ld(UnitPattern::new(["TITLE"], Some("TITLE")))], TitleUnit)
//!     .default_unit(CoreUnit)
//!     .build();
//!
//! let types = ["TITLE".to_string()].into();
//! assert_eq!(registry.lookup_ld(&types, Some("TITLE")).map(|u| u.name()), Some("title"));
//! assert!(registry.lookup_ld(&types, None).is_none());
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::bibframe::namespaces::{mads, properties as bf_props, BF, MADSRDF};
use crate::error::{ConversionError, Result};
use crate::profile::{BfResourceDef, LdResourceDef};
use crate::units::{
    AgentUnit, ComplexSubjectUnit, CoreUnit, MapperUnit, TitleUnit, TitledResourceUnit,
};
use crate::vocab::{predicates, types};

/// A `(type set, predicate)` pattern. `None` on either part matches anything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnitPattern {
    /// Exact type set to match, if declared.
    pub types: Option<BTreeSet<String>>,
    /// Exact predicate to match, if declared.
    pub predicate: Option<String>,
}

impl UnitPattern {
    /// Pattern with both a type set and an optional predicate.
    #[must_use]
    pub fn new<I, S>(types: I, predicate: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: Some(types.into_iter().map(Into::into).collect()),
            predicate: predicate.map(String::from),
        }
    }

    /// Pattern that matches any type set under the given predicate.
    #[must_use]
    pub fn predicate(predicate: &str) -> Self {
        Self {
            types: None,
            predicate: Some(predicate.to_string()),
        }
    }

    fn specificity(&self) -> u8 {
        u8::from(self.types.is_some()) * 2 + u8::from(self.predicate.is_some())
    }

    fn matches(&self, types: &BTreeSet<String>, predicate: Option<&str>) -> bool {
        self.types.as_ref().map_or(true, |declared| declared == types)
            && self
                .predicate
                .as_deref()
                .map_or(true, |declared| Some(declared) == predicate)
    }
}

/// Which side of a profile edge a pattern is keyed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitKey {
    /// Internal type set and predicate.
    Ld(UnitPattern),
    /// Wire type set and predicate IRIs.
    Bf(UnitPattern),
}

struct Registration {
    key: UnitKey,
    unit: Arc<dyn MapperUnit>,
}

/// Builder for [`UnitRegistry`].
#[derive(Default)]
pub struct UnitRegistryBuilder {
    registrations: Vec<Registration>,
    default: Option<Arc<dyn MapperUnit>>,
}

impl fmt::Debug for UnitRegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitRegistryBuilder")
            .field("registrations", &self.registrations.len())
            .field("default", &self.default.as_ref().map(|u| u.name()))
            .finish()
    }
}

impl UnitRegistryBuilder {
    /// Registers a unit under one or more keys. Earlier registrations win
    /// ties between equally specific matches.
    #[must_use]
    pub fn register<K, U>(mut self, keys: K, unit: U) -> Self
    where
        K: IntoIterator<Item = UnitKey>,
        U: MapperUnit + 'static,
    {
        let unit: Arc<dyn MapperUnit> = Arc::new(unit);
        for key in keys {
            self.registrations.push(Registration {
                key,
                unit: Arc::clone(&unit),
            });
        }
        self
    }

    /// Sets the generic fallback unit.
    #[must_use]
    pub fn default_unit<U: MapperUnit + 'static>(mut self, unit: U) -> Self {
        self.default = Some(Arc::new(unit));
        self
    }

    /// Finishes the registry.
    #[must_use]
    pub fn build(self) -> UnitRegistry {
        UnitRegistry {
            registrations: self.registrations,
            default: self.default,
        }
    }
}

/// Read-only unit registry, shared across conversions.
pub struct UnitRegistry {
    registrations: Vec<Registration>,
    default: Option<Arc<dyn MapperUnit>>,
}

impl fmt::Debug for UnitRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.registrations.iter().map(|r| r.unit.name()).collect();
        f.debug_struct("UnitRegistry")
            .field("registrations", &names)
            .field("default", &self.default.as_ref().map(|u| u.name()))
            .finish()
    }
}

impl UnitRegistry {
    /// Starts an empty registry.
    #[must_use]
    pub fn builder() -> UnitRegistryBuilder {
        UnitRegistryBuilder::default()
    }

    /// Returns the registry with the built-in units for the bundled profile.
    #[must_use]
    pub fn standard() -> Self {
        let cs_type = format!("{MADSRDF}{}", mads::COMPLEX_SUBJECT);
        let bf_subject = format!("{BF}{}", bf_props::SUBJECT);
        let bf_contribution = format!("{BF}{}", bf_props::CONTRIBUTION);

        Self::builder()
            .register(
                [
                    UnitKey::Ld(UnitPattern::new([types::INSTANCE], None)),
                    UnitKey::Ld(UnitPattern::new([types::WORK], None)),
                ],
                TitledResourceUnit,
            )
            .register(
                [types::TITLE, types::PARALLEL_TITLE, types::VARIANT_TITLE]
                    .into_iter()
                    .map(|t| UnitKey::Ld(UnitPattern::new([t], Some(predicates::TITLE)))),
                TitleUnit,
            )
            .register(
                [
                    UnitKey::Ld(UnitPattern::predicate(predicates::CREATOR)),
                    UnitKey::Ld(UnitPattern::predicate(predicates::CONTRIBUTOR)),
                    UnitKey::Bf(UnitPattern::predicate(&bf_contribution)),
                ],
                AgentUnit,
            )
            .register(
                [
                    UnitKey::Ld(UnitPattern::predicate(predicates::SUBJECT)),
                    UnitKey::Bf(UnitPattern::new([cs_type], Some(bf_subject.as_str()))),
                ],
                ComplexSubjectUnit,
            )
            .default_unit(CoreUnit)
            .build()
    }

    /// Returns true if a fallback unit is registered.
    #[must_use]
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Most specific unit registered for an internal key, without fallback.
    #[must_use]
    pub fn lookup_ld(
        &self,
        types: &BTreeSet<String>,
        predicate: Option<&str>,
    ) -> Option<&dyn MapperUnit> {
        self.best(|key| match key {
            UnitKey::Ld(pattern) if pattern.matches(types, predicate) => {
                Some(pattern.specificity())
            },
            _ => None,
        })
    }

    /// Most specific unit registered for a wire key, without fallback.
    #[must_use]
    pub fn lookup_bf(
        &self,
        types: &BTreeSet<String>,
        predicate: Option<&str>,
    ) -> Option<&dyn MapperUnit> {
        self.best(|key| match key {
            UnitKey::Bf(pattern) if pattern.matches(types, predicate) => {
                Some(pattern.specificity())
            },
            _ => None,
        })
    }

    /// Resolves the unit for a profile edge, consulting both sides and
    /// falling back to the default unit.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::NoUnit`] when nothing matches and no default
    /// is registered.
    pub fn resolve(&self, ld: &LdResourceDef, bf: &BfResourceDef) -> Result<&dyn MapperUnit> {
        let ld_predicate = ld.predicate.as_deref();
        let bf_predicate = bf.predicate.as_deref();
        self.best(|key| match key {
            UnitKey::Ld(pattern) if pattern.matches(&ld.type_set, ld_predicate) => {
                Some(pattern.specificity())
            },
            UnitKey::Bf(pattern) if pattern.matches(&bf.type_set, bf_predicate) => {
                Some(pattern.specificity())
            },
            _ => None,
        })
        .or_else(|| self.default.as_deref())
        .ok_or_else(|| ConversionError::NoUnit {
            types: ld.type_set.clone(),
            predicate: ld.predicate.clone(),
        })
    }

    /// Resolves the unit for an internal key with fallback.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::NoUnit`] when nothing matches and no default
    /// is registered.
    pub fn resolve_ld(
        &self,
        types: &BTreeSet<String>,
        predicate: Option<&str>,
    ) -> Result<&dyn MapperUnit> {
        self.lookup_ld(types, predicate)
            .or_else(|| self.default.as_deref())
            .ok_or_else(|| ConversionError::NoUnit {
                types: types.clone(),
                predicate: predicate.map(String::from),
            })
    }

    fn best<F>(&self, score: F) -> Option<&dyn MapperUnit>
    where
        F: Fn(&UnitKey) -> Option<u8>,
    {
        let mut best: Option<(&Registration, u8)> = None;
        for registration in &self.registrations {
            let Some(specificity) = score(&registration.key) else {
                continue;
            };
            if best.map_or(true, |(_, current)| specificity > current) {
                best = Some((registration, specificity));
            }
        }
        best.map(|(registration, _)| registration.unit.as_ref())
    }
}
