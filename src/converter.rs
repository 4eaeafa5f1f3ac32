//! The conversion engine.
//!
//! A [`Converter`] bundles everything a conversion needs: the mapping
//! profile, the unit registry, the fingerprinter and label generator used to
//! finalize resources, an optional resolver for external references, and the
//! [`ConversionConfig`]. It is immutable once built and cheap to share
//! between threads.
//!
//! ```
//! use bibld::{Converter, MappingProfile, UnitRegistry};
//! use bibld::bibframe::RdfGraph;
//!
//! let converter = Converter::new(MappingProfile::bibframe()?, UnitRegistry::standard())?;
//! let resources = converter.to_ld(&RdfGraph::new())?;
//! assert!(resources.is_empty());
//! # Ok::<(), bibld::ConversionError>(())
//! ```

use std::io::Write;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::bibframe::to_ld::LdMapper;
use crate::bibframe::to_rdf::RdfMapper;
use crate::bibframe::{ConversionConfig, RdfGraph};
use crate::error::{ConversionError, Result};
use crate::fingerprint::{Fingerprinter, Sha256Fingerprinter};
use crate::label::{LabelGenerator, PropertyLabelGenerator};
use crate::mock;
use crate::profile::MappingProfile;
use crate::registry::UnitRegistry;
use crate::report::ConversionReport;
use crate::resolver::ResourceResolver;
use crate::resource::{ResourceGraph, ResourceId};

/// Bidirectional BIBFRAME ↔ resource graph converter.
#[derive(Debug, Clone)]
pub struct Converter {
    profile: Arc<MappingProfile>,
    registry: Arc<UnitRegistry>,
    fingerprinter: Arc<dyn Fingerprinter>,
    labels: Arc<dyn LabelGenerator>,
    resolver: Option<Arc<dyn ResourceResolver>>,
    config: ConversionConfig,
}

impl Converter {
    /// Creates a converter from a profile and a unit registry.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::Configuration`] if the registry has no
    /// default unit, or [`ConversionError::InvalidProfile`] if the profile
    /// fails validation.
    pub fn new(
        profile: impl Into<Arc<MappingProfile>>,
        registry: impl Into<Arc<UnitRegistry>>,
    ) -> Result<Self> {
        let profile = profile.into();
        let registry = registry.into();
        if !registry.has_default() {
            return Err(ConversionError::Configuration(
                "unit registry has no default unit".to_string(),
            ));
        }
        profile.validate()?;
        info!(profile = %profile.name, roots = profile.roots.len(), "converter ready");
        Ok(Self {
            profile,
            registry,
            fingerprinter: Arc::new(Sha256Fingerprinter),
            labels: Arc::new(PropertyLabelGenerator::default()),
            resolver: None,
            config: ConversionConfig::default(),
        })
    }

    /// Creates a converter with the bundled BIBFRAME profile and the
    /// standard units.
    ///
    /// # Errors
    ///
    /// Fails only if the bundled profile does not parse.
    pub fn standard() -> Result<Self> {
        Self::new(MappingProfile::bibframe()?, UnitRegistry::standard())
    }

    /// Replaces the fingerprinter.
    #[must_use]
    pub fn with_fingerprinter(mut self, fingerprinter: impl Fingerprinter + 'static) -> Self {
        self.fingerprinter = Arc::new(fingerprinter);
        self
    }

    /// Replaces the label generator.
    #[must_use]
    pub fn with_label_generator(mut self, labels: impl LabelGenerator + 'static) -> Self {
        self.labels = Arc::new(labels);
        self
    }

    /// Sets the resolver consulted for external references.
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl ResourceResolver + 'static) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /// Replaces the conversion configuration.
    #[must_use]
    pub fn with_config(mut self, config: ConversionConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the mapping profile.
    #[must_use]
    pub fn profile(&self) -> &MappingProfile {
        &self.profile
    }

    /// Returns the unit registry.
    #[must_use]
    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    /// Returns the fingerprinter.
    #[must_use]
    pub fn fingerprinter(&self) -> &dyn Fingerprinter {
        self.fingerprinter.as_ref()
    }

    /// Returns the label generator.
    #[must_use]
    pub fn labels(&self) -> &dyn LabelGenerator {
        self.labels.as_ref()
    }

    /// Returns the resolver, if one is configured.
    #[must_use]
    pub fn resolver(&self) -> Option<&dyn ResourceResolver> {
        self.resolver.as_deref()
    }

    /// Returns the conversion configuration.
    #[must_use]
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Converts a BIBFRAME graph into a resource graph.
    ///
    /// # Errors
    ///
    /// Fails on unsupported data, malformed wire structures, missing units,
    /// and (in strict mode) on any omission.
    pub fn to_ld(&self, rdf: &RdfGraph) -> Result<ResourceGraph> {
        self.to_ld_with_report(rdf).map(|(graph, _)| graph)
    }

    /// Like [`to_ld`](Self::to_ld), also returning what was left out.
    ///
    /// # Errors
    ///
    /// See [`to_ld`](Self::to_ld).
    pub fn to_ld_with_report(&self, rdf: &RdfGraph) -> Result<(ResourceGraph, ConversionReport)> {
        let (graph, report) = LdMapper::new(self, rdf).run()?;
        log_report("bibframe to ld", &graph, &report);
        Ok((graph, report))
    }

    /// Converts a resource graph into a BIBFRAME graph.
    ///
    /// # Errors
    ///
    /// Fails on dangling links in strict mode, missing units, and unit
    /// failures.
    pub fn to_rdf(&self, graph: &ResourceGraph) -> Result<RdfGraph> {
        self.to_rdf_with_report(graph).map(|(rdf, _)| rdf)
    }

    /// Like [`to_rdf`](Self::to_rdf), also returning what was left out.
    ///
    /// # Errors
    ///
    /// See [`to_rdf`](Self::to_rdf).
    pub fn to_rdf_with_report(
        &self,
        graph: &ResourceGraph,
    ) -> Result<(RdfGraph, ConversionReport)> {
        let (rdf, report) = RdfMapper::new(self, graph).run()?;
        if !report.is_clean() {
            warn!(omissions = report.omissions.len(), "ld to bibframe left resources out");
        }
        debug!(triples = rdf.len(), "ld to bibframe finished");
        Ok((rdf, report))
    }

    /// Converts a single resource of a graph, treating it as the only root.
    ///
    /// # Errors
    ///
    /// See [`to_rdf`](Self::to_rdf).
    pub fn to_rdf_resource(&self, graph: &ResourceGraph, id: ResourceId) -> Result<RdfGraph> {
        RdfMapper::new(self, graph).run_for(&[id]).map(|(rdf, _)| rdf)
    }

    /// Converts a resource graph and serializes it in the configured format.
    ///
    /// # Errors
    ///
    /// Returns conversion errors, serialization errors, and IO errors from
    /// the writer.
    pub fn write_rdf<W: Write>(&self, graph: &ResourceGraph, writer: W) -> Result<()> {
        let rdf = self.to_rdf(graph)?;
        rdf.serialize_to_writer(writer, self.config.output_format)
    }

    /// Collects the external keys of every mock reachable from the roots.
    #[must_use]
    pub fn gather_mock_keys(&self, graph: &ResourceGraph) -> Vec<String> {
        mock::gather_mock_keys(graph)
    }

    /// Replaces mocks using the configured resolver.
    ///
    /// Without a resolver the graph is returned unchanged.
    ///
    /// # Errors
    ///
    /// See [`unmock_with`](Self::unmock_with).
    pub fn unmock(&self, graph: &ResourceGraph) -> Result<ResourceGraph> {
        match self.resolver() {
            Some(resolver) => self.unmock_with(graph, resolver),
            None => Ok(graph.clone()),
        }
    }

    /// Replaces mocks using an explicit resolver.
    ///
    /// The keys are gathered first and resolved in one batch.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::NoUnit`] when a re-derived resource matches
    /// no unit of a registry without a default.
    pub fn unmock_with(
        &self,
        graph: &ResourceGraph,
        resolver: &dyn ResourceResolver,
    ) -> Result<ResourceGraph> {
        let keys = self.gather_mock_keys(graph);
        if keys.is_empty() {
            return Ok(graph.clone());
        }
        let resolved = resolver.resolve_batch(&keys);
        debug!(keys = keys.len(), resolved = resolved.len(), "resolved mock keys");
        mock::unmock(graph, &resolved, self.registry(), self.fingerprinter(), self.labels())
    }
}

fn log_report(direction: &str, graph: &ResourceGraph, report: &ConversionReport) {
    for omission in &report.omissions {
        debug!(direction, %omission, "omitted");
    }
    if report.is_clean() {
        debug!(direction, resources = graph.len(), "conversion finished");
    } else {
        warn!(
            direction,
            resources = graph.len(),
            omissions = report.omissions.len(),
            mocked = report.mocked.len(),
            "conversion finished with omissions"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::MapResolver;
    use crate::resource::Resource;
    use crate::units::CoreUnit;
    use crate::vocab::types;

    #[test]
    fn test_registry_without_default_is_rejected() {
        let registry = UnitRegistry::builder().build();
        let profile = MappingProfile::bibframe().expect("bundled profile");
        let err = Converter::new(profile, registry).unwrap_err();
        assert!(matches!(err, ConversionError::Configuration(_)));
    }

    #[test]
    fn test_custom_registry_with_default() {
        let registry = UnitRegistry::builder().default_unit(CoreUnit).build();
        let profile = MappingProfile::bibframe().expect("bundled profile");
        assert!(Converter::new(profile, registry).is_ok());
    }

    #[test]
    fn test_unmock_without_mocks_is_identity() {
        let converter = Converter::standard().expect("standard converter");
        let mut graph = ResourceGraph::new();
        let id = graph.add(Resource::new([types::INSTANCE]), converter.fingerprinter());
        graph.add_root(id);

        let resolver = MapResolver::new();
        let result = converter.unmock_with(&graph, &resolver).expect("unmock");
        assert_eq!(result.roots().collect::<Vec<_>>(), vec![id]);
        assert_eq!(converter.unmock(&graph).expect("unmock").len(), 1);
    }

    #[test]
    fn test_write_rdf_uses_configured_format() {
        let converter = Converter::standard()
            .expect("standard converter")
            .with_config(
                ConversionConfig::new().with_output_format(crate::bibframe::RdfFormat::NTriples),
            );
        let mut graph = ResourceGraph::new();
        let mut instance = Resource::new([types::INSTANCE]);
        instance.add_property(crate::vocab::properties::DIMENSIONS, "24 cm");
        let id = graph.add(instance, converter.fingerprinter());
        graph.add_root(id);

        let mut out = Vec::new();
        converter.write_rdf(&graph, &mut out).expect("serializes");
        let text = String::from_utf8(out).expect("utf-8");
        assert!(text.contains("24 cm"));
    }
}
