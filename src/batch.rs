//! Parallel conversion of many graphs using Rayon.
//!
//! Each input graph is converted independently on Rayon's work-stealing
//! pool. A [`Converter`] holds no mutable state, so a single instance is
//! shared by every task.
//!
//! ```
//! use bibld::batch::to_ld_batch;
//! use bibld::bibframe::RdfGraph;
//! use bibld::Converter;
//!
//! let converter = Converter::standard()?;
//! let inputs = vec![RdfGraph::new(), RdfGraph::new()];
//! let results = to_ld_batch(&converter, &inputs);
//! assert_eq!(results.len(), 2);
//! # Ok::<(), bibld::ConversionError>(())
//! ```

use rayon::prelude::*;
use tracing::debug;

use crate::bibframe::RdfGraph;
use crate::converter::Converter;
use crate::error::Result;
use crate::resource::ResourceGraph;

/// Converts BIBFRAME graphs to resource graphs in parallel.
///
/// Results come back in input order; one failing graph does not affect
/// the others.
pub fn to_ld_batch(converter: &Converter, inputs: &[RdfGraph]) -> Vec<Result<ResourceGraph>> {
    debug!(graphs = inputs.len(), "converting batch to ld");
    inputs.par_iter().map(|rdf| converter.to_ld(rdf)).collect()
}

/// Converts resource graphs to BIBFRAME graphs in parallel.
///
/// Results come back in input order.
pub fn to_rdf_batch(converter: &Converter, inputs: &[ResourceGraph]) -> Vec<Result<RdfGraph>> {
    debug!(graphs = inputs.len(), "converting batch to bibframe");
    inputs.par_iter().map(|graph| converter.to_rdf(graph)).collect()
}

/// Like [`to_ld_batch`], but fails with the first error in input order.
///
/// # Errors
///
/// Returns the error of the earliest failing graph.
pub fn to_ld_batch_all(converter: &Converter, inputs: &[RdfGraph]) -> Result<Vec<ResourceGraph>> {
    inputs
        .par_iter()
        .map(|rdf| converter.to_ld(rdf))
        .collect::<Result<Vec<ResourceGraph>>>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Resource;
    use crate::vocab::{properties, types};

    #[test]
    fn test_empty_batch() {
        let converter = Converter::standard().expect("standard converter");
        assert!(to_ld_batch(&converter, &[]).is_empty());
        assert!(to_ld_batch_all(&converter, &[]).expect("empty").is_empty());
    }

    #[test]
    fn test_rdf_batch_preserves_order() {
        let converter = Converter::standard().expect("standard converter");
        let inputs: Vec<ResourceGraph> = (0..8)
            .map(|n| {
                let mut graph = ResourceGraph::new();
                let mut instance = Resource::new([types::INSTANCE]);
                instance.add_property(properties::DIMENSIONS, format!("{n} cm"));
                let id = graph.add(instance, converter.fingerprinter());
                graph.add_root(id);
                graph
            })
            .collect();

        let results = to_rdf_batch(&converter, &inputs);
        for (n, result) in results.into_iter().enumerate() {
            let rdf = result.expect("converts");
            assert!(rdf.triples().any(|t| t.object.value() == format!("{n} cm")));
        }
    }
}
