//! Generation pipeline
//!
//! Drives the full run for a batch of annotation matches: partition by
//! dialect, build the owner/member tree, merge paths, transform the
//! reachable type graph and render both output modules. Each dialect
//! produces its own independent [`DialectOutput`].

use crate::emit::{render_client_module, render_types_module};
use crate::extractor::ExtractorRegistry;
use crate::model::TypeRegistry;
use crate::paths::{self, PathNode};
use crate::transform::{TransformContext, TransformedType};
use crate::tree::{self, AnnotationMatch};
use anyhow::Context;

/// The two rendered JavaScript modules for one dialect
#[derive(Debug, Clone)]
pub struct GeneratedModules {
    pub types_module: String,
    pub client_module: String,
}

/// Everything produced for one annotation dialect
#[derive(Debug)]
pub struct DialectOutput {
    pub dialect: &'static str,
    pub path_tree: Vec<PathNode>,
    pub types: Vec<TransformedType>,
    pub modules: GeneratedModules,
}

/// Run the pipeline end to end
///
/// The whole run is a pure function of its inputs; feeding the same matches
/// and registry twice yields byte-identical modules.
pub fn generate(
    extractors: &ExtractorRegistry,
    types: &TypeRegistry,
    matches: Vec<AnnotationMatch>,
) -> anyhow::Result<Vec<DialectOutput>> {
    let partitions = extractors.partition(matches)?;
    let mut outputs = Vec::with_capacity(partitions.len());

    for partition in partitions {
        let dialect = partition.extractor.name();
        let owners = tree::build_match_tree(&partition.matches);
        tracing::debug!(dialect, owners = owners.len(), "built match tree");

        let (path_tree, reachable) = paths::merge_paths(partition.extractor, &owners)?;

        let mut ctx = TransformContext::new();
        for ty in &reachable {
            ctx.transform_root(types, ty)?;
        }
        let transformed = ctx.into_types();

        tracing::info!(
            dialect,
            endpoints = paths::endpoint_count(&path_tree),
            types = transformed.len(),
            "generated modules"
        );

        let types_module = render_types_module(&transformed)
            .with_context(|| format!("rendering type module for dialect {dialect}"))?;
        let client_module = render_client_module(&path_tree)
            .with_context(|| format!("rendering client module for dialect {dialect}"))?;

        outputs.push(DialectOutput {
            dialect,
            path_tree,
            types: transformed,
            modules: GeneratedModules {
                types_module,
                client_module,
            },
        });
    }

    Ok(outputs)
}
