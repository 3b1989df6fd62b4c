//! # jsrest
//!
//! **jsrest** generates JavaScript REST client modules from a description of
//! REST-annotated source code: the resource classes, their endpoint methods,
//! and the object types those endpoints exchange.
//!
//! ## Overview
//!
//! Generation runs as a fixed pipeline. Annotation matches are partitioned
//! by dialect, grouped into an owner/member tree, merged into a deduplicated
//! path tree, and the type graph reachable from the endpoints is transformed
//! into an emission-ready set. Two modules come out the other end: a
//! type-definition module of ES5 constructor functions and a client-call
//! module exposing one nested `RestServices` namespace per path tree.
//!
//! ## Architecture
//!
//! - **[`model`]** - Elements, annotations, type references and registries
//! - **[`tree`]** - Owner/member match tree building
//! - **[`extractor`]** - The [`Extractor`](extractor::Extractor) dialect
//!   contract and the explicit dialect registry
//! - **[`dialect`]** - The bundled route-mapping dialect
//! - **[`paths`]** - Path tree merging with duplicate-endpoint detection
//! - **[`transform`]** - Memoized, cycle-safe type graph transformation
//! - **[`emit`]** - Askama-backed rendering of both output modules
//! - **[`pipeline`]** - End-to-end generation per dialect
//! - **[`input`]** - YAML/JSON description file loading
//! - **[`project`]** - Output file placement
//! - **[`cli`]** - The `jsrest-gen` command line front end

pub mod cli;
pub mod dialect;
pub mod emit;
pub mod error;
pub mod extractor;
pub mod input;
pub mod model;
pub mod paths;
pub mod pipeline;
pub mod project;
pub mod transform;
pub mod tree;

pub use error::Error;
