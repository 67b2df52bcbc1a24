//! Pipeline composition and execution: input bundle in, allotaxonograph out.

mod runner;

pub use runner::{
    run_bundle, Allotaxonograph, Pipeline, PipelineConfig, DEFAULT_WORDSHIFT_ROWS,
};
