//! Infer SDL-style schemas from sample values.
//!
//! Pipeline: `infer` a sample into a type node, `combine` the records of
//! several samples (disagreeing fields become unions), `render` the result as
//! `type` / `union` declarations, and `synthesize` random instances back out.
//!
//! The free functions below are lenient and use the process-wide name
//! allocator. Build an [`Inferrer`], [`Merger`], [`Renderer`] or
//! [`Synthesizer`] directly for injected names, seeded randomness, or strict
//! [`Options`].
pub mod config;
pub mod error;
pub mod inference;
pub mod ir;
pub mod merge;
pub mod names;
pub mod render;
pub mod synth;
pub mod value;

pub use config::{Options, Strictness, SynthOptions};
pub use error::{Error, Result};
pub use inference::{Inference, Inferrer, infer_from_values};
pub use ir::{Primitive, Record, TypeNode, Union};
pub use merge::Merger;
pub use names::{Counter, NameAllocator, RandomTokens};
pub use render::{Renderer, UNKNOWN};
pub use synth::Synthesizer;
pub use value::{Callable, Object, Sample, Symbol};

/// Type node of a single sample.
pub fn infer(value: &Sample) -> TypeNode {
    // lenient inference never fails
    Inferrer::new(names::default_allocator())
        .infer(value)
        .unwrap_or(TypeNode::Scalar(Primitive::Null))
}

/// Merge the records among `nodes` into one record; other nodes are dropped.
pub fn combine(nodes: &[TypeNode]) -> TypeNode {
    Merger::new(names::default_allocator()).combine_lenient(nodes)
}

pub fn render(node: &TypeNode) -> String {
    Renderer::new().render_lenient(node)
}

pub fn synthesize(node: &TypeNode) -> Sample {
    Synthesizer::new().synthesize(node)
}

/// Alias of [`synthesize`].
pub fn random(node: &TypeNode) -> Sample {
    synthesize(node)
}
