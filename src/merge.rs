//! Record merging.
//!
//! Folds records left to right into a fresh accumulator. A key seen for the
//! first time is copied verbatim; a key whose types disagree is widened into a
//! `Sum`. Widening an existing `Sum` extends its alternatives instead of
//! nesting a new `Sum` around it.
//!
//! Each fold step produces a new accumulator value; no input node is mutated.
use std::sync::Arc;

use tracing::debug;

use crate::config::Options;
use crate::error::{Error, Result};
use crate::ir::{Record, TypeNode, Union};
use crate::names::NameAllocator;

#[derive(Clone)]
pub struct Merger {
    names: Arc<dyn NameAllocator>,
    options: Options,
}

impl Merger {
    pub fn new(names: Arc<dyn NameAllocator>) -> Self {
        Self { names, options: Options::default() }
    }

    pub fn with_options(names: Arc<dyn NameAllocator>, options: Options) -> Self {
        Self { names, options }
    }

    /// Merge `nodes` into one `Record`. Non-record inputs are dropped, or
    /// rejected under strict options.
    pub fn combine(&self, nodes: &[TypeNode]) -> Result<TypeNode> {
        if self.options.is_strict() {
            if let Some((i, bad)) = nodes.iter().enumerate().find(|(_, n)| n.as_record().is_none()) {
                return Err(Error::invalid_kind(kind_of(bad), format!("combine input #{i} is not a record")));
            }
        }
        Ok(self.combine_lenient(nodes))
    }

    pub fn combine_lenient(&self, nodes: &[TypeNode]) -> TypeNode {
        let init = Record::new(self.names.next_name());
        let merged = nodes.iter().fold(init, |acc, node| match node {
            TypeNode::Record(src) => self.merge_record(acc, src),
            other => {
                debug!(kind = kind_of(other), "combine: dropping non-record input");
                acc
            }
        });
        merged.into()
    }

    fn merge_record(&self, mut acc: Record, src: &Record) -> Record {
        for (key, incoming) in src.fields() {
            let next = match acc.field(key) {
                None => incoming.clone(),
                Some(existing) if existing == incoming => continue,
                Some(existing) => self.widen(existing, incoming),
            };
            acc.set_field(key.clone(), next);
        }
        acc
    }

    /// Union of two disagreeing field types, flattening `Sum`s on either side.
    fn widen(&self, existing: &TypeNode, incoming: &TypeNode) -> TypeNode {
        let mut alts: Vec<TypeNode> = sum_members(existing).to_vec();
        let before = alts.len();
        for alt in sum_members(incoming) {
            if !alts.contains(alt) {
                alts.push(alt.clone());
            }
        }
        // nothing new joined an existing sum: keep it (and its name)
        if matches!(existing, TypeNode::Sum(_)) && alts.len() == before {
            return existing.clone();
        }
        let sum = Union::new(self.names.next_name(), alts);
        debug!(name = sum.name(), alternatives = sum.len(), "combine: widened field into sum");
        TypeNode::sum(sum)
    }
}

fn sum_members(node: &TypeNode) -> &[TypeNode] {
    match node {
        TypeNode::Sum(u) => u.alternatives(),
        other => std::slice::from_ref(other),
    }
}

fn kind_of(node: &TypeNode) -> &'static str {
    match node {
        TypeNode::Scalar(p) => p.label(),
        TypeNode::Record(_) => "record",
        TypeNode::Sum(_) => "sum",
        TypeNode::Array(_) => "array",
    }
}

// ------------------------------- Tests ------------------------------------ //
