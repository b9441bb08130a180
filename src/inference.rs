//! Structural inference: walk a `Sample` and build its `TypeNode`.
//!
//! Scalars map onto the fixed primitive catalog, arrays become `Array` nodes
//! over their deduplicated element types, and keyed composites become
//! `Record`s named after their class tag (or a freshly allocated name).
//!
//! The walk never mutates its input. There is no depth limit and no cycle
//! detection; `Sample` is an owned tree, so cycles cannot be expressed.
pub mod num;
pub mod obj;

use std::sync::Arc;

use rayon::prelude::*;
use serde_json::Value;
use tracing::trace;

use crate::config::Options;
use crate::error::{Error, Result};
use crate::ir::{Primitive, Record, TypeNode, Union};
use crate::merge::Merger;
use crate::names::{self, NameAllocator};
use crate::value::{Object, Sample};

// ------------------------------- Engine ----------------------------------- //

#[derive(Clone)]
pub struct Inferrer {
    names: Arc<dyn NameAllocator>,
    options: Options,
}

impl Inferrer {
    pub fn new(names: Arc<dyn NameAllocator>) -> Self {
        Self { names, options: Options::default() }
    }

    pub fn with_options(names: Arc<dyn NameAllocator>, options: Options) -> Self {
        Self { names, options }
    }

    pub fn infer(&self, v: &Sample) -> Result<TypeNode> {
        match v {
            Sample::Number(n) => Ok(num::classify(*n).into()),
            Sample::String(_) => Ok(Primitive::String.into()),
            Sample::Bool(_) => Ok(Primitive::Boolean.into()),
            Sample::Function(_) => self.unplain(v, Primitive::Function),
            Sample::Undefined | Sample::Null => self.unplain(v, Primitive::Null),
            Sample::Symbol(_) => self.unplain(v, Primitive::Symbol),
            Sample::Array(xs) => self.infer_array(xs),
            Sample::Object(o) => self.infer_object(o),
        }
    }

    fn unplain(&self, v: &Sample, p: Primitive) -> Result<TypeNode> {
        if self.options.is_strict() {
            return Err(Error::invalid_kind(v.kind_name(), "no schema type for this sample kind"));
        }
        Ok(p.into())
    }

    fn infer_array(&self, xs: &[Sample]) -> Result<TypeNode> {
        // name first so allocation order matches the walk (parents before children)
        let name = self.names.next_name();
        let elems = xs.iter().map(|x| self.infer(x)).collect::<Result<Vec<_>>>()?;
        let arr = Union::new(name, elems);
        trace!(name = arr.name(), len = xs.len(), alternatives = arr.len(), "inferred array");
        Ok(TypeNode::array(arr))
    }

    fn infer_object(&self, o: &Object) -> Result<TypeNode> {
        let name = match obj::class_name(o.class.as_deref()) {
            Some(class) => class.to_string(),
            None => self.names.next_name(),
        };
        let mut rec = Record::new(name);
        for (key, value) in &o.fields {
            rec.set_field(key.clone(), self.infer(value)?);
        }
        trace!(name = rec.name(), fields = rec.len(), "inferred record");
        Ok(rec.into())
    }
}

// ------------------------------- Front API -------------------------------- //

/// Streaming accumulator: observe samples one at a time (or in bulk), then
/// `solve` merges every observed record into one.
pub struct Inference {
    inferrer: Inferrer,
    merger: Merger,
    observed: Vec<TypeNode>,
}

impl Inference {
    pub fn new() -> Self {
        Self::with_options(names::default_allocator(), Options::default())
    }

    pub fn with_options(names: Arc<dyn NameAllocator>, options: Options) -> Self {
        Self {
            inferrer: Inferrer::with_options(Arc::clone(&names), options.clone()),
            merger: Merger::with_options(names, options),
            observed: Vec::new(),
        }
    }

    pub fn observe_value(&mut self, v: &Sample) -> Result<()> {
        let node = self.inferrer.infer(v)?;
        self.observed.push(node);
        Ok(())
    }

    pub fn observe_json(&mut self, v: &Value) -> Result<()> {
        self.observe_value(&Sample::from(v))
    }

    /// Infers samples in parallel; observation order stays the input order.
    pub fn observe_many(&mut self, vs: &[Sample]) -> Result<()> {
        let inferrer = &self.inferrer;
        let nodes = vs.par_iter()
            .map(|v| inferrer.infer(v))
            .collect::<Result<Vec<_>>>()?;
        self.observed.extend(nodes);
        Ok(())
    }

    pub fn observed(&self) -> &[TypeNode] { &self.observed }

    pub fn solve(&self) -> Result<TypeNode> {
        self.merger.combine(&self.observed)
    }
}

impl Default for Inference {
    fn default() -> Self { Self::new() }
}

/// Infer every value and merge the resulting records (lenient).
pub fn infer_from_values<'a, I>(values: I) -> TypeNode
where
    I: IntoIterator<Item = &'a Sample>
{
    let names = names::default_allocator();
    let inferrer = Inferrer::new(Arc::clone(&names));
    // lenient inference never fails
    let nodes: Vec<TypeNode> = values.into_iter()
        .filter_map(|v| inferrer.infer(v).ok())
        .collect();
    Merger::new(names).combine_lenient(&nodes)
}

// ------------------------------- Tests ------------------------------------ //
