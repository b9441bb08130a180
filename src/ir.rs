// Type node graph. Composite nodes are shared by `Arc`, never deep-copied.

use std::sync::Arc;

use indexmap::IndexMap;

// ------------------------------ Primitives -------------------------------- //

/// The fixed scalar catalog. Scalars are plain values, so two `Int`s are
/// always the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    Int,
    Float,
    String,
    Boolean,
    Function,
    Null,
    Symbol,
}

impl Primitive {
    pub const ALL: [Primitive; 7] = [
        Primitive::Int,
        Primitive::Float,
        Primitive::String,
        Primitive::Boolean,
        Primitive::Function,
        Primitive::Null,
        Primitive::Symbol,
    ];

    /// "Plain" scalars have an SDL keyword; the rest render as `UNKNOWN`.
    pub fn is_plain(self) -> bool {
        matches!(self, Primitive::Int | Primitive::Float | Primitive::String | Primitive::Boolean)
    }

    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Primitive::Int => Some("Int"),
            Primitive::Float => Some("Float"),
            Primitive::String => Some("String"),
            Primitive::Boolean => Some("Boolean"),
            Primitive::Function | Primitive::Null | Primitive::Symbol => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Primitive::Function => "Function",
            Primitive::Null => "Null",
            Primitive::Symbol => "Symbol",
            plain => plain.keyword().unwrap_or("UNKNOWN"),
        }
    }
}

// ------------------------------- Nodes ------------------------------------ //

#[derive(Debug, Clone)]
pub enum TypeNode {
    Scalar(Primitive),
    Record(Arc<Record>),
    /// "one of" a set of alternatives for a single slot
    Sum(Arc<Union>),
    /// array whose elements are each one of the alternatives
    Array(Arc<Union>),
}

#[derive(Debug, Clone)]
pub struct Record {
    name: String,
    fields: IndexMap<String, TypeNode>, // first-insertion order
}

/// Alternative set shared by `Sum` and `Array` nodes. Never holds duplicates.
#[derive(Debug, Clone)]
pub struct Union {
    name: String,
    alternatives: Vec<TypeNode>,
}

/// Scalars compare by kind, composites by identity: two records with the same
/// shape are still different alternatives.
impl PartialEq for TypeNode {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TypeNode::Scalar(a), TypeNode::Scalar(b)) => a == b,
            (TypeNode::Record(a), TypeNode::Record(b)) => Arc::ptr_eq(a, b),
            (TypeNode::Sum(a), TypeNode::Sum(b)) => Arc::ptr_eq(a, b),
            (TypeNode::Array(a), TypeNode::Array(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for TypeNode {}

impl From<Primitive> for TypeNode {
    fn from(p: Primitive) -> Self { TypeNode::Scalar(p) }
}

impl From<Record> for TypeNode {
    fn from(r: Record) -> Self { TypeNode::Record(Arc::new(r)) }
}

impl TypeNode {
    pub fn sum(u: Union) -> Self { TypeNode::Sum(Arc::new(u)) }

    pub fn array(u: Union) -> Self { TypeNode::Array(Arc::new(u)) }

    pub fn is_scalar(&self) -> bool { matches!(self, TypeNode::Scalar(_)) }

    /// Declaration label; scalars have none.
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeNode::Scalar(_) => None,
            TypeNode::Record(r) => Some(r.name()),
            TypeNode::Sum(u) | TypeNode::Array(u) => Some(u.name()),
        }
    }

    pub fn as_scalar(&self) -> Option<Primitive> {
        match self {
            TypeNode::Scalar(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            TypeNode::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Alternatives of a `Sum` or `Array`; empty for scalars and records.
    pub fn alternatives(&self) -> &[TypeNode] {
        match self {
            TypeNode::Sum(u) | TypeNode::Array(u) => u.alternatives(),
            TypeNode::Scalar(_) | TypeNode::Record(_) => &[],
        }
    }

    /// Identity key for "seen" sets during graph walks.
    pub(crate) fn identity(&self) -> Option<usize> {
        match self {
            TypeNode::Scalar(_) => None,
            TypeNode::Record(r) => Some(Arc::as_ptr(r) as usize),
            TypeNode::Sum(u) | TypeNode::Array(u) => Some(Arc::as_ptr(u) as usize),
        }
    }
}

// ------------------------------- Record ----------------------------------- //

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), fields: IndexMap::new() }
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn fields(&self) -> &IndexMap<String, TypeNode> { &self.fields }

    pub fn field(&self, key: &str) -> Option<&TypeNode> { self.fields.get(key) }

    pub fn len(&self) -> usize { self.fields.len() }

    pub fn is_empty(&self) -> bool { self.fields.is_empty() }

    /// Builder-style insert; replacing a key keeps its original position.
    pub fn with_field(mut self, key: impl Into<String>, ty: impl Into<TypeNode>) -> Self {
        self.fields.insert(key.into(), ty.into());
        self
    }

    pub(crate) fn set_field(&mut self, key: String, ty: TypeNode) {
        self.fields.insert(key, ty);
    }
}

// -------------------------------- Union ----------------------------------- //

impl Union {
    /// Collapses duplicate alternatives, keeping first occurrences in order.
    pub fn new(name: impl Into<String>, alternatives: impl IntoIterator<Item = TypeNode>) -> Self {
        let mut alts: Vec<TypeNode> = Vec::new();
        for alt in alternatives {
            if !alts.contains(&alt) {
                alts.push(alt);
            }
        }
        Self { name: name.into(), alternatives: alts }
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn alternatives(&self) -> &[TypeNode] { &self.alternatives }

    pub fn len(&self) -> usize { self.alternatives.len() }

    pub fn is_empty(&self) -> bool { self.alternatives.is_empty() }

    /// Exactly one alternative: rendered without its own union declaration.
    pub fn is_degenerate(&self) -> bool { self.alternatives.len() == 1 }

    pub fn first(&self) -> Option<&TypeNode> { self.alternatives.first() }
}
