//! SDL rendering.
//!
//! A node renders as the list of declarations reachable from it, dependencies
//! first, separated by blank lines:
//!
//! ```text
//! type T2 {
//!   x: Int
//! }
//!
//! union T3 = Int | String
//!
//! type T1 {
//!   point: T2
//!   tags: [T3!]
//! }
//! ```
//!
//! Declarations are collected by a post-order walk keyed on node identity, so
//! a node shared by several parents is declared once. The walk follows field
//! and alternative order, so output is a pure function of the graph.
use std::collections::HashSet;

use tracing::trace;

use crate::config::Options;
use crate::error::{Error, Result};
use crate::ir::{Primitive, Record, TypeNode, Union};

/// Placeholder for types the SDL dialect cannot express.
pub const UNKNOWN: &str = "UNKNOWN";

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: Options,
}

impl Renderer {
    pub fn new() -> Self { Self::default() }

    pub fn with_options(options: Options) -> Self { Self { options } }

    /// Render `node`. Under strict options any `UNKNOWN` placeholder is an error.
    pub fn render(&self, node: &TypeNode) -> Result<String> {
        let mut w = Walk::default();
        let out = w.render_root(node);
        if self.options.is_strict() {
            if let Some(err) = w.unsupported.into_iter().next() {
                return Err(err);
            }
        }
        Ok(out)
    }

    /// Render `node`, printing `UNKNOWN` for anything unsupported.
    pub fn render_lenient(&self, node: &TypeNode) -> String {
        Walk::default().render_root(node)
    }
}

// ------------------------------- Walk ------------------------------------- //

#[derive(Default)]
struct Walk {
    seen: HashSet<usize>,
    decls: Vec<String>,
    unsupported: Vec<Error>,
}

impl Walk {
    fn render_root(&mut self, node: &TypeNode) -> String {
        if let TypeNode::Scalar(p) = node {
            return self.scalar_ref(*p);
        }
        self.visit(node);
        trace!(root = node.name(), declarations = self.decls.len(), "rendered");
        self.decls.join("\n\n")
    }

    fn visit(&mut self, node: &TypeNode) {
        let Some(id) = node.identity() else { return };
        if !self.seen.insert(id) {
            return;
        }
        match node {
            TypeNode::Scalar(_) => {}
            TypeNode::Record(rec) => {
                for ty in rec.fields().values() {
                    self.visit(ty);
                }
                let decl = self.record_decl(rec);
                self.decls.push(decl);
            }
            TypeNode::Sum(u) | TypeNode::Array(u) => {
                for alt in u.alternatives() {
                    self.visit(alt);
                }
                if u.len() > 1 {
                    let decl = self.union_decl(u);
                    self.decls.push(decl);
                }
            }
        }
    }

    fn record_decl(&mut self, rec: &Record) -> String {
        let mut out = format!("type {} {{\n", rec.name());
        for (key, ty) in rec.fields() {
            let ty = self.type_ref(ty);
            out.push_str(&format!("  {key}: {ty}\n"));
        }
        out.push('}');
        out
    }

    fn union_decl(&mut self, u: &Union) -> String {
        let alts: Vec<String> = u.alternatives().iter().map(|alt| self.type_ref(alt)).collect();
        format!("union {} = {}", u.name(), alts.join(" | "))
    }

    /// How a node is written where it is used (field type, union member).
    fn type_ref(&mut self, node: &TypeNode) -> String {
        match node {
            TypeNode::Scalar(p) => self.scalar_ref(*p),
            TypeNode::Record(rec) => rec.name().to_string(),
            TypeNode::Sum(u) => match u.alternatives() {
                [] => self.unknown("sum", u.name()),
                [only] => self.type_ref(only),
                _ => u.name().to_string(),
            },
            TypeNode::Array(u) => {
                let elem = match u.alternatives() {
                    [] => self.unknown("empty array", u.name()),
                    [only] => self.type_ref(only),
                    _ => u.name().to_string(),
                };
                format!("[{elem}!]")
            }
        }
    }

    fn scalar_ref(&mut self, p: Primitive) -> String {
        match p.keyword() {
            Some(kw) => kw.to_string(),
            None => self.unknown(p.label(), "primitive has no SDL keyword"),
        }
    }

    fn unknown(&mut self, kind: &str, context: &str) -> String {
        self.unsupported.push(Error::invalid_kind(kind, context));
        UNKNOWN.to_string()
    }
}

// ------------------------------- Tests ------------------------------------ //
