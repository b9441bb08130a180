//! Random instance synthesis.
//!
//! Produces a `Sample` that conforms to a type node. The entropy source is any
//! `rand::Rng`; tests seed a `StdRng`, the free-function API uses the thread rng.
//! Synthesis is best-effort: a synthesized float may happen to be integral and
//! re-infer as `Int`.
use std::sync::Arc;

use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;

use crate::config::SynthOptions;
use crate::ir::{Primitive, Record, TypeNode, Union};
use crate::names::{self, NameAllocator, random_token};
use crate::value::{Callable, Object, Sample, Symbol};

pub struct Synthesizer<R> {
    rng: R,
    symbols: Arc<dyn NameAllocator>,
    options: SynthOptions,
}

impl Synthesizer<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for Synthesizer<ThreadRng> {
    fn default() -> Self { Self::new() }
}

impl<R: Rng> Synthesizer<R> {
    pub fn with_rng(rng: R) -> Self {
        Self::with_options(rng, names::default_allocator(), SynthOptions::default())
    }

    /// `symbols` supplies the tokens of synthesized opaque symbols.
    pub fn with_options(rng: R, symbols: Arc<dyn NameAllocator>, options: SynthOptions) -> Self {
        Self { rng, symbols, options }
    }

    pub fn synthesize(&mut self, node: &TypeNode) -> Sample {
        match node {
            TypeNode::Scalar(p) => self.scalar(*p),
            TypeNode::Record(rec) => self.record(rec),
            TypeNode::Sum(u) => self.one_of(u),
            TypeNode::Array(u) => self.array(u),
        }
    }

    fn scalar(&mut self, p: Primitive) -> Sample {
        match p {
            Primitive::String => Sample::String(random_token(&mut self.rng, self.options.token_len)),
            Primitive::Boolean => Sample::Bool(self.rng.gen_bool(0.5)),
            Primitive::Float => {
                let bound = self.options.float_bound;
                Sample::Number(if bound.is_finite() && bound > 0.0 { self.rng.gen_range(0.0..bound) } else { 0.0 })
            }
            Primitive::Int => {
                // difference of two draws: positive, negative or zero
                let a = self.draw_int();
                let b = self.draw_int();
                Sample::Number((a - b) as f64)
            }
            Primitive::Function => Sample::Function(Callable::new(|args| Sample::Array(args.to_vec()))),
            Primitive::Null => Sample::Null,
            Primitive::Symbol => Sample::Symbol(Symbol::new(self.symbols.next_name())),
        }
    }

    fn draw_int(&mut self) -> i64 {
        let bound = self.options.int_bound.min(i64::MAX as u64);
        if bound == 0 { 0 } else { self.rng.gen_range(0..bound) as i64 }
    }

    fn record(&mut self, rec: &Record) -> Sample {
        let mut obj = Object::new();
        for (key, ty) in rec.fields() {
            let v = self.synthesize(ty);
            obj.insert(key.clone(), v);
        }
        Sample::Object(obj)
    }

    fn one_of(&mut self, u: &Union) -> Sample {
        match u.alternatives().choose(&mut self.rng) {
            Some(alt) => self.synthesize(alt),
            None => Sample::Null,
        }
    }

    /// Every element picks its own alternative.
    fn array(&mut self, u: &Union) -> Sample {
        if u.is_empty() {
            return Sample::Array(Vec::new());
        }
        let len = self.rng.gen_range(0..=self.options.max_array_len);
        let items = (0..len).map(|_| self.one_of(u)).collect();
        Sample::Array(items)
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::Inferrer;
    use crate::names::Counter;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    fn synth(seed: u64) -> Synthesizer<StdRng> {
        Synthesizer::with_options(
            StdRng::seed_from_u64(seed),
            Arc::new(Counter::new("sym")),
            SynthOptions::default(),
        )
    }

    #[test]
    fn scalars_have_matching_kinds() {
        let mut s = synth(1);
        for _ in 0..50 {
            assert!(matches!(s.synthesize(&Primitive::String.into()), Sample::String(ref t) if t.len() == 6));
            assert!(matches!(s.synthesize(&Primitive::Boolean.into()), Sample::Bool(_)));
            assert!(matches!(s.synthesize(&Primitive::Null.into()), Sample::Null));
            match s.synthesize(&Primitive::Int.into()) {
                Sample::Number(n) => assert_eq!(n.fract(), 0.0),
                other => panic!("expected number, got {other:?}"),
            }
            match s.synthesize(&Primitive::Float.into()) {
                Sample::Number(n) => assert!((0.0..crate::config::MAX_SAFE_INTEGER as f64).contains(&n)),
                other => panic!("expected number, got {other:?}"),
            }
        }
    }

    #[test]
    fn ints_take_both_signs() {
        let mut s = synth(7);
        let draws: Vec<f64> = (0..200).filter_map(|_| match s.synthesize(&Primitive::Int.into()) {
            Sample::Number(n) => Some(n),
            _ => None,
        }).collect();
        assert!(draws.iter().any(|n| *n > 0.0));
        assert!(draws.iter().any(|n| *n < 0.0));
    }

    #[test]
    fn functions_echo_their_arguments() {
        let mut s = synth(2);
        let Sample::Function(f) = s.synthesize(&Primitive::Function.into()) else {
            panic!("expected a callable");
        };
        let args = [Sample::Number(1.0), Sample::String("a".into())];
        assert_eq!(f.call(&args), Sample::Array(args.to_vec()));
    }

    #[test]
    fn symbols_are_fresh() {
        let mut s = synth(3);
        let a = s.synthesize(&Primitive::Symbol.into());
        let b = s.synthesize(&Primitive::Symbol.into());
        assert_eq!(a, Sample::Symbol(Symbol::new("sym1")));
        assert_ne!(a, b);
    }

    #[test]
    fn arrays_stay_within_length_and_alternatives() {
        let names = Arc::new(Counter::default());
        let node = Inferrer::new(names).infer(&Sample::from(json!([1, "x"]))).unwrap();
        let mut s = synth(4);
        let mut lens = std::collections::BTreeSet::new();
        for _ in 0..300 {
            let Sample::Array(xs) = s.synthesize(&node) else { panic!("expected array") };
            assert!(xs.len() <= 9);
            lens.insert(xs.len());
            assert!(xs.iter().all(|x| matches!(x, Sample::Number(_) | Sample::String(_))));
        }
        assert!(lens.contains(&0));
        assert!(lens.contains(&9));
    }

    #[test]
    fn unusable_float_bounds_yield_zero() {
        for bound in [f64::INFINITY, f64::NAN, 0.0, -1.0] {
            let options = SynthOptions { float_bound: bound, ..SynthOptions::default() };
            let mut s = Synthesizer::with_options(StdRng::seed_from_u64(9), Arc::new(Counter::default()), options);
            assert_eq!(s.synthesize(&Primitive::Float.into()), Sample::Number(0.0));
        }
    }

    #[test]
    fn empty_array_synthesizes_empty() {
        let node = TypeNode::array(Union::new("E", Vec::new()));
        assert_eq!(synth(5).synthesize(&node), Sample::Array(Vec::new()));
    }

    #[test]
    fn sum_picks_one_alternative() {
        let node = TypeNode::sum(Union::new("S", [TypeNode::Scalar(Primitive::Boolean), TypeNode::Scalar(Primitive::String)]));
        let mut s = synth(6);
        for _ in 0..20 {
            assert!(matches!(s.synthesize(&node), Sample::Bool(_) | Sample::String(_)));
        }
    }

    #[test]
    fn records_keep_their_keys() {
        let names = Arc::new(Counter::default());
        let node = Inferrer::new(names).infer(&Sample::from(json!({"a": 1, "b": {"c": true}}))).unwrap();
        let out = synth(8).synthesize(&node);
        let obj = out.as_object().unwrap();
        let keys: Vec<&str> = obj.fields.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b"]);
        assert!(matches!(obj.get("b"), Some(Sample::Object(inner)) if inner.get("c").is_some()));
    }
}
