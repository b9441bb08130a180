//! End-to-end: infer → combine → render → synthesize.
use std::sync::Arc;

use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sdl_infer::{
    Counter, Inference, Inferrer, Merger, Options, Primitive, Renderer, Sample, SynthOptions,
    Synthesizer, TypeNode, combine, infer, render, synthesize,
};
use serde_json::{Value, json};

fn sample(v: Value) -> Sample {
    Sample::from(v)
}

/// Field lines of the last (root) declaration.
fn root_fields(sdl: &str) -> Vec<String> {
    let root = sdl.rsplit("\n\n").next().unwrap_or_default();
    root.lines()
        .filter(|l| l.starts_with("  "))
        .map(|l| l.trim().to_string())
        .collect()
}

#[test]
fn field_count_matches_key_count() {
    for v in [
        json!({}),
        json!({"a": 1}),
        json!({"a": 1, "b": [1, "x"], "c": {"d": null}, "e": 2.5}),
    ] {
        let keys = v.as_object().unwrap().len();
        let sdl = render(&infer(&sample(v)));
        assert!(sdl.contains("type "));
        assert_eq!(root_fields(&sdl).len(), keys);
    }
}

#[test]
fn scalar_keywords() {
    assert_eq!(render(&infer(&sample(json!(1)))), "Int");
    assert_eq!(render(&infer(&sample(json!(1.25)))), "Float");
    assert_eq!(render(&infer(&sample(json!("s")))), "String");
    assert_eq!(render(&infer(&sample(json!(true)))), "Boolean");
}

#[test]
fn merge_identity_introduces_no_union() {
    let merged = combine(&[infer(&sample(json!({"a": 1})))]);
    let sdl = render(&merged);
    assert_eq!(root_fields(&sdl), ["a: Int"]);
    assert!(!sdl.contains("union"));
}

#[test]
fn merge_divergence_and_convergence() {
    let diverged = combine(&[infer(&sample(json!({"a": 1}))), infer(&sample(json!({"a": "x"})))]);
    let a = diverged.as_record().unwrap().field("a").unwrap();
    assert_eq!(a.alternatives().len(), 2);
    let sdl = render(&diverged);
    let union_line = sdl.lines().find(|l| l.starts_with("union ")).unwrap();
    assert!(union_line.ends_with("= Int | String"));

    let converged = combine(&[infer(&sample(json!({"a": 1}))), infer(&sample(json!({"a": 2})))]);
    let sdl = render(&converged);
    assert_eq!(root_fields(&sdl), ["a: Int"]);
    assert!(!sdl.contains("union"));
}

#[test]
fn array_fields() {
    assert_eq!(render(&infer(&sample(json!([1, 2, 3])))), "");

    let names = Arc::new(Counter::new("N"));
    let node = Inferrer::new(names).infer(&sample(json!({"nums": [1, 2, 3], "mix": [1, "x"]}))).unwrap();
    let mix = node.as_record().unwrap().field("mix").unwrap();
    assert_eq!(mix.alternatives().len(), 2);
    assert_eq!(
        render(&node),
        "union N3 = Int | String\n\ntype N1 {\n  nums: [Int!]\n  mix: [N3!]\n}"
    );
}

#[test]
fn dependencies_are_declared_before_use() {
    let node = infer(&sample(json!({
        "owner": {"name": "a", "address": {"zip": 1}},
        "pets": [{"kind": "cat"}, {"kind": "dog", "age": 3}],
        "meta": {"tags": ["x"]}
    })));
    let sdl = render(&node);
    let decls: Vec<&str> = sdl.split("\n\n").collect();
    let position = |name: &str| {
        decls.iter().position(|d| {
            d.starts_with(&format!("type {name} {{")) || d.starts_with(&format!("union {name} ="))
        })
    };
    for (i, decl) in decls.iter().enumerate() {
        for line in decl.lines().skip(1).filter(|l| l.starts_with("  ")) {
            let ty = line.split(": ").nth(1).unwrap().trim_matches(|c: char| c == '[' || c == ']' || c == '!');
            if let Some(dep) = position(ty) {
                assert!(dep < i, "{ty} declared after its use in:\n{sdl}");
            }
        }
    }
    assert!(decls.last().unwrap().starts_with(&format!("type {} {{", node.name().unwrap())));
}

#[test]
fn render_is_idempotent() {
    let merged = combine(&[
        infer(&sample(json!({"a": [1, {"b": 2}], "c": "x"}))),
        infer(&sample(json!({"a": 3, "d": {"e": false}}))),
    ]);
    assert_eq!(render(&merged), render(&merged));
}

#[test]
fn synthesize_then_reinfer_keeps_scalar_shape() {
    let node = infer(&sample(json!({"name": "x", "ok": true, "count": 3})));
    let mut synth = Synthesizer::with_options(
        StdRng::seed_from_u64(42),
        Arc::new(Counter::new("s")),
        SynthOptions::default(),
    );
    for _ in 0..25 {
        let again = infer(&synth.synthesize(&node));
        let (a, b) = (node.as_record().unwrap(), again.as_record().unwrap());
        let kinds = |r: &sdl_infer::Record| {
            r.fields().iter().map(|(k, t)| (k.clone(), t.as_scalar())).collect::<Vec<_>>()
        };
        assert_eq!(kinds(a), kinds(b));
    }
}

#[test]
fn synthesized_records_round_trip_to_json() {
    let node = infer(&sample(json!({"id": 1, "tags": ["a"], "inner": {"flag": true}})));
    let value = synthesize(&node).to_json();
    let obj = value.as_object().unwrap();
    assert!(obj["id"].is_i64());
    assert!(obj["tags"].is_array());
    assert!(obj["inner"]["flag"].is_boolean());
}

#[test]
fn strict_pipeline_fails_fast() {
    let names = Arc::new(Counter::default());
    let mut inf = Inference::with_options(names.clone(), Options::strict());
    assert!(inf.observe_json(&json!({"a": null})).is_err());
    inf.observe_json(&json!({"a": []})).unwrap();
    let solved = inf.solve().unwrap();
    assert!(Renderer::with_options(Options::strict()).render(&solved).is_err());
    assert_eq!(Renderer::new().render(&solved).unwrap(), "type T4 {\n  a: [UNKNOWN!]\n}");

    let strict = Merger::with_options(names, Options::strict());
    assert!(strict.combine(&[TypeNode::Scalar(Primitive::Int)]).is_err());
}
