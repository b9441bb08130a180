use anyhow::Result;
use sdl_infer::{Inference, Sample, synthesize};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

/// Realistic place-listing payloads:
/// - Records that disagree on a few field types (rating: int vs float, phone: string vs null)
/// - Homogeneous and mixed lists
/// - A nested record that is missing from some samples
fn realistic_samples() -> Vec<Value> {
    vec![
        json!({
            "id": "0ahUKEa1ZQ",
            "name": "Acme Widgets",
            "location": {"lat": 37.4219, "lon": -122.0840},
            "url": "https://example.com/a",
            "rating": 4.3,
            "open": true,
            "tags": ["hardware", "store"],
        }),
        json!({
            "id": "0ahUKEa2ZQ",
            "name": "Acme Widgets - East",
            "location": {"lat": 37.4200, "lon": -122.0830},
            "rating": 4,
            "open": false,
            "tags": ["hardware"],
            "phone": null,
        }),
        json!({
            "id": "0ahUKEa3ZQ",
            "name": "ACME",
            "rating": 5,
            "tags": [],
            "phone": "+1 555 0100",
            "hours": [{"day": "mon", "open": 9, "close": 17}, "closed"],
        }),
    ]
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // 1) build state from the samples
    let samples: Vec<Sample> = realistic_samples().into_iter().map(Sample::from).collect();
    let mut inf = Inference::new();
    inf.observe_many(&samples)?;
    let schema = inf.solve()?;

    // 2) render SDL
    println!("{}", sdl_infer::render(&schema));

    // 3) one random instance of the merged schema
    let instance = synthesize(&schema).to_json();
    eprintln!("—— synthesized instance ——");
    eprintln!("{}", serde_json::to_string_pretty(&instance)?);
    Ok(())
}
