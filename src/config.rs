//! Engine options.
//!
//! Every knob has a default matching the lenient behaviour, so an empty JSON
//! document (`{}`) yields `Options::default()`.
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

// ------------------------------- Policy ---------------------------------- //

/// Largest integer a JS-style double represents exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

const DEFAULT_MAX_ARRAY_LEN: usize = 9;   // array length drawn from [0, 9]
const DEFAULT_TOKEN_LEN: usize = 6;       // synthesized string / name length

// ------------------------------- Options --------------------------------- //

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// classify / drop / print `UNKNOWN`
    #[default]
    Lenient,
    /// fail with `Error::InvalidInputKind`
    Strict,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Options {
    pub strictness: Strictness,
    pub synth: SynthOptions,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SynthOptions {
    /// inclusive upper bound on synthesized array length
    pub max_array_len: usize,
    /// integers are `a - b` with `a, b` drawn from `[0, int_bound)`
    pub int_bound: u64,
    /// floats are drawn from `[0, float_bound)`
    pub float_bound: f64,
    pub token_len: usize,
}

impl Default for SynthOptions {
    fn default() -> Self {
        Self {
            max_array_len: DEFAULT_MAX_ARRAY_LEN,
            int_bound: MAX_SAFE_INTEGER,
            float_bound: MAX_SAFE_INTEGER as f64,
            token_len: DEFAULT_TOKEN_LEN,
        }
    }
}

impl Options {
    pub fn strict() -> Self {
        Self { strictness: Strictness::Strict, ..Self::default() }
    }

    pub fn is_strict(&self) -> bool {
        self.strictness == Strictness::Strict
    }

    pub fn from_json_str(src: &str) -> Result<Self> {
        from_str_with_path(src)
    }
}

/// Deserialize with JSON-path context in error messages.
fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        Error::Config { path, message: err.into_inner().to_string() }
    })
}
