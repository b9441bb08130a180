//! Unique name allocation for records, sums and arrays (and synthesized symbols).
//!
//! A name doubles as a node's declaration label, so an allocator must never
//! hand out the same name twice. Both allocators here are safe to share across
//! threads.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use once_cell::sync::Lazy;
use rand::Rng;

pub trait NameAllocator: Send + Sync {
    fn next_name(&self) -> String;
}

static DEFAULT_NAMES: Lazy<Arc<dyn NameAllocator>> =
    Lazy::new(|| Arc::new(RandomTokens::default()));

/// Process-wide allocator used by the free-function API.
pub fn default_allocator() -> Arc<dyn NameAllocator> {
    Arc::clone(&DEFAULT_NAMES)
}

// ------------------------------- Counter --------------------------------- //

/// Deterministic `<prefix>1`, `<prefix>2`, ... names.
#[derive(Debug)]
pub struct Counter {
    prefix: String,
    next: AtomicU64,
}

impl Counter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), next: AtomicU64::new(1) }
    }
}

impl Default for Counter {
    fn default() -> Self { Self::new("T") }
}

impl NameAllocator for Counter {
    fn next_name(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{n}", self.prefix)
    }
}

// ---------------------------- Random tokens ------------------------------ //

const ALPHA: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const ALNUM: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Random base-36 prefix drawn once, followed by an atomic counter. The
/// first character is always a letter so every name is a valid identifier;
/// the counter makes names unique without remembering them.
#[derive(Debug)]
pub struct RandomTokens {
    prefix: String,
    next: AtomicU64,
}

impl RandomTokens {
    pub fn new(len: usize) -> Self {
        let prefix = random_token(&mut rand::thread_rng(), len);
        Self { prefix, next: AtomicU64::new(1) }
    }

    pub fn prefix(&self) -> &str { &self.prefix }
}

impl Default for RandomTokens {
    fn default() -> Self { Self::new(6) }
}

impl NameAllocator for RandomTokens {
    fn next_name(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{n}", self.prefix)
    }
}

/// Random identifier-safe token of `len` characters.
pub fn random_token<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    let mut out = String::with_capacity(len);
    for i in 0..len.max(1) {
        let set = if i == 0 { ALPHA } else { ALNUM };
        out.push(set[rng.gen_range(0..set.len())] as char);
    }
    out
}
