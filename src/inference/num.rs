use crate::ir::Primitive;

/// `Int` when truncation leaves the value unchanged, `Float` otherwise.
/// Non-finite values are never integers.
///
/// Any integral double counts, including values outside the 32-bit range an
/// SDL `Int` can hold (`4e15` classifies as `Int`).
pub fn classify(n: f64) -> Primitive {
    if n.is_finite() && n.trunc() == n {
        Primitive::Int
    } else {
        Primitive::Float
    }
}
