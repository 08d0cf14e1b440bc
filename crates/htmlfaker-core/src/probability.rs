//! Named probability levels for configuration files and callers.

pub const ALWAYS: f64 = 1.0;
pub const LIKELY: f64 = 0.75;
pub const MAYBE: f64 = 0.5;
pub const UNLIKELY: f64 = 0.25;
pub const NEVER: f64 = 0.0;

/// Clamp a probability into `[0, 1]`.
pub fn clamp(probability: f64) -> f64 {
    probability.clamp(NEVER, ALWAYS)
}
