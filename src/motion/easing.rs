//! Easing curves mapping linear progress to curved progress.

use serde::{Deserialize, Serialize};

/// Easing curve. All curves map 0 to 0 and 1 to 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    /// Quadratic ease-in: slow start.
    In,
    /// Quadratic ease-out: slow finish.
    Out,
    /// Ease-in for the first half, ease-out for the second.
    #[default]
    InOut,
}

impl Easing {
    /// Curve `u`, clamped to `[0, 1]`.
    #[must_use]
    pub fn apply(self, u: f32) -> f32 {
        let u = u.clamp(0.0, 1.0);
        match self {
            Easing::Linear => u,
            Easing::In => u * u,
            Easing::Out => u * (2.0 - u),
            Easing::InOut => {
                if u < 0.5 {
                    2.0 * u * u
                } else {
                    let v = -2.0 * u + 2.0;
                    1.0 - v * v / 2.0
                }
            }
        }
    }
}
