//! Card motion: easing curves and the timed move scheduler.

pub mod easing;
pub mod scheduler;

pub use easing::Easing;
pub use scheduler::{CardView, Move, MoveCompleted, MoveId, MoveScheduler, RenderHints, Start};
