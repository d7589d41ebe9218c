//! Guarded timed automata.
//!
//! An automaton is a set of states, each holding a predicted value and a list
//! of outgoing transitions whose guards partition the real line. Feeding a
//! value follows the unique transition whose guard contains it.

pub mod guard;
pub mod model;
pub mod normalize;
pub mod predict;
pub mod restimate;
pub mod window;

pub use guard::Guard;
pub use model::{Automaton, State, StateId, Transition, START_STATE};
pub use normalize::{normalize_transitions, NormalizeReport, Normalized, RawModel, RawTransition};
pub use predict::{Predictions, Predictor};
pub use restimate::{restimate, RestimateSummary};
pub use window::{sliding_windows, window_count, window_size};
