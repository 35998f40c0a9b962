//! Application services (use cases).
//!
//! The detection engine lives here as a set of pure functions (normalize,
//! resolve, hedge, buffer, mismatch, evaluate) composed by the [`Scanner`],
//! which is the only part that talks to a port.

mod buffer;
mod evaluator;
mod hedge;
mod mismatch;
pub mod normalize;
mod resolver;
mod scanner;

pub use buffer::apply_buffer;
pub use evaluator::{classify, evaluate, is_alert, Signal};
pub use hedge::{compute_hedge, select_outcome};
pub use mismatch::check_mismatch;
pub use normalize::NormalizerRegistry;
pub use resolver::resolve;
pub use scanner::{CycleReport, Scanner};
