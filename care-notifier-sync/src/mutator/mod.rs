mod compensation;
mod in_flight;
mod optimistic_mutator;
mod sync_state;

pub use optimistic_mutator::*;
pub(crate) use sync_state::*;
