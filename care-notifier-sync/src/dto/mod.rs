mod mutation_outcome;
mod notification;
mod notifications_list;
mod notifications_view;

pub use mutation_outcome::*;
pub use notification::*;
pub use notifications_list::*;
pub use notifications_view::*;
