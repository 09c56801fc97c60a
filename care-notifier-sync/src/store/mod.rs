mod notification_store;
mod store_snapshot;

pub use notification_store::*;
pub use store_snapshot::*;
