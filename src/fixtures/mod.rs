mod mutate;
mod seed;
mod snapshot;
mod teardown;

pub use mutate::update_object;
pub use seed::fill_collection;
pub use snapshot::{collection_snapshot, object_snapshot};
pub use teardown::{flush_database, remove_collections};
