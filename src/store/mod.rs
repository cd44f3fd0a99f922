//! Snapshot stores.
//!
//! A [`Store`] never owns state itself. It reads the snapshot out of its host
//! and turns every [`Update`] into a transition the host commits on its own
//! schedule.

mod config;
mod store;
mod update;

pub use config::{MergePolicy, StoreConfig};
pub use store::Store;
pub use update::{Arg, Update, UpdateFn};
