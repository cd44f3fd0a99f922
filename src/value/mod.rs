//! Keys, dynamic values and immutable snapshots.
//!
//! A [`Snapshot`] is a persistent keyed mapping: cloning it is cheap and every
//! "modification" produces a new snapshot that shares structure with the old
//! one, which stays valid and unchanged.

mod key;
mod snapshot;
mod value;

pub use key::Key;
pub use snapshot::Snapshot;
pub use value::Value;
