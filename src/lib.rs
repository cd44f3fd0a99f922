//! # Snapstore
//!
//! Immutable snapshot stores for component-style UIs.
//!
//! State lives in a host component as a persistent keyed [`Snapshot`]. A
//! [`Store`] reads that snapshot and routes every write through the host's
//! own state-update mechanism, so the host stays in charge of when changes
//! are committed and re-rendered.
//!
//! ## Store
//!
//! - `merge` overlays a mapping (deep by default, see [`MergePolicy`])
//! - `apply` replaces the snapshot with the result of a function
//! - `set` changes a single key
//! - `get` reads a key from the committed snapshot
//!
//! Every form accepts a callback that runs once the update is committed.
//!
//! ## Provider
//!
//! A [`Provider`] owns a [`Component`] host plus the one store bound to it,
//! and hands that store to a render function.
//!
//! ```
//! use snapstore::{snapshot, Provider, ProviderProps, Value};
//!
//! let provider = Provider::new(
//!     ProviderProps::new(|store| store.get("count")).initial_value(snapshot! { "count" => 10 }),
//! );
//!
//! let store = provider.store();
//! store.set("count", 11);
//! assert_eq!(provider.render().into_children(), Some(Value::Int(11)));
//! ```

pub mod error;
pub mod host;
pub mod provider;
pub mod store;
pub mod value;

// Re-export main types for convenience
pub use error::{Result, StoreError};
pub use host::{CommitCallback, Component, Host, Props, Transition, DATA_FIELD};
pub use provider::{Fragment, Provider, ProviderProps};
pub use store::{Arg, MergePolicy, Store, StoreConfig, Update};
pub use value::{Key, Snapshot, Value};
