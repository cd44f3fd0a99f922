//! Hosts own the state a [`Store`](crate::Store) manages.
//!
//! A host keeps the current snapshot in its `data` state field and decides
//! when a requested transition is committed. [`Component`] is the host used by
//! [`Provider`](crate::Provider); anything else implementing [`Host`] can stand
//! in for it.

mod component;

pub use component::Component;

use crate::value::Snapshot;

/// Name of the host state field holding the snapshot.
pub const DATA_FIELD: &str = "data";

/// Computes the next snapshot from the previous one and the host's props.
pub type Transition = Box<dyn FnOnce(&Snapshot, &Props) -> Snapshot + Send>;

/// Runs once the transition it accompanied has been committed.
pub type CommitCallback = Box<dyn FnOnce() + Send>;

/// Properties a host passes to every transition.
///
/// `global` is the provider-wide side mapping; transitions may read it but
/// there is no way to write it through a store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Props {
    pub own: Snapshot,
    pub global: Snapshot,
}

impl Props {
    pub fn new(own: Snapshot, global: Snapshot) -> Self {
        Self { own, global }
    }
}

/// The state-update contract a store relies on.
pub trait Host: Send + Sync {
    /// Replace the `data` field outright. Used once, at store construction.
    fn install(&self, initial: Snapshot);

    /// The snapshot currently committed in the `data` field.
    fn snapshot(&self) -> Snapshot;

    /// The props transitions are evaluated against.
    fn props(&self) -> Props;

    /// Request a state replacement.
    ///
    /// The host may commit immediately or defer and batch; `on_commit` runs
    /// after the resulting snapshot is committed.
    fn set_state(&self, transition: Transition, on_commit: Option<CommitCallback>);
}
