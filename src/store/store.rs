use super::{Arg, StoreConfig, Update};
use crate::error::Result;
use crate::host::{CommitCallback, Host, Props};
use crate::value::{Key, Snapshot, Value};
use std::sync::Arc;

/// A store over a host's snapshot.
///
/// Reads go straight to the host's committed snapshot. Writes are handed to
/// the host as transitions, so a `get` right after an update inside a batch
/// still sees the previous value.
#[derive(Clone)]
pub struct Store {
    host: Arc<dyn Host>,
    config: StoreConfig,
}

impl Store {
    /// Bind a store to `host`, starting from an empty snapshot.
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self::with_config(host, Snapshot::new(), StoreConfig::default())
    }

    /// Bind a store to `host`, starting from `initial`.
    pub fn with_initial(host: Arc<dyn Host>, initial: Snapshot) -> Self {
        Self::with_config(host, initial, StoreConfig::default())
    }

    /// Bind a store to `host` with an explicit configuration.
    ///
    /// Installs `initial` as the host's `data` field, replacing whatever was
    /// there.
    pub fn with_config(host: Arc<dyn Host>, initial: Snapshot, config: StoreConfig) -> Self {
        tracing::debug!(keys = initial.len(), merge = ?config.merge, "store created");
        host.install(initial);
        Self { host, config }
    }

    /// Request an update, optionally running `on_commit` once it is committed.
    pub fn update(&self, update: Update, on_commit: Option<CommitCallback>) {
        tracing::debug!(
            kind = update.kind(),
            callback = on_commit.is_some(),
            "dispatching update"
        );
        self.host
            .set_state(update.into_transition(self.config.merge), on_commit);
    }

    /// Dispatch an untyped argument list.
    ///
    /// Fails before anything reaches the host when the arguments are neither a
    /// mapping, a function, nor a key/value pair.
    pub fn update_args(&self, args: Vec<Arg>) -> Result<()> {
        let (update, on_commit) = Update::from_args(args).map_err(|err| {
            tracing::warn!(%err, "rejected update");
            err
        })?;
        self.update(update, on_commit);
        Ok(())
    }

    /// Overlay `mapping` onto the snapshot.
    pub fn merge(&self, mapping: Snapshot) {
        self.update(Update::Merge(mapping), None);
    }

    /// Like [`Store::merge`], running `on_commit` once committed.
    pub fn merge_then<C>(&self, mapping: Snapshot, on_commit: C)
    where
        C: FnOnce() + Send + 'static,
    {
        self.update(Update::Merge(mapping), Some(Box::new(on_commit)));
    }

    /// Replace the snapshot with `f(current, props)`.
    pub fn apply<F>(&self, f: F)
    where
        F: FnOnce(&Snapshot, &Props) -> Snapshot + Send + 'static,
    {
        self.update(Update::apply(f), None);
    }

    /// Like [`Store::apply`], running `on_commit` once committed.
    pub fn apply_then<F, C>(&self, f: F, on_commit: C)
    where
        F: FnOnce(&Snapshot, &Props) -> Snapshot + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        self.update(Update::apply(f), Some(Box::new(on_commit)));
    }

    /// Set a single key.
    pub fn set(&self, key: impl Into<Key>, value: impl Into<Value>) {
        self.update(Update::set(key, value), None);
    }

    /// Like [`Store::set`], running `on_commit` once committed.
    pub fn set_then<C>(&self, key: impl Into<Key>, value: impl Into<Value>, on_commit: C)
    where
        C: FnOnce() + Send + 'static,
    {
        self.update(Update::set(key, value), Some(Box::new(on_commit)));
    }

    /// Get the value stored under `key`, if any.
    pub fn get(&self, key: impl Into<Key>) -> Option<Value> {
        self.host.snapshot().get(&key.into()).cloned()
    }

    /// The host's current snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.host.snapshot()
    }

    /// The host this store is bound to.
    pub fn host(&self) -> &Arc<dyn Host> {
        &self.host
    }

    /// The configuration the store was created with.
    pub fn config(&self) -> StoreConfig {
        self.config
    }
}
