use super::{CommitCallback, Host, Props, Transition, DATA_FIELD};
use crate::value::Snapshot;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

type Subscriber = Arc<dyn Fn(&Snapshot) + Send + Sync>;

struct ComponentState {
    data: Snapshot,
    props: Props,
    batch_depth: usize,
    flushing: bool,
    pending: Vec<(Transition, Option<CommitCallback>)>,
}

/// A host component with batched state updates.
///
/// Outside [`Component::batch`] every `set_state` commits immediately. Inside
/// a batch, transitions queue up and are committed in order when the
/// outermost batch returns, each one seeing the result of the previous. A
/// commit pass then runs the queued commit callbacks and notifies subscribers
/// once with the new snapshot.
///
/// No lock is held while transitions, callbacks or subscribers run, so any of
/// them may call back into the component.
pub struct Component {
    state: Mutex<ComponentState>,
    subscribers: RwLock<Vec<Subscriber>>,
    commits: AtomicUsize,
}

impl Component {
    /// Create a component with the given props and an empty snapshot.
    pub fn new(props: Props) -> Self {
        Self {
            state: Mutex::new(ComponentState {
                data: Snapshot::new(),
                props,
                batch_depth: 0,
                flushing: false,
                pending: Vec::new(),
            }),
            subscribers: RwLock::new(Vec::new()),
            commits: AtomicUsize::new(0),
        }
    }

    /// Read a state field by name. Only [`DATA_FIELD`] exists.
    pub fn state(&self, field: &str) -> Option<Snapshot> {
        (field == DATA_FIELD).then(|| self.state.lock().data.clone())
    }

    /// Replace the component's own props. Later transitions see them.
    pub fn set_props(&self, own: Snapshot) {
        self.state.lock().props.own = own;
    }

    /// Number of commit passes so far.
    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    /// Number of transitions waiting for the current batch to end.
    pub fn pending(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Subscribe to commits.
    ///
    /// The callback receives the committed snapshot after every commit pass.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        self.subscribers.write().push(Arc::new(callback));
    }

    /// Run `f` with state updates deferred until it returns.
    ///
    /// Batches nest; only the outermost one commits. If `f` panics the queued
    /// transitions are discarded and the panic is resumed.
    pub fn batch<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        self.state.lock().batch_depth += 1;
        tracing::trace!("batch opened");

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

        let outermost = {
            let mut state = self.state.lock();
            state.batch_depth -= 1;
            if result.is_err() && state.batch_depth == 0 {
                state.pending.clear();
            }
            state.batch_depth == 0
        };

        match result {
            Ok(r) => {
                if outermost {
                    self.flush();
                }
                r
            }
            Err(e) => std::panic::resume_unwind(e),
        }
    }

    /// Commit everything queued so far.
    ///
    /// If a transition, callback or subscriber panics, the flush is abandoned:
    /// anything still queued is discarded, the component accepts updates
    /// again, and the panic is resumed.
    fn flush(&self) {
        {
            let mut state = self.state.lock();
            if state.flushing {
                return;
            }
            state.flushing = true;
        }

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| self.drain()));

        let mut state = self.state.lock();
        state.flushing = false;
        if let Err(e) = result {
            let dropped = state.pending.len();
            state.pending.clear();
            drop(state);
            tracing::warn!(dropped, "flush panicked, queued transitions discarded");
            std::panic::resume_unwind(e);
        }
    }

    fn drain(&self) {
        loop {
            let (pending, mut data, props) = {
                let mut state = self.state.lock();
                if state.pending.is_empty() {
                    return;
                }
                (
                    std::mem::take(&mut state.pending),
                    state.data.clone(),
                    state.props.clone(),
                )
            };

            let transitions = pending.len();
            let mut callbacks = Vec::new();
            for (transition, on_commit) in pending {
                data = transition(&data, &props);
                callbacks.extend(on_commit);
            }

            self.state.lock().data = data.clone();
            self.commits.fetch_add(1, Ordering::SeqCst);
            tracing::debug!(
                transitions,
                callbacks = callbacks.len(),
                keys = data.len(),
                "state committed"
            );

            for callback in callbacks {
                callback();
            }
            self.notify(&data);
        }
    }

    fn notify(&self, data: &Snapshot) {
        let subscribers = self.subscribers.read().clone();
        for subscriber in subscribers.iter() {
            subscriber(data);
        }
    }
}

impl Default for Component {
    fn default() -> Self {
        Self::new(Props::default())
    }
}

impl Host for Component {
    fn install(&self, initial: Snapshot) {
        self.state.lock().data = initial;
    }

    fn snapshot(&self) -> Snapshot {
        self.state.lock().data.clone()
    }

    fn props(&self) -> Props {
        self.state.lock().props.clone()
    }

    fn set_state(&self, transition: Transition, on_commit: Option<CommitCallback>) {
        let commit_now = {
            let mut state = self.state.lock();
            state.pending.push((transition, on_commit));
            state.batch_depth == 0 && !state.flushing
        };
        if commit_now {
            self.flush();
        }
    }
}
