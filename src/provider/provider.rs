use crate::host::{Component, Props};
use crate::store::{Store, StoreConfig};
use crate::value::Snapshot;
use std::sync::Arc;

/// Renders a view from a store.
pub type RenderFn<R> = Box<dyn Fn(&Store) -> R + Send + Sync>;

/// A non-visual grouping container around rendered output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment<R> {
    children: R,
}

impl<R> Fragment<R> {
    pub fn new(children: R) -> Self {
        Self { children }
    }

    pub fn children(&self) -> &R {
        &self.children
    }

    pub fn into_children(self) -> R {
        self.children
    }
}

/// Construction properties for a [`Provider`].
pub struct ProviderProps<R> {
    initial_value: Snapshot,
    global_props: Snapshot,
    config: StoreConfig,
    render: RenderFn<R>,
}

impl<R> ProviderProps<R> {
    pub fn new<F>(render: F) -> Self
    where
        F: Fn(&Store) -> R + Send + Sync + 'static,
    {
        Self {
            initial_value: Snapshot::new(),
            global_props: Snapshot::new(),
            config: StoreConfig::default(),
            render: Box::new(render),
        }
    }

    pub fn initial_value(mut self, initial_value: Snapshot) -> Self {
        self.initial_value = initial_value;
        self
    }

    /// Read-only side mapping handed to every update function as `props.global`.
    pub fn global_props(mut self, global_props: Snapshot) -> Self {
        self.global_props = global_props;
        self
    }

    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }
}

/// Owns exactly one [`Store`] and exposes it to a render function.
///
/// # Examples
///
/// ```
/// use snapstore::{snapshot, Provider, ProviderProps};
///
/// let provider = Provider::new(
///     ProviderProps::new(|store| format!("The count is {:?}", store.get("count")))
///         .initial_value(snapshot! { "count" => 10 }),
/// );
///
/// provider.store().set("count", 11);
/// assert_eq!(
///     provider.render().into_children(),
///     "The count is Some(Int(11))"
/// );
/// ```
pub struct Provider<R> {
    host: Arc<Component>,
    store: Store,
    render: RenderFn<R>,
}

impl<R> Provider<R> {
    pub fn new(props: ProviderProps<R>) -> Self {
        let ProviderProps {
            initial_value,
            global_props,
            config,
            render,
        } = props;

        let host = Arc::new(Component::new(Props::new(Snapshot::new(), global_props)));
        let store = Store::with_config(host.clone(), initial_value, config);
        Self {
            host,
            store,
            render,
        }
    }

    /// Render with the current store.
    pub fn render(&self) -> Fragment<R> {
        Fragment::new((self.render)(&self.store))
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn host(&self) -> &Arc<Component> {
        &self.host
    }
}

impl<R: 'static> Provider<R> {
    /// Re-render after every commit, handing each fragment to `sink`.
    ///
    /// The subscription holds the provider weakly; once the last `Arc` is
    /// dropped it stops rendering.
    pub fn rerender_on_commit<F>(self: &Arc<Self>, sink: F)
    where
        F: Fn(Fragment<R>) + Send + Sync + 'static,
    {
        let provider = Arc::downgrade(self);
        self.host.subscribe(move |_| {
            if let Some(provider) = provider.upgrade() {
                sink(provider.render());
            }
        });
    }
}
