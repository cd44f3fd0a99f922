//! Integration tests for Snapstore

use parking_lot::Mutex;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use snapstore::{
    snapshot, Arg, Component, Host, MergePolicy, Props, Provider, ProviderProps, Snapshot, Store,
    StoreConfig, StoreError, Value, DATA_FIELD,
};

/// Stand-in for a rendered view: the text of the count paragraph.
fn count_view(store: &Store) -> String {
    let count = store.get("count").and_then(|v| v.as_i64()).unwrap_or_default();
    format!("<p>The count is {count}</p>")
}

fn increase(store: &Store) {
    let count = store.get("count").and_then(|v| v.as_i64()).unwrap_or_default();
    store.set("count", count + 1);
}

fn decrease(store: &Store) {
    let count = store.get("count").and_then(|v| v.as_i64()).unwrap_or_default();
    store.merge(snapshot! { "count" => count - 1 });
}

fn mounted_counter() -> Arc<Provider<String>> {
    Arc::new(Provider::new(
        ProviderProps::new(count_view).initial_value(snapshot! { "count" => 10 }),
    ))
}

#[test]
fn buttons_change_provider_state() {
    let provider = mounted_counter();
    let data = || provider.host().state(DATA_FIELD).unwrap_or_default();

    assert_eq!(data().get(&"count".into()), Some(&Value::Int(10)));

    provider.host().batch(|| increase(provider.store()));
    assert_eq!(data().get(&"count".into()), Some(&Value::Int(11)));

    provider.host().batch(|| decrease(provider.store()));
    assert_eq!(data().get(&"count".into()), Some(&Value::Int(10)));
}

#[test]
fn view_follows_commits() {
    let provider = mounted_counter();
    let views = Arc::new(Mutex::new(vec![provider.render().into_children()]));

    let sink = Arc::clone(&views);
    provider.rerender_on_commit(move |fragment| sink.lock().push(fragment.into_children()));

    provider.host().batch(|| increase(provider.store()));

    assert_eq!(
        *views.lock(),
        vec!["<p>The count is 10</p>", "<p>The count is 11</p>"]
    );
}

#[test]
fn batched_handler_reads_previous_snapshot() {
    let provider = mounted_counter();
    let store = provider.store();

    provider.host().batch(|| {
        increase(store);
        // Not committed yet, so this reads 10 again.
        increase(store);
        assert_eq!(store.get("count"), Some(Value::Int(10)));
    });

    assert_eq!(store.get("count"), Some(Value::Int(11)));
    assert_eq!(provider.host().commits(), 1);
}

#[test]
fn functional_updates_compose_inside_a_batch() {
    let provider = mounted_counter();
    let store = provider.store();

    provider.host().batch(|| {
        for _ in 0..3 {
            store.apply(|state, _| {
                let count = state.get(&"count".into()).and_then(Value::as_i64).unwrap_or(0);
                state.update("count", count + 1)
            });
        }
    });

    assert_eq!(store.get("count"), Some(Value::Int(13)));
}

#[test]
fn apply_replaces_the_snapshot() {
    let store = Store::with_initial(
        Arc::new(Component::default()),
        snapshot! { "a" => 1, "b" => 2 },
    );

    store.apply(|_, _| snapshot! { "c" => 3 });

    assert_eq!(store.snapshot(), snapshot! { "c" => 3 });
    assert_eq!(store.get("a"), None);
}

#[test]
fn set_keeps_other_entries_shared() {
    let store = Store::with_initial(
        Arc::new(Component::default()),
        snapshot! { "name" => "ada", "count" => 1 },
    );
    let before = store.get("name");

    store.set("count", 2);

    match (before, store.get("name")) {
        (Some(Value::Str(a)), Some(Value::Str(b))) => assert!(Arc::ptr_eq(&a, &b)),
        other => panic!("unexpected values: {other:?}"),
    }
}

#[test]
fn old_snapshots_stay_valid() {
    let store = Store::with_initial(Arc::new(Component::default()), snapshot! { "count" => 10 });
    let before = store.snapshot();

    store.set("count", 11);
    store.merge(snapshot! { "extra" => true });

    assert_eq!(before, snapshot! { "count" => 10 });
    assert_eq!(store.snapshot(), snapshot! { "count" => 11, "extra" => true });
}

#[test]
fn untyped_dispatch() {
    let store = Store::new(Arc::new(Component::default()));
    let committed = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&committed);
    store
        .update_args(vec![
            Arg::value(""),
            Arg::value("empty key"),
            Arg::callback(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        ])
        .unwrap();
    store.update_args(vec![Arg::value(false), Arg::value(0)]).unwrap();
    store
        .update_args(vec![Arg::function(|state: &Snapshot, _: &Props| {
            state.update(0, "zero")
        })])
        .unwrap();

    assert_eq!(
        store.snapshot(),
        snapshot! { "" => "empty key", false => 0, 0 => "zero" }
    );
    assert_eq!(committed.load(Ordering::SeqCst), 1);

    let err = store.update_args(vec![]).unwrap_err();
    assert!(matches!(err, StoreError::InvalidUpdateArguments { .. }));
}

#[test]
fn shallow_provider() {
    let provider = Provider::new(
        ProviderProps::new(|store: &Store| store.get("a"))
            .config(StoreConfig::default().merge_policy(MergePolicy::Shallow))
            .initial_value(snapshot! { "a" => snapshot! { "x" => 1 } }),
    );

    provider.store().merge(snapshot! { "a" => snapshot! { "y" => 2 } });

    assert_eq!(
        provider.render().into_children(),
        Some(Value::Map(snapshot! { "y" => 2 }))
    );
}

#[test]
fn own_props_reach_update_functions() {
    let host = Arc::new(Component::default());
    let store = Store::new(host.clone());
    host.set_props(snapshot! { "label" => "clicks" });

    store.apply(|state, props| {
        let label = props.own.get(&"label".into()).cloned().unwrap_or_default();
        state.update("label", label)
    });

    assert_eq!(store.get("label"), Some(Value::from("clicks")));
    assert_eq!(host.props().global, Snapshot::new());
}
