//! Counter application driven through a Provider.
//!
//! Run with `RUST_LOG=snapstore=debug` to see dispatch and commit logs.

use snapstore::{snapshot, Arg, Provider, ProviderProps, Store, Value};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn count(store: &Store) -> i64 {
    store.get("count").and_then(|v| v.as_i64()).unwrap_or_default()
}

fn view(store: &Store) -> String {
    format!("<p>The count is {}</p>", count(store))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Counter Provider ===\n");

    let provider = Arc::new(Provider::new(
        ProviderProps::new(view)
            .initial_value(snapshot! { "count" => 10 })
            .global_props(snapshot! { "step" => 5 }),
    ));
    provider.rerender_on_commit(|fragment| println!("   [render] {}", fragment.children()));

    println!("Initial: {}", provider.render().children());
    let store = provider.store();

    println!("\nIncrease (key/value)");
    provider.host().batch(|| store.set("count", count(store) + 1));

    println!("\nDecrease (mapping)");
    provider
        .host()
        .batch(|| store.merge(snapshot! { "count" => count(store) - 1 }));

    println!("\nJump by the global step (function)");
    store.apply_then(
        |state, props| {
            let step = props.global.get(&"step".into()).and_then(Value::as_i64).unwrap_or(1);
            let count = state.get(&"count".into()).and_then(Value::as_i64).unwrap_or(0);
            state.update("count", count + step)
        },
        || println!("   [commit] step applied"),
    );

    println!("\nUntyped call with no arguments");
    if let Err(err) = store.update_args(Vec::<Arg>::new()) {
        println!("   [error] {err}");
    }

    println!("\nFinal snapshot: {:?}", store.snapshot());
}
