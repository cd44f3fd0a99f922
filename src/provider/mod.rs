//! Providers own a host component and the store bound to it.

mod provider;

pub use provider::{Fragment, Provider, ProviderProps, RenderFn};
