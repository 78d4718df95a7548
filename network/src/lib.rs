#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # About Network
//!
//!
//! Leptos Network is a single-request helper for [Leptos](https://github.com/leptos-rs/leptos).
//!
//! It issues one network call per query, tracks its lifecycle and remembers successful
//! responses per query key, so that asking for the same key again skips the network.
//!
//! A Network query provides:
//! - a status state machine (`idle` → `loading` → `success` / `error`)
//! - `is_loading` / `is_fetching` flags
//! - per-instance response caching keyed by a query key
//! - timeout-driven cancellation
//! - refetching, guarded against overlapping calls
//!
//! ## The main entry points are:
//! - [`provide_network_client`](crate::provide_network_client()) - Provides the base URL and transport to the App.
//! - [`use_network`][crate::use_network::use_network()] - A hook for reading, caching, and refetching a request.
//!
//! # Feature Flags
//! - `csr` Client-side rendering: timers and tasks run on the browser event loop.
//! - `hydrate` Hydration: same as `csr`, for apps rendered on the server first.
//! - `ssr` Server-side rendering: timers and tasks run on tokio. Spawned work requires a
//!   tokio `LocalSet`, which the Leptos server integrations provide.
//!
//! One of these must be enabled. Without any of them requests never time out.
//!
//! # A Simple Example
//!
//! In the root of your App, provide a network client:
//!
//! ```rust
//! use leptos::*;
//! use leptos_network::*;
//!
//! #[component]
//! pub fn App() -> impl IntoView {
//!     // Provides the Network Client for the entire app.
//!     provide_network_client(NetworkConfig::new("https://jsonplaceholder.typicode.com"));
//!
//!     // Rest of App...
//! }
//! ```
//!
//! Then use the hook in any component:
//!
//! ```rust
//! use leptos::*;
//! use leptos_network::*;
//!
//! #[derive(Debug, Clone, serde::Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! struct Todo {
//!     user_id: u32,
//!     id: u32,
//!     title: String,
//!     completed: bool,
//! }
//!
//! #[component]
//! fn TodoView() -> impl IntoView {
//!     let NetworkResult {
//!         data,
//!         error,
//!         is_loading,
//!         refetch,
//!         ..
//!     } = use_network::<Todo>(|| NetworkOptions::new("todos/1", "test"));
//!
//!     view! {
//!         <div>
//!             <span>{move || if is_loading.get() { "Loading..." } else { "Loaded" }}</span>
//!             <span>{move || data.get().map(|todo| todo.title)}</span>
//!             <span>{move || error.get().map(|error| error.to_string())}</span>
//!             <button on:click=move |_| refetch()>"REFETCH"</button>
//!         </div>
//!     }
//! }
//! ```
//!

mod network_client;
mod network_config;
mod network_error;
mod network_executor;
mod network_options;
mod network_query;
mod network_result;
mod network_state;
mod response_cache;
/// The HTTP capability used by the executor.
pub mod transport;
mod use_network;
mod util;

pub use network_client::*;
pub use network_config::*;
pub use network_error::*;
pub use network_executor::*;
pub use network_options::*;
pub use network_query::*;
pub use network_result::*;
pub use network_state::*;
pub use response_cache::*;
pub use use_network::*;

/// Convenience trait for response payload requirements.
pub trait NetworkValue: std::fmt::Debug + Clone + serde::de::DeserializeOwned {}
impl<V> NetworkValue for V where V: std::fmt::Debug + Clone + serde::de::DeserializeOwned {}
