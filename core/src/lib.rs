//! Core of the posts list/detail view.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and drives the list/detail
//! navigation through `ViewCoordinator`. A host (mobile shell through the C
//! ABI, the terminal client, a test) executes the returned effects and feeds
//! outcomes back.
//!
//! # Design
//! - `PostsClient` is stateless and holds only `base_url`.
//! - `ViewCoordinator` is single-threaded and never blocks; stale and
//!   cancelled responses are filtered by `RequestToken`.
//! - Fetch failures are recovered where they happen: logged with `tracing`
//!   and recorded in state, never panicked on.

pub mod client;
pub mod config;
pub mod coordinator;
pub mod effect;
pub mod error;
pub mod http;
pub mod projection;
pub mod types;
pub mod view;

pub use client::PostsClient;
pub use config::{ClientConfig, CoordinatorConfig};
pub use coordinator::{CollectionState, DetailActivation, Resolution, ViewCoordinator};
pub use effect::{CancelHandle, Effect, RequestToken};
pub use error::{FetchError, NavigationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use projection::LabelCache;
pub use types::Post;
pub use view::{ListEntry, View};
