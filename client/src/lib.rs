//! Deterministic client core for a single-list todo manager.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and reconciles the cached
//! todo list through a pure view-state reducer. The caller executes the
//! actual HTTP round-trips, making the whole core deterministic and
//! testable without a server or a rendering environment.
//!
//! # Design
//! - `TodoApi` is stateless — it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `ViewState` owns the list, the pending input text, the loading flag,
//!   and the visible error message; feeding it an `Event` returns the
//!   `Command` the host should run next, if any.
//! - The server is the source of truth: the reducer only ever applies
//!   server-returned values, never locally computed ones.

pub mod api;
pub mod error;
pub mod http;
pub mod types;
pub mod view;

pub use api::TodoApi;
pub use error::{ApiError, Operation};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreateTodo, Todo, UpdateTodo};
pub use view::{Command, Event, ViewState};
