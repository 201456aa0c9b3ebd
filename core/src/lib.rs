//! Async client store for the todo service.
//!
//! # Overview
//! `TodoClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern). A `Transport`
//! performs the round-trip, and `TodoStore` layers a reactive local mirror of
//! the remote collection on top of the two.
//!
//! # Design
//! - `TodoClient` is stateless, it holds only the resource base URL.
//! - Each endpoint is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit and testable.
//! - `TodoStore` is constructed explicitly with its transport injected; there
//!   is no global instance.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod store;
pub mod transport;
pub mod types;

pub use client::TodoClient;
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::{Action, StoreState, TodoStore};
pub use transport::{ReqwestTransport, Transport};
pub use types::{CreateTodo, PageQuery, StatusFilter, Todo, TodoId, TodoPage, UpdateTodo};
