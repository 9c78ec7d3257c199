//! Inkwell Admin
//!
//! Headless admin dashboard for the Inkwell blog platform: an API client,
//! self-contained status and toggle widgets, the pages built from them, and
//! the navigation shell. Views are plain state objects; [`render`] turns
//! them into text for the `inkwell-admin` command.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod api_client;
pub mod backend;
pub mod error;
pub mod mock;
pub mod pages;
pub mod render;
pub mod shell;
pub mod state;
pub mod widgets;

// Re-export the main types
pub use api_client::ApiClient;
pub use backend::AdminBackend;
pub use error::{ApiError, ApiResult};
pub use shell::{Route, Shell};
pub use state::{RequestState, RequestStatus, Ticket};
