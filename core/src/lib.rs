//! Synchronous client SDK for the fundraising pages API.
//!
//! # Overview
//! `PageApi` maps page operations (registration, retrieval, story, media,
//! updates, attribution, donations) onto HTTP verbs and resource paths.
//! Requests travel through an `HttpChannel`, which negotiates the wire
//! format (JSON or XML), attaches credentials and the optional domain
//! header, and turns non-2xx responses into typed `ApiError` values.
//!
//! # Design
//! - Every operation has a pure `build_*` counterpart, so request shapes can
//!   be checked without network I/O.
//! - The round-trip is delegated to a `Transport`; `UreqTransport` is the
//!   default, tests substitute fakes.
//! - One `ClientConfig` per deployment, passed explicitly; no global state.
//!
//! ```no_run
//! use fundraising_core::{ClientConfig, PageApi, WireFormat};
//!
//! let config = ClientConfig::new("http://localhost:3000", "app-key")
//!     .with_format(WireFormat::Xml)
//!     .with_credentials("someone@example.org", "password");
//! let pages = PageApi::from_config(&config)?;
//! let page = pages.retrieve("walk-for-life")?;
//! println!("{} raised {}", page.page_title, page.total_raised_online);
//! # Ok::<(), fundraising_core::ApiError>(())
//! ```

pub mod channel;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod http;
pub mod types;

pub use channel::HttpChannel;
pub use client::PageApi;
pub use config::{ClientConfig, Credentials};
pub use error::ApiError;
pub use format::WireFormat;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use types::*;
