//! manila-conformance: conformance toolkit for the OpenStack shared file
//! systems (Manila) API
//!
//! This library provides a microversion-aware client for the share API and
//! the polling helpers conformance tests need to wait out the service's
//! asynchronous state transitions.
//!
//! # Architecture
//!
//! - **Transport**: sends one HTTP request and returns the raw response. The
//!   reqwest-backed `HttpTransport` talks to a live service; the
//!   `ScriptedTransport` replays canned responses for offline tests.
//! - **Client**: `SharesClient` translates operations into requests at one
//!   API microversion, picking legacy or current wire shapes from the
//!   version tables in `policy`, and validates every response against the
//!   operation's documented success status.
//! - **Waiter**: polls a resource at a fixed interval until it reaches an
//!   accepted state, enters an error state or runs out of time.
//! - **Roles**: `ClientManager` builds one client per configured persona
//!   (admin, member, alt_member, reader).
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use manila_conformance::config::Config;
//! use manila_conformance::client::NewShare;
//! use manila_conformance::resource::ResourceKind;
//! use manila_conformance::roles::{ClientManager, Role};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_file("manila.yaml".as_ref())?;
//! config.validate()?;
//!
//! let manager = ClientManager::new(Arc::new(config))?;
//! let client = manager.client(Role::Member)?;
//!
//! let share = client.create_share(&NewShare::new("nfs", 1)).await?.resource("share")?;
//! let waiter = manager.waiter(Role::Member)?;
//! waiter
//!     .wait_for_status(ResourceKind::Share, share.id()?, &["available"])
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod env;
pub mod error;
pub mod policy;
pub mod resource;
pub mod roles;
pub mod skip;
pub mod transport;
pub mod version;
pub mod waiter;

pub use client::{ApiResponse, Resource, SharesClient};
pub use error::{ClientError, Result};
pub use version::ApiVersion;
pub use waiter::{WaitError, Waiter};
