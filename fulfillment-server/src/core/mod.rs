//! Core module - server configuration, state and error definitions
//!
//! # Module Structure
//!
//! - [`Config`] - server configuration
//! - [`ServerState`] - server state
//! - [`Server`] - HTTP server
//! - [`ServerError`] - server error

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::{Config, ShopConfig, SmtpConfig};
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
