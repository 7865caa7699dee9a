//! relaunch_audit library: website audit engine for relaunch projects.
//!
//! This library provides the audit engine behind the relaunch checklist UI:
//! four network-probing checks (HTTPS, SEO files, meta tags, redirect
//! hygiene) plus the axum API server that exposes them.
//!
//! # Example
//!
//! ```no_run
//! use relaunch_audit::{run_server, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     port: 4321,
//!     ..Default::default()
//! };
//! run_server(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! The checks can also be invoked directly, without the HTTP surface:
//!
//! ```no_run
//! use relaunch_audit::audit::{check_https, AuditContext};
//! use relaunch_audit::initialization::init_probe_client;
//! use relaunch_audit::config::DEFAULT_USER_AGENT;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = AuditContext::new(init_probe_client(DEFAULT_USER_AGENT)?);
//! let report = check_https(&ctx, "example.com").await?;
//! println!("{:?}", report.recommendations);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod audit;
pub mod config;
pub mod error_handling;
pub mod initialization;
mod parse;
pub mod server;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::AuditError;
pub use server::{build_router, run_server};
