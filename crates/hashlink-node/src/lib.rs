//! # hashlink-node: HTTP node
//!
//! Serves one Hashlink chain over HTTP.
//!
//! ## Routes
//!
//! - `GET  /`  the full chain, pretty-printed JSON
//! - `POST /`  submit a mined and signed candidate record
//! - `POST /mine`  have the node mine, sign and append a payload
//! - `GET  /public-key`  the process public key (SPKI PEM)
//!
//! ## Startup
//!
//! The signing identity is generated before the listener opens; failure
//! aborts the process. Genesis is mined concurrently with serving, and
//! requests that arrive first get `503 chain not yet initialized`.
//!
//! ## Middleware Stack (Tower)
//!
//! TraceLayer → TimeoutLayer → RequestBodyLimitLayer

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use config::NodeConfig;
pub use error::AppError;
pub use state::AppState;
