//! # planlens HTTP Server Module
//!
//! Serves plan analysis over HTTP with axum.
//!
//! # Endpoints
//!
//! - `POST /analyze` - Alternative plans for a query
//! - `GET /health` - Health check
//! - `GET /metrics` - Analysis counters

pub mod analyze_routes;
pub mod config;
pub mod observability_routes;
pub mod server;

pub use analyze_routes::{AnalyzeRequest, AnalyzeState, ErrorResponse};
pub use config::HttpServerConfig;
pub use server::HttpServer;
