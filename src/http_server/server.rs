//! # HTTP Server
//!
//! Combines the analysis and observability routers behind a CORS layer.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::analyze_routes::{analyze_routes, AnalyzeState};
use super::config::HttpServerConfig;
use super::observability_routes::observability_routes;
use crate::analysis::PlanAnalyzer;
use crate::observability::{Event, Logger};
use crate::session::SessionProvider;

/// HTTP Server for plan analysis
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server with default configuration
    pub fn new(provider: Arc<dyn SessionProvider>, analyzer: PlanAnalyzer) -> Self {
        Self::with_config(HttpServerConfig::default(), provider, analyzer)
    }

    /// Create a server with custom configuration
    pub fn with_config(
        config: HttpServerConfig,
        provider: Arc<dyn SessionProvider>,
        analyzer: PlanAnalyzer,
    ) -> Self {
        let router = Self::build_router(&config, provider, analyzer);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(
        config: &HttpServerConfig,
        provider: Arc<dyn SessionProvider>,
        analyzer: PlanAnalyzer,
    ) -> Router {
        let metrics = Arc::clone(analyzer.metrics());
        let analyze_state = Arc::new(AnalyzeState::new(provider, analyzer));

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(analyze_routes(analyze_state))
            .merge(observability_routes(metrics))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let bound = listener.local_addr()?.to_string();
        Logger::info(Event::ServerStart.as_str(), &[("addr", bound.as_str())]);

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
