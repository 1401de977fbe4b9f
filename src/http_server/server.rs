//! # HTTP Server
//!
//! Binds the quote router and serves it until a shutdown signal arrives.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::config::HttpServerConfig;
use super::quote_routes::{quote_routes, QuotesState};
use crate::observability::Logger;
use crate::service::QuoteService;

/// HTTP Server for the quote service
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
    logger: Arc<Logger>,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, service: QuoteService, logger: Arc<Logger>) -> Self {
        let router = Self::build_router(&config, service);
        Self {
            config,
            router,
            logger,
        }
    }

    /// Build the router with all endpoints
    pub fn build_router(config: &HttpServerConfig, service: QuoteService) -> Router {
        let state = Arc::new(QuotesState::new(service));

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

        Router::new().merge(quote_routes(state)).layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests.
    pub async fn start<F>(self, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(addr.as_str()).await?;

        let local = listener.local_addr()?.to_string();
        self.logger.info("SERVER_LISTENING", &[("addr", local.as_str())]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        self.logger.info("SERVER_STOPPED", &[]);
        Ok(())
    }
}

/// Resolves on Ctrl-C or when a line (Enter) is read from stdin.
pub async fn shutdown_signal(logger: Arc<Logger>) {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            // No signal handler available; rely on stdin.
            std::future::pending::<()>().await;
        }
    };

    let enter = async {
        let mut line = String::new();
        let mut stdin = BufReader::new(tokio::io::stdin());
        match stdin.read_line(&mut line).await {
            // Closed stdin (e.g. running detached) must not stop the server.
            Ok(0) | Err(_) => std::future::pending::<()>().await,
            Ok(_) => {}
        }
    };

    println!("Press Enter to stop the server");

    tokio::select! {
        _ = ctrl_c => logger.info("SHUTDOWN_SIGNAL", &[("source", "ctrl_c")]),
        _ = enter => logger.info("SHUTDOWN_SIGNAL", &[("source", "stdin")]),
    }
}
