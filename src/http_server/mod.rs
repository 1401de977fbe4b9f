//! # Quote HTTP Server Module
//!
//! Axum adapter over the quote service. Owns routing, request parsing and
//! status codes; the store never sees any of it.
//!
//! # Endpoints
//!
//! - `POST /quotes` - Add a quote
//! - `GET /quotes` - List quotes (`?author=` to filter)
//! - `GET /quotes/random` - Random quote
//! - `DELETE /quotes/:id` - Delete a quote

pub mod config;
pub mod quote_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::{shutdown_signal, HttpServer};
