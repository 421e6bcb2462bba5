//! Blog Generator
//!
//! This crate serves a single-page form that turns a topic, an audience and a
//! word count into a blog post written by a local quantized llama model.
//!
//! # Modules
//! - `controller`: Handles HTTP requests for the form page and the JSON API
//! - `entities`: Defines core data structures and the `Model` trait
//! - `error`: Provides error handling and custom error types
//! - `middleware`: Request logging and error conversion
//! - `routes`: Defines endpoints and routing
//! - `service`: Prompt building, model loading and post-processing
//! - `utils`: Configuration, startup and the background asset fetcher
//!
//! # Examples
//! ```no_run
//! use actix_web::{web, App, HttpServer};
//! use blog_generator::routes::route;
//! use blog_generator::utils::config::AppConfig;
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = AppConfig::load("config/app.yml").expect("config");
//!     let state = route::AppState::new(config.into(), None);
//!     HttpServer::new(move || App::new().configure(route::configure(state.clone())))
//!         .bind("127.0.0.1:8080")?
//!         .run()
//!         .await
//! }
//! ```

#[macro_use]
extern crate rust_i18n;

i18n!("locales", fallback = "en");

pub mod controller;
pub mod entities;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod utils;

pub use error::AppError;
pub use utils::AppConfig;
