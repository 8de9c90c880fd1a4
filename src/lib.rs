//! MapLink - client SDK for hosted map instantiation services
//!
//! This library keeps client-side state for map layers and dataviews,
//! serializes that state into an instantiation request, sends it to a
//! windshaft-style maps API, and reconciles the server response back into
//! the local models that drive rendering and UI widgets.
//!
//! # High-Level API
//!
//! The [`engine`] module provides the orchestration facade:
//!
//! ```ignore
//! use maplink::config::EngineSettings;
//! use maplink::engine::{Engine, EngineEvent};
//! use maplink::maps::ReqwestMapsClient;
//! use maplink::model::Layer;
//!
//! let settings = EngineSettings::new("acme", "https://acme.example.com")
//!     .with_api_key("k1");
//! let engine = Engine::new(settings, ReqwestMapsClient::new()?)?;
//!
//! engine.add_layer(Layer::data("cities", "SELECT * FROM cities", CARTOCSS))?;
//! engine.on(EngineEvent::ReloadSuccess, || println!("map updated"));
//! engine.reload("cities", false).await?;
//! ```

pub mod config;
pub mod engine;
pub mod logging;
pub mod maps;
pub mod model;
pub mod reconciler;

/// Version of the MapLink library.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
