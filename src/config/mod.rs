//! Configuration types for the MapLink engine.
//!
//! Settings are captured once at engine construction and shared read-only
//! by every request for the engine's lifetime. These are pure data types;
//! validation happens when the engine is built.

mod settings;

pub use settings::{Credentials, EngineSettings};
