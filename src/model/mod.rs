//! Client-side models for layers and dataviews.
//!
//! These are the stateful objects the engine keeps between reloads: layer
//! and dataview definitions owned by insertion-ordered registries, plus the
//! layer group carrying the instantiation outcome shared across data layers.
//!
//! Application code creates layers/dataviews and registers them through the
//! engine; derived attributes (tile URLs, server metadata, dataview results)
//! are written exclusively by the reconciler when a response arrives.

mod dataview;
mod dataviews;
mod error;
mod layer;
mod layer_group;
mod layers;

pub use dataview::{Dataview, DataviewKind};
pub use dataviews::Dataviews;
pub use error::RegistryError;
pub use layer::{Layer, LayerKind};
pub use layer_group::LayerGroup;
pub use layers::Layers;
