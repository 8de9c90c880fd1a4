//! Ordered layer registry.

use super::error::RegistryError;
use super::layer::Layer;

/// Insertion-ordered collection of layers with unique ids.
///
/// Order is semantically meaningful: it is the z-order on the map and the
/// order layers appear in the serialized payload. The response is correlated
/// back index-for-index against the same order, so the registry never
/// reorders members.
#[derive(Debug, Default)]
pub struct Layers {
    items: Vec<Layer>,
}

impl Layers {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a layer, rejecting duplicate ids.
    pub fn add(&mut self, layer: Layer) -> Result<(), RegistryError> {
        if self.items.iter().any(|l| l.id() == layer.id()) {
            return Err(RegistryError::DuplicateId(layer.id().to_string()));
        }
        self.items.push(layer);
        Ok(())
    }

    /// Removes and returns the layer with the given id.
    pub fn remove(&mut self, id: &str) -> Option<Layer> {
        let index = self.items.iter().position(|l| l.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Looks up a layer by id.
    pub fn get(&self, id: &str) -> Option<&Layer> {
        self.items.iter().find(|l| l.id() == id)
    }

    /// Iterates layers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Layer> {
        self.items.iter_mut()
    }

    /// Number of registered layers.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
