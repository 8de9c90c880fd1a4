//! Ordered dataview registry.

use super::dataview::Dataview;
use super::error::RegistryError;

/// Insertion-ordered collection of dataviews with unique ids.
///
/// Serialized in insertion order; responses key dataview metadata by id, so
/// ordering here matters only for payload determinism.
#[derive(Debug, Default)]
pub struct Dataviews {
    items: Vec<Dataview>,
}

impl Dataviews {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a dataview, rejecting duplicate ids.
    pub fn add(&mut self, dataview: Dataview) -> Result<(), RegistryError> {
        if self.items.iter().any(|d| d.id() == dataview.id()) {
            return Err(RegistryError::DuplicateId(dataview.id().to_string()));
        }
        self.items.push(dataview);
        Ok(())
    }

    /// Removes and returns the dataview with the given id.
    pub fn remove(&mut self, id: &str) -> Option<Dataview> {
        let index = self.items.iter().position(|d| d.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Looks up a dataview by id.
    pub fn get(&self, id: &str) -> Option<&Dataview> {
        self.items.iter().find(|d| d.id() == id)
    }

    /// Iterates dataviews in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Dataview> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Dataview> {
        self.items.iter_mut()
    }

    /// Number of registered dataviews.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
