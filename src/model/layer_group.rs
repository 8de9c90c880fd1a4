//! Layer group model.

/// The instantiation outcome shared across all data layers of one map.
///
/// A successful instantiation assigns one layergroup id covering every data
/// layer; tile URLs are derived from it. Reset and repopulated on each
/// reconciled response.
#[derive(Debug, Clone, Default)]
pub struct LayerGroup {
    layergroup_id: Option<String>,
    tile_url_templates: Vec<String>,
    error: Option<String>,
}

impl LayerGroup {
    /// Creates an empty layer group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Id assigned by the last successful instantiation.
    pub fn layergroup_id(&self) -> Option<&str> {
        self.layergroup_id.as_deref()
    }

    /// Tile URL templates in layer order, from the last instantiation.
    pub fn tile_url_templates(&self) -> &[String] {
        &self.tile_url_templates
    }

    /// Group-level error from the last reload, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Applies a successful instantiation. Clears any prior error.
    pub(crate) fn apply_instantiation(&mut self, layergroup_id: String, templates: Vec<String>) {
        self.layergroup_id = Some(layergroup_id);
        self.tile_url_templates = templates;
        self.error = None;
    }

    /// Marks the group with an error without clearing the prior instantiation.
    pub(crate) fn set_error(&mut self, error: String) {
        self.error = Some(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_instantiation_clears_error() {
        let mut group = LayerGroup::new();
        group.set_error("boom".to_string());

        group.apply_instantiation(
            "lg1".to_string(),
            vec!["https://tiles/0/{z}/{x}/{y}.png".to_string()],
        );
        assert_eq!(group.layergroup_id(), Some("lg1"));
        assert_eq!(group.tile_url_templates().len(), 1);
        assert!(group.error().is_none());
    }

    #[test]
    fn test_set_error_keeps_prior_instantiation() {
        let mut group = LayerGroup::new();
        group.apply_instantiation("lg1".to_string(), vec![]);
        group.set_error("service unavailable".to_string());

        assert_eq!(group.layergroup_id(), Some("lg1"));
        assert_eq!(group.error(), Some("service unavailable"));
    }
}
