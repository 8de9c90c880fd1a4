//! Dataview model.

use serde_json::Value;

/// The aggregation a dataview computes over its source layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataviewKind {
    /// A single aggregate value over one column.
    Formula {
        /// Column the operation is applied to.
        column: String,
        /// Aggregate operation, e.g. `count`, `sum`, `avg`.
        operation: String,
    },
    /// Per-category aggregation over one column.
    Category {
        /// Column whose distinct values form the categories.
        column: String,
        /// Aggregate operation applied per category.
        aggregation: String,
    },
    /// Numeric histogram over one column.
    Histogram {
        /// Column the histogram is computed over.
        column: String,
        /// Number of buckets.
        bins: u32,
    },
}

impl DataviewKind {
    /// Wire type tag for this dataview kind.
    pub fn type_tag(&self) -> &'static str {
        match self {
            DataviewKind::Formula { .. } => "formula",
            DataviewKind::Category { .. } => "aggregation",
            DataviewKind::Histogram { .. } => "histogram",
        }
    }
}

/// An aggregation/statistics widget bound to a layer's data.
///
/// `url`, `result` and `error` are derived state written only during
/// reconciliation.
#[derive(Debug, Clone)]
pub struct Dataview {
    id: String,
    source: String,
    kind: DataviewKind,
    url: Option<String>,
    result: Option<Value>,
    error: Option<String>,
}

impl Dataview {
    /// Creates a formula dataview over `source`.
    pub fn formula(
        id: impl Into<String>,
        source: impl Into<String>,
        column: impl Into<String>,
        operation: impl Into<String>,
    ) -> Self {
        Self::new(
            id,
            source,
            DataviewKind::Formula {
                column: column.into(),
                operation: operation.into(),
            },
        )
    }

    /// Creates a category dataview over `source`.
    pub fn category(
        id: impl Into<String>,
        source: impl Into<String>,
        column: impl Into<String>,
        aggregation: impl Into<String>,
    ) -> Self {
        Self::new(
            id,
            source,
            DataviewKind::Category {
                column: column.into(),
                aggregation: aggregation.into(),
            },
        )
    }

    /// Creates a histogram dataview over `source`.
    pub fn histogram(
        id: impl Into<String>,
        source: impl Into<String>,
        column: impl Into<String>,
        bins: u32,
    ) -> Self {
        Self::new(
            id,
            source,
            DataviewKind::Histogram {
                column: column.into(),
                bins,
            },
        )
    }

    fn new(id: impl Into<String>, source: impl Into<String>, kind: DataviewKind) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            kind,
            url: None,
            result: None,
            error: None,
        }
    }

    /// Stable identifier of this dataview.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Id of the source layer this dataview aggregates over.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The aggregation definition.
    pub fn kind(&self) -> &DataviewKind {
        &self.kind
    }

    /// Authenticated result URL assigned by the last instantiation.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Last-known aggregation result.
    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    /// Error recorded for this dataview by the last reload, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Applies server-derived attributes. Clears any prior error.
    pub(crate) fn apply_instantiation(&mut self, url: String, result: Option<Value>) {
        self.url = Some(url);
        if let Some(result) = result {
            self.result = Some(result);
        }
        self.error = None;
    }

    /// Marks this dataview with an error without clearing prior derived state.
    pub(crate) fn set_error(&mut self, error: String) {
        self.error = Some(error);
    }
}
