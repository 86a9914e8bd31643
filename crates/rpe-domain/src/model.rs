use crate::document::ResourceDocument;
use rpe_types::ResourceRef;
use serde_json::Value;

/// One resource as handed to the engine: its type, optional name, and raw document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourceSnapshot {
    /// Resource type, e.g. `bigquery.googleapis.com/Dataset`.
    pub resource_type: String,
    pub name: Option<String>,
    pub document: Value,
}

impl ResourceSnapshot {
    pub fn new(resource_type: impl Into<String>, document: Value) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: None,
            document,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn document(&self) -> ResourceDocument<'_> {
        ResourceDocument::new(&self.document)
    }

    pub fn resource_ref(&self) -> ResourceRef {
        ResourceRef {
            resource_type: self.resource_type.clone(),
            name: self.name.clone(),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}
