//! Catalog of fields the enquiry list can filter on

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

use crate::query::DataType;

/// A filterable field: where it lives in a record, how it is shown and how
/// it is compared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub path: String,
    pub label: String,
    pub data_type: DataType,
}

impl FieldDescriptor {
    pub fn new(path: impl Into<String>, label: impl Into<String>, data_type: DataType) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
            data_type,
        }
    }

    /// Derive the label from the last path segment, e.g. `testDetails.testPrice`
    /// becomes `Test Price`.
    pub fn from_path(path: impl Into<String>, data_type: DataType) -> Self {
        let path = path.into();
        let last = path.rsplit('.').next().unwrap_or(path.as_str());
        let label = last.to_case(Case::Title);
        Self {
            path,
            label,
            data_type,
        }
    }
}

/// A fixed, ordered list of field descriptors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldCatalog(Vec<FieldDescriptor>);

impl FieldCatalog {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self(fields)
    }

    /// The fields offered by the enquiry list's advanced filter builder.
    pub fn enquiries() -> Self {
        Self(vec![
            FieldDescriptor::new("name", "Name", DataType::Text),
            FieldDescriptor::new("phone", "Phone", DataType::Text),
            FieldDescriptor::new("email", "Email", DataType::Text),
            FieldDescriptor::new("subject", "Subject", DataType::Text),
            FieldDescriptor::new("reference", "Reference", DataType::Text),
            FieldDescriptor::new("notes", "Notes", DataType::Text),
            FieldDescriptor::new("status", "Status", DataType::Text),
            FieldDescriptor::new("category", "Category", DataType::Text),
            FieldDescriptor::from_path("assignedTo", DataType::Text),
            FieldDescriptor::new("createdAt", "Created", DataType::Date),
            FieldDescriptor::from_path("followUpDate", DataType::Date),
            FieldDescriptor::new("visits.length", "Visit Count", DataType::Number),
            FieldDescriptor::from_path("testDetails.testPrice", DataType::Number),
            FieldDescriptor::from_path("testDetails.testType", DataType::Text),
            FieldDescriptor::from_path("hearingAidPurchased", DataType::Boolean),
            FieldDescriptor::new("tags", "Tags", DataType::Array),
        ])
    }

    pub fn get(&self, path: &str) -> Option<&FieldDescriptor> {
        self.0.iter().find(|field| field.path == path)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
