use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::WorksheetData;

/// Resource name under which Univer's data-validation plugin stores its rules.
pub const DATA_VALIDATION_RESOURCE: &str = "SHEET_DATA_VALIDATION_PLUGIN";

/// Resource name under which Univer's conditional-formatting plugin stores its rules.
pub const CONDITIONAL_FORMATTING_RESOURCE: &str = "SHEET_CONDITIONAL_FORMATTING_PLUGIN";

/// Workbook snapshot (`IWorkbookData`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkbookData {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
    pub locale: String,
    /// Shared style table. Cell styles are not migrated, so this is always empty.
    #[serde(default)]
    pub styles: IndexMap<String, serde_json::Value>,
    pub sheet_order: Vec<String>,
    pub sheets: IndexMap<String, WorksheetData>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,
}

impl WorkbookData {
    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name == name)
    }
}

/// Plugin payload attached to a workbook; `data` is itself a JSON document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub data: String,
}
