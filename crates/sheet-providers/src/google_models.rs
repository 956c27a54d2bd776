use serde::Deserialize;
use serde_json::Value;
use sheet_core::error::SheetError;
use sheet_core::model::ValueTable;

pub(crate) const FALLBACK_SHEET_TITLE: &str = "Sheet1";

#[derive(Debug, Deserialize)]
pub(crate) struct SpreadsheetMeta {
    #[serde(default)]
    pub(crate) sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SheetEntry {
    #[serde(default)]
    pub(crate) properties: Option<SheetProperties>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SheetProperties {
    #[serde(default)]
    pub(crate) title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ValueRange {
    #[serde(default)]
    pub(crate) values: Vec<Vec<Value>>,
}

pub(crate) fn sheet_title(meta: &SpreadsheetMeta, index: usize) -> Result<String, SheetError> {
    let sheet = meta
        .sheets
        .get(index)
        .ok_or(SheetError::SheetIndexOutOfRange {
            index,
            count: meta.sheets.len(),
        })?;
    let title = sheet
        .properties
        .as_ref()
        .and_then(|properties| properties.title.clone())
        .unwrap_or_else(|| FALLBACK_SHEET_TITLE.to_string());
    Ok(title)
}

pub(crate) fn into_table(range: ValueRange) -> ValueTable {
    range
        .values
        .into_iter()
        .map(|row| row.into_iter().map(cell_text).collect())
        .collect()
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
