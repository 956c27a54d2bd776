use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell values of a read, row-major. Rows may be ragged.
pub type ValueTable = Vec<Vec<String>>;

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct RangeRequest {
    pub document_id: String,
    pub sheet_index: usize,
    pub range: String,
}

impl RangeRequest {
    pub fn new(
        document_id: impl Into<String>,
        sheet_index: usize,
        range: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let document_id = document_id.into();
        if document_id.trim().is_empty() {
            anyhow::bail!("document id must not be empty");
        }
        Ok(Self {
            document_id,
            sheet_index,
            range: range.into(),
        })
    }

    /// Joins a sheet title with the requested range suffix, e.g. `Prices` + `!A1:C4`.
    pub fn qualified_range(&self, title: &str) -> String {
        format!("{title}{}", self.range)
    }
}

impl fmt::Display for RangeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{}{}",
            self.document_id, self.sheet_index, self.range
        )
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
}

impl Credential {
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_document_id() {
        assert!(RangeRequest::new("  ", 0, "!A1:B2").is_err());
        assert!(RangeRequest::new("doc", 0, "!A1:B2").is_ok());
    }

    #[test]
    fn qualified_range_concatenates_title() {
        let request = RangeRequest::new("doc", 1, "!A1:C4").unwrap();
        assert_eq!(request.qualified_range("Prices"), "Prices!A1:C4");
        assert_eq!(request.to_string(), "doc#1!A1:C4");
    }

    #[test]
    fn credential_debug_hides_token() {
        let credential = Credential::bearer("secret-token");
        let debug = format!("{credential:?}");
        assert!(!debug.contains("secret-token"));
    }
}
