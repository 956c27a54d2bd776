use crate::google_models::{SpreadsheetMeta, ValueRange, into_table, sheet_title};
use crate::http::{endpoint, send_checked};
use anyhow::Context;
use reqwest::blocking::Client;
use sheet_core::error::SheetError;
use sheet_core::model::{RangeRequest, ValueTable};
use sheet_core::provider::{AuthProvider, SheetClient};
use tracing::debug;

pub const DEFAULT_API_HOST: &str = "https://sheets.googleapis.com";

const USER_AGENT: &str = "sheet-reader";

pub struct GoogleSheetsClient<A> {
    client: Client,
    host: String,
    auth: A,
}

impl<A: AuthProvider> GoogleSheetsClient<A> {
    pub fn new(auth: A, host: Option<&str>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("build http client")?;
        Ok(Self {
            client,
            host: host_or_default(host),
            auth,
        })
    }

    fn fetch_sheet_title(&self, token: &str, request: &RangeRequest) -> Result<String, SheetError> {
        let mut url = endpoint(&self.host, &["v4", "spreadsheets", &request.document_id])?;
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties.title");
        debug!(url = %url, "fetching spreadsheet metadata");
        let response = send_checked(
            self.client.get(url).bearer_auth(token),
            "spreadsheet metadata",
        )?;
        let meta: SpreadsheetMeta = response.json().context("decode spreadsheet metadata")?;
        sheet_title(&meta, request.sheet_index)
    }

    fn fetch_values(
        &self,
        token: &str,
        request: &RangeRequest,
        range: &str,
    ) -> Result<ValueTable, SheetError> {
        let url = endpoint(
            &self.host,
            &["v4", "spreadsheets", &request.document_id, "values", range],
        )?;
        debug!(url = %url, "fetching cell values");
        let response = send_checked(self.client.get(url).bearer_auth(token), "values get")?;
        let values: ValueRange = response.json().context("decode values response")?;
        Ok(into_table(values))
    }
}

impl<A: AuthProvider> SheetClient for GoogleSheetsClient<A> {
    fn read(&self, request: &RangeRequest) -> Result<ValueTable, SheetError> {
        let credential = self.auth.credential().context("resolve credential")?;
        let token = credential.access_token.as_str();
        let title = self.fetch_sheet_title(token, request)?;
        let range = request.qualified_range(&title);
        self.fetch_values(token, request, &range)
    }
}

pub fn host_or_default(host: Option<&str>) -> String {
    host.unwrap_or(DEFAULT_API_HOST)
        .trim_end_matches('/')
        .to_string()
}
