//! Spreadsheet values API client
//!
//! Talks to a Google-Sheets-compatible `values` endpoint. The whole worksheet
//! is read with one GET and replaced with a clear followed by one PUT.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use super::store::{ReportStore, StoreError, Table};
use crate::core::config::StoreConfig;

/// Body of a values read/write
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeUpdate<'a> {
    major_dimension: &'a str,
    values: &'a [Vec<String>],
}

/// HTTP-backed worksheet store
pub struct SheetsClient {
    http_client: Client,
    api_base: String,
    spreadsheet_id: String,
    access_token: String,
    worksheet: String,
}

impl SheetsClient {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Request(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "Spreadsheet client initialized for worksheet '{}' at {}",
            config.worksheet, config.api_base
        );

        Ok(Self {
            http_client,
            api_base: config.api_base.clone(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            access_token: config.access_token.clone(),
            worksheet: config.worksheet.clone(),
        })
    }

    fn values_url(&self, suffix: &str) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}{}",
            self.api_base,
            urlencoding::encode(&self.spreadsheet_id),
            urlencoding::encode(&self.worksheet),
            suffix
        )
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        error!("Spreadsheet API error: HTTP {} - {}", status, body);
        Err(StoreError::Http { status, body })
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let response = self
            .http_client
            .post(self.values_url(":clear"))
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }
}

/// Sheet cells come back as strings, numbers or booleans.
fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl ReportStore for SheetsClient {
    async fn list(&self) -> Result<Table, StoreError> {
        debug!("Reading worksheet '{}'", self.worksheet);

        let response = self
            .http_client
            .get(self.values_url(""))
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;
        let response = Self::check(response).await?;

        let range: ValueRange = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        let values = range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect();
        let table = Table::from_values(values);

        debug!(
            "Read {} rows from worksheet '{}'",
            table.len(),
            self.worksheet
        );
        Ok(table)
    }

    async fn replace_all(&self, table: Table) -> Result<(), StoreError> {
        let rows = table.len();
        let values = table.into_values();

        // Clear first so a shorter table leaves no stale rows below it.
        self.clear().await?;

        let response = self
            .http_client
            .put(self.values_url("?valueInputOption=RAW"))
            .bearer_auth(&self.access_token)
            .json(&ValueRangeUpdate {
                major_dimension: "ROWS",
                values: &values,
            })
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;
        Self::check(response).await?;

        info!("Replaced worksheet '{}' with {} rows", self.worksheet, rows);
        Ok(())
    }
}
