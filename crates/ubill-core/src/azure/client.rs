//! REST client for custom document models.
//!
//! Analysis is asynchronous on the service side: the document is submitted,
//! the service answers with an `Operation-Location` URL, and the result is
//! polled until it reports `succeeded` or `failed`. The call is single-shot;
//! there is no retry beyond the polling loop itself.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::bill::RawFieldMap;
use crate::error::AnalyzeError;
use crate::models::config::{AzureConfig, ExtractionConfig};

use super::Result;

const DEFAULT_API_VERSION: &str = "2024-11-30";
const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Client for the Azure Document Intelligence analyze API.
pub struct DocumentAnalysisClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    api_version: String,
    poll_interval: Duration,
    poll_attempts: usize,
}

impl DocumentAnalysisClient {
    /// Create a client for the given resource endpoint and subscription key.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            poll_interval: Duration::from_secs(2),
            poll_attempts: 60,
        }
    }

    /// Create a client from pipeline configuration.
    pub fn from_config(azure: &AzureConfig, extraction: &ExtractionConfig) -> Self {
        Self::new(azure.endpoint.clone(), azure.api_key.clone())
            .with_api_version(azure.api_version.clone())
            .with_polling(
                Duration::from_secs(extraction.poll_interval_secs),
                extraction.poll_attempts,
            )
    }

    /// Override the REST API version.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Override the result polling interval and attempt budget.
    pub fn with_polling(mut self, interval: Duration, attempts: usize) -> Self {
        self.poll_interval = interval;
        self.poll_attempts = attempts;
        self
    }

    /// Analyze a document with a custom model and return its raw field map.
    pub async fn analyze_document(&self, model_id: &str, document: Vec<u8>) -> Result<RawFieldMap> {
        let operation_url = self.submit(model_id, document).await?;
        let analyze_result = self.poll(&operation_url).await?;
        fields_from_result(&analyze_result)
    }

    /// Submit the document and return the operation URL to poll.
    async fn submit(&self, model_id: &str, document: Vec<u8>) -> Result<String> {
        let url = format!(
            "{}/documentintelligence/documentModels/{}:analyze?api-version={}",
            self.endpoint.trim_end_matches('/'),
            model_id,
            self.api_version
        );

        debug!(model_id, bytes = document.len(), "submitting document for analysis");

        let response = self
            .http
            .post(&url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(document)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AnalyzeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .headers()
            .get("Operation-Location")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or(AnalyzeError::MissingOperationLocation)
    }

    /// Poll the operation until it completes and return its `analyzeResult`.
    async fn poll(&self, operation_url: &str) -> Result<Value> {
        for attempt in 1..=self.poll_attempts {
            tokio::time::sleep(self.poll_interval).await;

            let response = self
                .http
                .get(operation_url)
                .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
                .send()
                .await?;

            let body: Value = serde_json::from_str(&response.text().await?)?;
            let status = body.get("status").and_then(Value::as_str).unwrap_or("");
            debug!(attempt, status, "analysis poll");

            match status {
                "succeeded" => {
                    return body
                        .get("analyzeResult")
                        .cloned()
                        .ok_or(AnalyzeError::NoDocuments);
                }
                "failed" => {
                    let message = body
                        .pointer("/error/message")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown error")
                        .to_string();
                    return Err(AnalyzeError::AnalysisFailed(message));
                }
                _ => {}
            }
        }

        warn!(attempts = self.poll_attempts, "analysis polling budget exhausted");
        Err(AnalyzeError::Timeout(self.poll_attempts))
    }
}

/// Flatten `analyzeResult.documents[*].fields` into a raw field map.
fn fields_from_result(result: &Value) -> Result<RawFieldMap> {
    let documents = result
        .get("documents")
        .and_then(Value::as_array)
        .filter(|docs| !docs.is_empty())
        .ok_or(AnalyzeError::NoDocuments)?;

    let mut fields = RawFieldMap::new();
    for document in documents {
        let Some(doc_fields) = document.get("fields").and_then(Value::as_object) else {
            continue;
        };

        for (name, field) in doc_fields {
            let value = field
                .get("valueString")
                .or_else(|| field.get("content"))
                .and_then(Value::as_str)
                .map(str::to_string);
            fields.insert(name.clone(), value);
        }
    }

    if fields.is_empty() {
        return Err(AnalyzeError::NoDocuments);
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_fields_from_result() {
        let result = json!({
            "documents": [{
                "docType": "utilitybill",
                "fields": {
                    "billdate": { "type": "string", "valueString": "29-JUN-2024" },
                    "billeddemand": { "type": "string", "content": "300" },
                    "feedervoltage": { "type": "string" }
                }
            }]
        });

        let fields = fields_from_result(&result).unwrap();
        assert_eq!(fields["billdate"].as_deref(), Some("29-JUN-2024"));
        assert_eq!(fields["billeddemand"].as_deref(), Some("300"));
        assert_eq!(fields["feedervoltage"], None);
    }

    #[test]
    fn test_no_documents() {
        let err = fields_from_result(&json!({ "documents": [] })).unwrap_err();
        assert!(matches!(err, AnalyzeError::NoDocuments));

        let err = fields_from_result(&json!({})).unwrap_err();
        assert!(matches!(err, AnalyzeError::NoDocuments));
    }
}
