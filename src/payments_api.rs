//! Payments API client.
//!
//! [`PaymentsApi`] is the seam between request building and the network:
//! commands only ever talk to the trait, so the schema-fetch and submit
//! phases can be exercised against an in-memory implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use strum::{Display, EnumString};
use tracing::{debug, trace};

use crate::http_utils::HttpClient;
use crate::request_tree::RequestTree;
use crate::schema::Schema;

/// Error emitted by the payments API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Resources the CLI can create and manage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum ResourceKind {
    Beneficiary,
    Transfer,
}

impl ResourceKind {
    fn collection_path(&self) -> &'static str {
        match self {
            ResourceKind::Beneficiary => "/api/v1/beneficiaries",
            ResourceKind::Transfer => "/api/v1/transfers",
        }
    }

    fn schema_path(&self) -> &'static str {
        match self {
            ResourceKind::Beneficiary => "/api/v1/beneficiary_api_schemas/generate",
            ResourceKind::Transfer => "/api/v1/transfers/api_schemas/generate",
        }
    }
}

/// Identifies which schema to fetch.
///
/// `country_or_pair` is a bank country code for beneficiaries and a
/// `SOURCE/TARGET` currency pair for transfers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaQuery {
    pub kind: ResourceKind,
    pub country_or_pair: String,
    pub entity_type: String,
    pub payment_method: String,
    pub account_currency: Option<String>,
}

impl SchemaQuery {
    pub fn body(&self) -> Value {
        match self.kind {
            ResourceKind::Beneficiary => {
                let mut body = json!({
                    "bank_country_code": self.country_or_pair,
                    "entity_type": self.entity_type,
                    "transfer_method": self.payment_method,
                });
                if let Some(currency) = &self.account_currency {
                    body["account_currency"] = json!(currency);
                }
                body
            }
            ResourceKind::Transfer => {
                let (source, target) = self
                    .country_or_pair
                    .split_once('/')
                    .unwrap_or((self.country_or_pair.as_str(), ""));
                json!({
                    "source_currency": source,
                    "transfer_currency": target,
                    "entity_type": self.entity_type,
                    "transfer_method": self.payment_method,
                })
            }
        }
    }
}

#[async_trait]
pub trait PaymentsApi: Send + Sync {
    async fn fetch_schema(&self, query: &SchemaQuery) -> Result<Schema, ApiError>;

    async fn create_resource(
        &self,
        kind: ResourceKind,
        body: &RequestTree,
    ) -> Result<Value, ApiError>;

    async fn update_resource(
        &self,
        kind: ResourceKind,
        id: &str,
        body: &RequestTree,
    ) -> Result<Value, ApiError>;

    async fn get_resource(&self, kind: ResourceKind, id: &str) -> Result<Value, ApiError>;

    /// First page of a collection.
    async fn list_resources(&self, kind: ResourceKind) -> Result<Value, ApiError>;

    async fn delete_resource(&self, kind: ResourceKind, id: &str) -> Result<(), ApiError>;
}

/// `PaymentsApi` over HTTP with a bearer token obtained at login.
pub struct PaymentsApiClient {
    http: HttpClient,
    access_token: String,
}

impl PaymentsApiClient {
    pub fn new(http: HttpClient, access_token: String) -> Self {
        Self { http, access_token }
    }

    fn token(&self) -> Option<&str> {
        Some(self.access_token.as_str())
    }
}

#[async_trait]
impl PaymentsApi for PaymentsApiClient {
    async fn fetch_schema(&self, query: &SchemaQuery) -> Result<Schema, ApiError> {
        debug!("Fetching {} schema for {}", query.kind, query.country_or_pair);
        let body = query.body();
        trace!("Schema query: {}", body);
        self.http
            .post(query.kind.schema_path(), &body, self.token())
            .await
    }

    async fn create_resource(
        &self,
        kind: ResourceKind,
        body: &RequestTree,
    ) -> Result<Value, ApiError> {
        let path = format!("{}/create", kind.collection_path());
        debug!("Creating {} via {}", kind, path);
        self.http.post(&path, body, self.token()).await
    }

    async fn update_resource(
        &self,
        kind: ResourceKind,
        id: &str,
        body: &RequestTree,
    ) -> Result<Value, ApiError> {
        if kind != ResourceKind::Beneficiary {
            return Err(ApiError::UnsupportedOperation(format!("{} update", kind)));
        }
        let path = format!("{}/update/{}", kind.collection_path(), id);
        debug!("Updating {} {}", kind, id);
        self.http.post(&path, body, self.token()).await
    }

    async fn get_resource(&self, kind: ResourceKind, id: &str) -> Result<Value, ApiError> {
        let path = format!("{}/{}", kind.collection_path(), id);
        self.http.get(&path, self.token()).await
    }

    async fn list_resources(&self, kind: ResourceKind) -> Result<Value, ApiError> {
        self.http.get(kind.collection_path(), self.token()).await
    }

    async fn delete_resource(&self, kind: ResourceKind, id: &str) -> Result<(), ApiError> {
        if kind != ResourceKind::Beneficiary {
            return Err(ApiError::UnsupportedOperation(format!("{} delete", kind)));
        }
        let path = format!("{}/delete/{}", kind.collection_path(), id);
        debug!("Deleting {} {}", kind, id);
        let _: Value = self.http.post(&path, &json!({}), self.token()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beneficiary_schema_query_body() {
        let query = SchemaQuery {
            kind: ResourceKind::Beneficiary,
            country_or_pair: "CA".to_string(),
            entity_type: "PERSONAL".to_string(),
            payment_method: "LOCAL".to_string(),
            account_currency: Some("CAD".to_string()),
        };
        assert_eq!(
            query.body(),
            json!({
                "bank_country_code": "CA",
                "entity_type": "PERSONAL",
                "transfer_method": "LOCAL",
                "account_currency": "CAD"
            })
        );
    }

    #[test]
    fn test_transfer_schema_query_splits_pair() {
        let query = SchemaQuery {
            kind: ResourceKind::Transfer,
            country_or_pair: "USD/JPY".to_string(),
            entity_type: "COMPANY".to_string(),
            payment_method: "SWIFT".to_string(),
            account_currency: None,
        };
        let body = query.body();
        assert_eq!(body["source_currency"], "USD");
        assert_eq!(body["transfer_currency"], "JPY");
    }

    #[test]
    fn test_resource_kind_names() {
        assert_eq!(ResourceKind::Beneficiary.to_string(), "beneficiary");
        assert_eq!("transfer".parse::<ResourceKind>().unwrap(), ResourceKind::Transfer);
    }
}
