//! Remote filler service port and wire records.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::order::{OrderFields, SignedOrder};
use crate::error::Result;

/// Body of `POST /quote`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// Human-readable source amount, e.g. `"100"`.
    pub amount: String,
    pub source_currency: String,
    pub output_currency: String,
}

/// Reply to `POST /quote`. Either the amounts or `error` are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    /// Source base units.
    #[serde(default)]
    pub input_amount: Option<String>,
    /// Output base units.
    #[serde(default)]
    pub expected_output: Option<String>,
    #[serde(default)]
    pub rate: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `POST /execute`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    pub order: OrderFields,
    pub signature: String,
    pub r: String,
    pub vs: String,
}

impl From<&SignedOrder> for ExecuteRequest {
    fn from(signed: &SignedOrder) -> Self {
        let compact = signed.compact_signature();
        Self {
            order: OrderFields::from(signed.order()),
            signature: signed.signature_hex(),
            r: compact.r_hex(),
            vs: compact.vs_hex(),
        }
    }
}

/// Reply to `POST /execute`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub tx_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

/// HTTP service that quotes pairs and fills signed orders for the caller.
#[async_trait]
pub trait FillerApi: Send + Sync {
    /// # Errors
    ///
    /// Returns an error on transport failure or an undecodable reply.
    async fn quote(&self, request: &QuoteRequest) -> Result<QuoteResponse>;

    /// # Errors
    ///
    /// Returns an error on transport failure or an undecodable reply.
    async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResponse>;
}
