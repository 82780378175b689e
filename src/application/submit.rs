//! Hand a signed order to the filler service.

use tracing::info;

use crate::domain::order::SignedOrder;
use crate::error::{ExecutionError, Result};
use crate::port::outbound::filler::{ExecuteRequest, FillerApi};

/// Accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub tx_id: Option<String>,
    pub message: Option<String>,
}

/// POST the order, signature, and compact signature to the filler.
///
/// # Errors
///
/// Returns [`ExecutionError::Rejected`] when the service answers
/// `success: false`, or any transport error.
pub async fn submit_order(api: &dyn FillerApi, signed: &SignedOrder) -> Result<Submission> {
    let request = ExecuteRequest::from(signed);
    let response = api.execute(&request).await?;

    if !response.success {
        let reason = response
            .error
            .or(response.message)
            .unwrap_or_else(|| "no reason given".to_string());
        return Err(ExecutionError::Rejected {
            reason,
            details: response.details,
        }
        .into());
    }

    info!(order_hash = %signed.order_hash(), tx_id = ?response.tx_id, "Filler accepted order");
    Ok(Submission {
        tx_id: response.tx_id,
        message: response.message,
    })
}
