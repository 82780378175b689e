//! Handler for the `submit` command.

use serde_json::json;

use super::command::SubmitArgs;
use super::generate::{build_order, emit_order};
use super::{output, prompt};
use crate::adapter::outbound::filler::FillerClient;
use crate::application::submit::submit_order;
use crate::error::{Error, ExecutionError, Result};
use crate::infrastructure::config::settings::Config;

/// Generate an order and hand it to the filler service.
pub async fn execute(args: &SubmitArgs, config: &Config) -> Result<()> {
    let filler = FillerClient::new(config.filler_api_url()?);
    let signed = build_order(&args.order, config).await?;

    if let Some(path) = args.order.out.as_deref() {
        emit_order(&signed, Some(path))?;
    }

    if !args.yes {
        let mut prompter = prompt::stdin_prompter();
        if !prompter.confirm("Submit this order to the filler?", false)? {
            output::warning("Submission cancelled");
            return Ok(());
        }
    }

    output::section("Submission");
    let pb = output::spinner("Submitting order...");
    let submission = match submit_order(&filler, &signed).await {
        Ok(submission) => {
            output::spinner_success(&pb, "Filler accepted order");
            submission
        }
        Err(e) => {
            output::spinner_fail(&pb, "Filler did not accept order");
            if let Error::Execution(ExecutionError::Rejected {
                details: Some(details),
                ..
            }) = &e
            {
                output::field("Details", details);
            }
            return Err(e);
        }
    };

    if output::is_json() {
        output::json_output(json!({
            "type": "submission",
            "payload": {
                "orderHash": signed.order_hash().to_string(),
                "txId": submission.tx_id,
                "message": submission.message,
            },
        }));
        return Ok(());
    }

    if let Some(tx_id) = &submission.tx_id {
        output::field("Tx", tx_id);
    }
    if let Some(message) = &submission.message {
        output::note(message);
    }
    Ok(())
}
