//! Handler for the `fill` command.

use serde_json::json;

use super::command::FillArgs;
use super::order_file::{load_order, OrderSource};
use super::{output, run, summary};
use crate::adapter::outbound::evm::EvmClient;
use crate::application::fill::{fill_order, FillMode, FillOutcome};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Simulate or execute a fill of a stored order as the taker.
pub async fn execute(args: &FillArgs, config: &Config) -> Result<()> {
    let signer = config.taker_signer()?;
    let rpc_url = config.rpc_url()?;

    let source = OrderSource::pick(args.order.as_deref(), config.order_path.as_deref());
    let signed = load_order(&source, &config.domain())?;

    output::section("Order");
    output::field("Source", &source);
    summary::print_order(&signed);

    let mode = if args.execute {
        FillMode::Execute
    } else {
        FillMode::Simulate
    };
    let taker = signer.address();
    output::section("Taker");
    output::field("Address", taker);

    let client = EvmClient::connect(rpc_url, signer.clone(), config.protocol_address);
    let pb = output::spinner(match mode {
        FillMode::Simulate => "Simulating fill...",
        FillMode::Execute => "Executing fill...",
    });
    let report = match fill_order(
        &client,
        &client,
        &signed,
        config.protocol_address,
        mode,
        run::unix_now(),
    )
    .await
    {
        Ok(report) => {
            output::spinner_success(&pb, "Fill did not revert");
            report
        }
        Err(e) => {
            output::spinner_fail(&pb, "Fill failed");
            return Err(e);
        }
    };
    summary::print_funding(&report.taker_asset, &report.funding);

    match report.outcome {
        FillOutcome::Simulated => {
            if output::is_json() {
                output::json_output(json!({
                    "type": "fill",
                    "payload": {
                        "mode": "simulate",
                        "orderHash": signed.order_hash().to_string(),
                        "success": true,
                    },
                }));
                return Ok(());
            }
            output::success("Simulation succeeded");
            output::hint(&format!(
                "re-run with {} to broadcast the fill",
                output::highlight("--execute")
            ));
        }
        FillOutcome::Executed(receipt) => {
            if output::is_json() {
                output::json_output(json!({
                    "type": "fill",
                    "payload": {
                        "mode": "execute",
                        "orderHash": signed.order_hash().to_string(),
                        "txHash": receipt.tx_hash.to_string(),
                        "gasUsed": receipt.gas_used,
                        "blockNumber": receipt.block_number,
                    },
                }));
                return Ok(());
            }
            output::success("Order filled");
            output::field("Tx hash", receipt.tx_hash);
            output::field("Gas used", receipt.gas_used);
            if let Some(block) = receipt.block_number {
                output::field("Block", block);
            }
        }
    }
    Ok(())
}
