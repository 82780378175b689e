//! Handler for the `verify` command.

use super::command::VerifyArgs;
use super::order_file::{load_order, OrderSource};
use super::{output, summary};
use crate::adapter::outbound::evm::onchain_order_hash;
use crate::error::{Result, ValidationError};
use crate::infrastructure::config::settings::Config;

/// Recompute the hash, recover the signer, and compare it to the maker.
pub async fn execute(args: &VerifyArgs, config: &Config) -> Result<()> {
    let rpc_url = if args.onchain {
        Some(config.rpc_url()?)
    } else {
        None
    };

    let source = OrderSource::pick(args.order.as_deref(), config.order_path.as_deref());
    let signed = load_order(&source, &config.domain())?;
    output::section("Order");
    summary::print_order(&signed);
    output::success("Order hash matches its fields");

    let maker = signed.order().maker;
    let signer = signed.recover_signer()?;
    output::field("Signer", signer);
    if signer != maker {
        return Err(ValidationError::SignerMismatch {
            maker: maker.to_string(),
            signer: signer.to_string(),
        }
        .into());
    }
    output::success("Signature recovers to the maker");

    let compact = signed.compact_signature();
    output::field("r", compact.r_hex());
    output::field("vs", compact.vs_hex());

    if let Some(rpc_url) = rpc_url {
        let pb = output::spinner("Calling hashOrder...");
        let onchain = match onchain_order_hash(rpc_url, config.protocol_address, signed.order()).await
        {
            Ok(hash) => {
                output::spinner_success(&pb, "Fetched on-chain hash");
                hash
            }
            Err(e) => {
                output::spinner_fail(&pb, "hashOrder call failed");
                return Err(e);
            }
        };
        if onchain != signed.order_hash() {
            return Err(ValidationError::OrderHashMismatch {
                recorded: signed.order_hash().to_string(),
                computed: onchain.to_string(),
            }
            .into());
        }
        output::success("Contract computes the same hash");
    }
    Ok(())
}
