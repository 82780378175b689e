//! Handler for the `generate` command.

use std::path::Path;

use tracing::debug;

use super::command::OrderArgs;
use super::{order_file, output, prompt, request, run, summary};
use crate::adapter::outbound::evm::EvmClient;
use crate::application::order::{create_signed_order, order_params, OrderOptions};
use crate::domain::order::SignedOrder;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Build, gate, sign, and print or save an order.
pub async fn execute(args: &OrderArgs, config: &Config) -> Result<()> {
    let signed = build_order(args, config).await?;
    emit_order(&signed, args.out.as_deref())
}

#[must_use]
pub fn order_options(args: &OrderArgs) -> OrderOptions {
    OrderOptions {
        expires_in: (!args.no_expiry).then_some(args.expires_in),
        allow_partial_fills: !args.no_partial_fills,
        allow_multiple_fills: !args.single_fill,
        receiver: args.receiver.unwrap_or_default(),
        allowed_sender: args.allowed_sender,
        nonce: args.nonce,
    }
}

/// Quote, gate the maker's funding, and sign.
pub(super) async fn build_order(args: &OrderArgs, config: &Config) -> Result<SignedOrder> {
    let signer = config.maker_signer()?;
    let rpc_url = config.rpc_url()?;
    let provider = request::quoter(config, args.pair.fixed)?;

    let trade = {
        let mut prompter = prompt::stdin_prompter();
        request::resolve(&args.pair, prompter.as_mut())?
    };

    output::section("Quote");
    let quote = request::fetch_quote(provider.as_ref(), &trade).await?;
    request::print_quote(&quote);

    let maker = signer.address();
    let params = order_params(&quote, maker, &order_options(args), run::unix_now())?;
    debug!(?params, "Order parameters");

    output::section("Maker");
    output::field("Address", maker);
    let client = EvmClient::connect(rpc_url, signer.clone(), config.protocol_address);

    let pb = output::spinner("Checking balance and allowance...");
    let created = match create_signed_order(
        &client,
        signer,
        &config.domain(),
        config.protocol_address,
        &params,
    )
    .await
    {
        Ok(created) => {
            output::spinner_success(&pb, "Balance and allowance sufficient");
            created
        }
        Err(e) => {
            output::spinner_fail(&pb, "Could not prepare order");
            return Err(e);
        }
    };
    summary::print_funding(&quote.pair.source, &created.funding);

    output::section("Order");
    summary::print_order(&created.signed);
    output::success("Order signed");

    Ok(created.signed)
}

/// Write the order to `out`, or print it as the command's document.
pub(super) fn emit_order(signed: &SignedOrder, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            order_file::write_order(path, signed)?;
            output::success(&format!("Wrote order to {}", path.display()));
            output::hint(&format!(
                "run {} to simulate a fill",
                output::highlight(format!("lopctl fill --order {}", path.display()))
            ));
        }
        None => output::document("order", serde_json::to_value(signed.to_record())?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::inbound::cli::command::{Cli, Commands};
    use alloy_primitives::Address;
    use clap::Parser;

    fn parse(args: &[&str]) -> OrderArgs {
        let mut argv = vec!["lopctl", "generate"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Generate(args) => args,
            other => panic!("expected generate, got {other:?}"),
        }
    }

    #[test]
    fn defaults_expire_and_allow_partial_fills() {
        let options = order_options(&parse(&[]));
        assert_eq!(options, OrderOptions::default());
    }

    #[test]
    fn flags_map_to_options() {
        let sender = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
        let options = order_options(&parse(&[
            "--no-expiry",
            "--no-partial-fills",
            "--single-fill",
            "--nonce",
            "4",
            "--allowed-sender",
            sender,
        ]));
        assert_eq!(options.expires_in, None);
        assert!(!options.allow_partial_fills);
        assert!(!options.allow_multiple_fills);
        assert_eq!(options.nonce, 4);
        assert_eq!(options.allowed_sender, Some(sender.parse::<Address>().unwrap()));
        assert_eq!(options.receiver, Address::ZERO);
    }
}
