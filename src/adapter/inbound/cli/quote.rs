//! Handler for the `quote` command.

use serde_json::json;

use super::command::PairArgs;
use super::{output, prompt, request};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Quote a pair and print the result. Nothing is signed or sent on-chain.
pub async fn execute(args: &PairArgs, config: &Config) -> Result<()> {
    let provider = request::quoter(config, args.fixed)?;
    let mut prompter = prompt::stdin_prompter();
    let trade = request::resolve(args, prompter.as_mut())?;

    output::section("Quote");
    let quote = request::fetch_quote(provider.as_ref(), &trade).await?;

    if output::is_json() {
        output::json_output(json!({
            "type": "quote",
            "payload": {
                "source": quote.pair.source.symbol,
                "output": quote.pair.output.symbol,
                "inputAmount": quote.input_amount.to_string(),
                "expectedOutput": quote.output_amount.to_string(),
                "rate": quote.rate.to_string(),
                "provider": provider.name(),
            },
        }));
        return Ok(());
    }

    request::print_quote(&quote);
    output::field("Provider", provider.name());
    Ok(())
}
