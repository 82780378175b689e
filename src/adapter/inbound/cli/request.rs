//! Pair, amount, and quote resolution shared by the order commands.

use std::sync::Arc;

use alloy_primitives::U256;

use super::command::PairArgs;
use super::output;
use super::prompt::Prompter;
use crate::adapter::outbound::filler::FillerClient;
use crate::adapter::outbound::quote::{FixedRateQuoter, RemoteQuoter};
use crate::domain::amount::parse_token_amount;
use crate::domain::quote::Quote;
use crate::domain::token::{self, Token, TradingPair, ALLOWED_PAIRS};
use crate::error::{Result, ValidationError};
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::quote::QuoteProvider;

/// What the maker wants to sell and for what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeRequest {
    pub pair: TradingPair,
    /// Source token base units.
    pub amount: U256,
}

fn sources() -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    for (source, _) in ALLOWED_PAIRS {
        if !tokens.contains(source) {
            tokens.push(*source);
        }
    }
    tokens
}

fn outputs(source: Token) -> Vec<Token> {
    ALLOWED_PAIRS
        .iter()
        .filter(|(s, _)| *s == source)
        .map(|(_, o)| *o)
        .collect()
}

fn choose(prompter: &mut dyn Prompter, prompt: &str, tokens: &[Token]) -> Result<Token> {
    let items: Vec<String> = tokens.iter().map(|t| t.symbol.to_string()).collect();
    let index = prompter.select(prompt, &items, 0)?;
    Ok(tokens[index])
}

/// Fill in anything missing from `args` by asking `prompter`.
///
/// # Errors
///
/// Returns a validation error for unknown symbols, unsupported pairs, or a
/// malformed or zero amount, and [`crate::error::Error::Cancelled`] if input ends.
pub fn resolve(args: &PairArgs, prompter: &mut dyn Prompter) -> Result<TradeRequest> {
    let source = match &args.from {
        Some(symbol) => token::by_symbol(symbol)?,
        None => choose(prompter, "Token to sell", &sources())?,
    };
    let output = match &args.to {
        Some(symbol) => token::by_symbol(symbol)?,
        None => choose(prompter, "Token to receive", &outputs(source))?,
    };
    let pair = TradingPair::new(source, output)?;

    let text = match &args.amount {
        Some(text) => text.clone(),
        None => prompter.input(&format!("Amount of {source} to sell"))?,
    };
    let amount = parse_token_amount(&text, source.decimals)?;
    if amount.is_zero() {
        return Err(ValidationError::ZeroAmount { field: "amount" }.into());
    }

    Ok(TradeRequest { pair, amount })
}

/// Quote provider for this invocation: the fixed rate when asked for,
/// otherwise the filler service.
///
/// # Errors
///
/// Returns a config error if the filler URL is needed but unset, or the
/// configured rate is invalid.
pub fn quoter(config: &Config, fixed: bool) -> Result<Box<dyn QuoteProvider>> {
    if fixed {
        return Ok(Box::new(FixedRateQuoter::new(config.fixed_quote_rate)?));
    }
    let api = FillerClient::new(config.filler_api_url()?);
    Ok(Box::new(RemoteQuoter::new(Arc::new(api))))
}

/// Fetch a quote behind a spinner.
///
/// # Errors
///
/// Returns the provider's error.
pub async fn fetch_quote(provider: &dyn QuoteProvider, request: &TradeRequest) -> Result<Quote> {
    let pb = output::spinner(&format!("Fetching quote from {}...", provider.name()));
    match provider.quote(request.pair, request.amount).await {
        Ok(quote) => {
            output::spinner_success(&pb, "Fetched quote");
            Ok(quote)
        }
        Err(e) => {
            output::spinner_fail(&pb, "Failed to fetch quote");
            Err(e)
        }
    }
}

pub fn print_quote(quote: &Quote) {
    output::field("Pair", quote.pair);
    output::field(
        "You sell",
        format!("{} {}", quote.input_display(), quote.pair.source),
    );
    output::field(
        "You receive",
        format!("{} {}", quote.output_display(), quote.pair.output),
    );
    output::field("Rate", quote.rate);
}
