//! Quotes priced by the filler service.

use std::str::FromStr;
use std::sync::Arc;

use alloy_primitives::U256;
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::amount::{format_token_amount, parse_base_units, to_decimal};
use crate::domain::quote::Quote;
use crate::domain::token::TradingPair;
use crate::error::{ExecutionError, Result, ValidationError};
use crate::port::outbound::filler::{FillerApi, QuoteRequest};
use crate::port::outbound::quote::QuoteProvider;

pub struct RemoteQuoter {
    api: Arc<dyn FillerApi>,
}

impl RemoteQuoter {
    #[must_use]
    pub fn new(api: Arc<dyn FillerApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl QuoteProvider for RemoteQuoter {
    fn name(&self) -> &'static str {
        "filler"
    }

    async fn quote(&self, pair: TradingPair, input_amount: U256) -> Result<Quote> {
        if input_amount.is_zero() {
            return Err(ValidationError::ZeroAmount { field: "amount" }.into());
        }

        let request = QuoteRequest {
            amount: format_token_amount(input_amount, pair.source.decimals),
            source_currency: pair.source.symbol.to_string(),
            output_currency: pair.output.symbol.to_string(),
        };
        let response = self.api.quote(&request).await?;

        if let Some(error) = response.error {
            return Err(ExecutionError::QuoteFailed(error).into());
        }

        let expected_output = response
            .expected_output
            .ok_or_else(|| ExecutionError::QuoteFailed("response has no expectedOutput".into()))?;
        let output_amount = parse_base_units(&expected_output)?;
        if output_amount.is_zero() {
            return Err(ValidationError::ZeroAmount {
                field: "expectedOutput",
            }
            .into());
        }

        // The service echoes the input; trust our own amount if it is absent.
        let input_amount = match response.input_amount {
            Some(raw) => parse_base_units(&raw)?,
            None => input_amount,
        };

        let rate = match response.rate {
            Some(raw) => Decimal::from_str(&raw)
                .map_err(|e| ValidationError::InvalidRate(format!("{raw}: {e}")))?,
            None => implied_rate(pair, input_amount, output_amount)?,
        };

        debug!(
            pair = %pair,
            input = %input_amount,
            output = %output_amount,
            rate = %rate,
            "Remote quote"
        );

        Ok(Quote {
            pair,
            input_amount,
            output_amount,
            rate,
        })
    }
}

fn implied_rate(pair: TradingPair, input: U256, output: U256) -> Result<Decimal> {
    let unrepresentable = || ValidationError::InvalidRate("amounts exceed decimal range".into());
    let input = to_decimal(input, pair.source.decimals).ok_or_else(unrepresentable)?;
    let output = to_decimal(output, pair.output.decimals).ok_or_else(unrepresentable)?;
    output
        .checked_div(input)
        .map(|rate| rate.normalize())
        .ok_or_else(|| unrepresentable().into())
}
