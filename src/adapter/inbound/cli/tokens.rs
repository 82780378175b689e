//! Handler for the `tokens` command.

use serde_json::json;
use tabled::{Table, Tabled};

use super::output;
use crate::domain::token::{ALLOWED_PAIRS, TOKENS};

#[derive(Tabled)]
struct TokenRow {
    #[tabled(rename = "Symbol")]
    symbol: &'static str,
    #[tabled(rename = "Decimals")]
    decimals: u8,
    #[tabled(rename = "Address")]
    address: String,
}

/// List the token table and the pairs orders may use.
pub fn execute() {
    if output::is_json() {
        let tokens: Vec<_> = TOKENS
            .iter()
            .map(|t| {
                json!({
                    "symbol": t.symbol,
                    "decimals": t.decimals,
                    "address": t.address.to_checksum(None),
                })
            })
            .collect();
        let pairs: Vec<_> = ALLOWED_PAIRS
            .iter()
            .map(|(s, o)| json!({ "source": s.symbol, "output": o.symbol }))
            .collect();
        output::json_output(json!({
            "type": "tokens",
            "payload": { "tokens": tokens, "pairs": pairs },
        }));
        return;
    }

    output::section("Tokens");
    let rows = TOKENS.iter().map(|t| TokenRow {
        symbol: t.symbol,
        decimals: t.decimals,
        address: t.address.to_checksum(None),
    });
    output::lines(&Table::new(rows).to_string());

    output::section("Pairs");
    for (source, target) in ALLOWED_PAIRS {
        output::lines(&format!("{source} -> {target}"));
    }
}
