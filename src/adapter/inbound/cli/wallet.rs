//! Handler for the `wallet` command.

use serde_json::json;
use tabled::{Table, Tabled};

use super::command::{Role, WalletArgs};
use super::output;
use crate::adapter::outbound::evm::EvmClient;
use crate::domain::amount::format_token_amount;
use crate::domain::token::{self, Token, TOKENS};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::ledger::TokenLedger;

#[derive(Tabled)]
struct BalanceRow {
    #[tabled(rename = "Token")]
    token: &'static str,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Allowance")]
    allowance: String,
}

/// Report balances and protocol allowances for the maker or taker key.
pub async fn execute(args: &WalletArgs, config: &Config) -> Result<()> {
    let signer = match args.role {
        Role::Maker => config.maker_signer()?,
        Role::Taker => config.taker_signer()?,
    };
    let rpc_url = config.rpc_url()?;
    let tokens: Vec<Token> = match &args.token {
        Some(symbol) => vec![token::by_symbol(symbol)?],
        None => TOKENS.to_vec(),
    };

    let client = EvmClient::connect(rpc_url, signer.clone(), config.protocol_address);
    let account = client.account();
    let spender = config.protocol_address;

    let pb = output::spinner("Reading balances...");
    let mut rows = Vec::with_capacity(tokens.len());
    for token in &tokens {
        let read = async {
            let balance = client.balance_of(token, account).await?;
            let allowance = client.allowance(token, account, spender).await?;
            Ok::<_, crate::error::Error>((balance, allowance))
        };
        match read.await {
            Ok((balance, allowance)) => rows.push((*token, balance, allowance)),
            Err(e) => {
                output::spinner_fail(&pb, &format!("Failed to read {token}"));
                return Err(e);
            }
        }
    }
    output::spinner_success(&pb, "Read balances");

    if output::is_json() {
        let payload: Vec<_> = rows
            .iter()
            .map(|(token, balance, allowance)| {
                json!({
                    "token": token.symbol,
                    "balance": balance.to_string(),
                    "allowance": allowance.to_string(),
                })
            })
            .collect();
        output::json_output(json!({
            "type": "wallet",
            "payload": { "account": account.to_string(), "spender": spender.to_string(), "tokens": payload },
        }));
        return Ok(());
    }

    output::section("Wallet");
    output::field("Account", account);
    output::field("Spender", spender);
    let table = Table::new(rows.iter().map(|(token, balance, allowance)| BalanceRow {
        token: token.symbol,
        balance: format_token_amount(*balance, token.decimals),
        allowance: format_token_amount(*allowance, token.decimals),
    }));
    output::lines(&table.to_string());
    Ok(())
}
