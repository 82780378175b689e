//! Command-line interface definitions.
//!
//! One binary with a subcommand per workflow: quote a pair, generate and
//! sign an order, submit it to a filler, and simulate or execute a fill.

use std::path::PathBuf;

use alloy_primitives::Address;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::application::order::DEFAULT_EXPIRY_SECS;
use crate::domain::traits::MAX_FIELD_VALUE;

/// Build, sign, simulate, and submit 1inch limit orders on Polygon
#[derive(Parser, Debug)]
#[command(name = "lopctl")]
#[command(version, about)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Quote a conversion without signing anything
    Quote(PairArgs),

    /// Build and sign an order as the maker
    Generate(OrderArgs),

    /// Build, sign, and hand an order to the filler service
    Submit(SubmitArgs),

    /// Simulate (default) or execute a fill as the taker
    Fill(FillArgs),

    /// List supported tokens and trading pairs
    Tokens,

    /// Check an order file's hash and signature
    Verify(VerifyArgs),

    /// Show token balances and protocol allowances
    Wallet(WalletArgs),
}

/// Pair and amount. Missing values are prompted for.
#[derive(Args, Debug, Clone, Default)]
pub struct PairArgs {
    /// Token the maker sells (e.g. USDC)
    #[arg(long, value_name = "SYMBOL")]
    pub from: Option<String>,

    /// Token the maker receives (e.g. USDT)
    #[arg(long, value_name = "SYMBOL")]
    pub to: Option<String>,

    /// Amount of the source token, in whole tokens (e.g. 100 or 12.5)
    #[arg(long, value_name = "AMOUNT")]
    pub amount: Option<String>,

    /// Use the fixed rate instead of the filler's quote
    #[arg(long)]
    pub fixed: bool,
}

/// Options for building an order.
#[derive(Args, Debug, Clone)]
pub struct OrderArgs {
    #[command(flatten)]
    pub pair: PairArgs,

    /// Seconds until the order expires
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = DEFAULT_EXPIRY_SECS,
        value_parser = clap::value_parser!(u64).range(..=MAX_FIELD_VALUE),
        conflicts_with = "no_expiry"
    )]
    pub expires_in: u64,

    /// Never expire
    #[arg(long)]
    pub no_expiry: bool,

    /// Require the order to be filled in one go
    #[arg(long)]
    pub no_partial_fills: bool,

    /// Allow only one fill
    #[arg(long)]
    pub single_fill: bool,

    /// Nonce for series invalidation
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u64).range(..=MAX_FIELD_VALUE))]
    pub nonce: u64,

    /// Address receiving the taker asset (defaults to the maker)
    #[arg(long, value_name = "ADDRESS")]
    pub receiver: Option<Address>,

    /// Only this address may fill the order
    #[arg(long, value_name = "ADDRESS")]
    pub allowed_sender: Option<Address>,

    /// Write the order JSON here instead of stdout
    #[arg(long, short, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

/// Arguments for `lopctl submit`.
#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub order: OrderArgs,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

/// Arguments for `lopctl fill`.
#[derive(Args, Debug, Clone, Default)]
pub struct FillArgs {
    /// Order JSON to fill (defaults to ORDER_PATH, then stdin)
    #[arg(long, value_name = "PATH")]
    pub order: Option<PathBuf>,

    /// Broadcast the fill instead of simulating it
    #[arg(long)]
    pub execute: bool,
}

/// Arguments for `lopctl verify`.
#[derive(Args, Debug, Clone, Default)]
pub struct VerifyArgs {
    /// Order JSON to check (defaults to ORDER_PATH, then stdin)
    #[arg(long, value_name = "PATH")]
    pub order: Option<PathBuf>,

    /// Also compare against the contract's hashOrder
    #[arg(long)]
    pub onchain: bool,
}

/// Which configured key to act as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Role {
    #[default]
    Maker,
    Taker,
}

/// Arguments for `lopctl wallet`.
#[derive(Args, Debug, Clone, Default)]
pub struct WalletArgs {
    /// Account to report on
    #[arg(long, value_enum, default_value = "maker")]
    pub role: Role,

    /// Limit the report to one token
    #[arg(long, value_name = "SYMBOL")]
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "lopctl");
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from(["lopctl", "--json", "-q", "-vv", "tokens"]).unwrap();
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.color, ColorChoice::Auto));
        assert!(matches!(cli.command, Commands::Tokens));
    }

    #[test]
    fn test_parse_color_never() {
        let cli = Cli::try_parse_from(["lopctl", "--color", "never", "tokens"]).unwrap();
        assert!(matches!(cli.color, ColorChoice::Never));
    }

    #[test]
    fn test_parse_quote() {
        let cli = Cli::try_parse_from([
            "lopctl", "quote", "--from", "USDC", "--to", "USDT", "--amount", "100", "--fixed",
        ])
        .unwrap();
        let Commands::Quote(args) = cli.command else {
            panic!("expected quote");
        };
        assert_eq!(args.from.as_deref(), Some("USDC"));
        assert_eq!(args.to.as_deref(), Some("USDT"));
        assert_eq!(args.amount.as_deref(), Some("100"));
        assert!(args.fixed);
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["lopctl", "generate"]).unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.expires_in, DEFAULT_EXPIRY_SECS);
        assert!(!args.no_expiry);
        assert!(!args.no_partial_fills);
        assert!(args.pair.from.is_none());
        assert!(args.out.is_none());
    }

    #[test]
    fn test_generate_rejects_bad_receiver() {
        let result = Cli::try_parse_from(["lopctl", "generate", "--receiver", "0x12"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_expiry_flags_conflict() {
        let result = Cli::try_parse_from([
            "lopctl",
            "generate",
            "--expires-in",
            "60",
            "--no-expiry",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_order_fields_limited_to_40_bits() {
        for flag in ["--expires-in", "--nonce"] {
            let too_big = (MAX_FIELD_VALUE + 1).to_string();
            let result = Cli::try_parse_from(["lopctl", "generate", flag, too_big.as_str()]);
            assert!(result.is_err(), "{flag} accepted {too_big}");
        }

        let max = MAX_FIELD_VALUE.to_string();
        let cli = Cli::try_parse_from(["lopctl", "generate", "--nonce", max.as_str()]).unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.nonce, MAX_FIELD_VALUE);
    }

    #[test]
    fn test_submit_yes_flag() {
        let cli = Cli::try_parse_from(["lopctl", "submit", "-y", "--fixed"]).unwrap();
        let Commands::Submit(args) = cli.command else {
            panic!("expected submit");
        };
        assert!(args.yes);
        assert!(args.order.pair.fixed);
    }

    #[test]
    fn test_fill_simulates_by_default() {
        let cli = Cli::try_parse_from(["lopctl", "fill", "--order", "order.json"]).unwrap();
        let Commands::Fill(args) = cli.command else {
            panic!("expected fill");
        };
        assert!(!args.execute);
        assert_eq!(args.order, Some(PathBuf::from("order.json")));

        let cli = Cli::try_parse_from(["lopctl", "fill", "--execute"]).unwrap();
        assert!(matches!(cli.command, Commands::Fill(FillArgs { execute: true, .. })));
    }

    #[test]
    fn test_wallet_role() {
        let cli = Cli::try_parse_from(["lopctl", "wallet", "--role", "taker"]).unwrap();
        let Commands::Wallet(args) = cli.command else {
            panic!("expected wallet");
        };
        assert_eq!(args.role, Role::Taker);
        assert!(Cli::try_parse_from(["lopctl", "wallet", "--role", "admin"]).is_err());
    }
}
