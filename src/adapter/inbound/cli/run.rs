//! Command dispatch.

use chrono::Utc;
use tracing::debug;

use super::command::{Cli, Commands};
use super::{fill, generate, quote, submit, tokens, verify, wallet};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Current unix time in seconds. Clocks before the epoch read as zero.
#[must_use]
pub fn unix_now() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or_default()
}

/// Run the selected subcommand.
pub async fn execute(cli: &Cli, config: &Config) -> Result<()> {
    debug!(
        chain_id = config.chain_id,
        protocol = %config.protocol_address,
        "Dispatching command"
    );
    match &cli.command {
        Commands::Quote(args) => quote::execute(args, config).await,
        Commands::Generate(args) => generate::execute(args, config).await,
        Commands::Submit(args) => submit::execute(args, config).await,
        Commands::Fill(args) => fill::execute(args, config).await,
        Commands::Tokens => {
            tokens::execute();
            Ok(())
        }
        Commands::Verify(args) => verify::execute(args, config).await,
        Commands::Wallet(args) => wallet::execute(args, config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_now_is_after_2024() {
        assert!(unix_now() > 1_704_067_200);
    }
}
