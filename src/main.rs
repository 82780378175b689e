use clap::Parser;

use lopctl::adapter::inbound::cli::command::{Cli, ColorChoice};
use lopctl::adapter::inbound::cli::output::{self, OutputConfig};
use lopctl::adapter::inbound::cli::run;
use lopctl::infrastructure::config::settings::Config;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            output::error(&e.to_string());
            std::process::exit(1);
        }
    };
    config.logging.clone().with_verbosity(cli.verbose).init();

    if let Err(e) = run::execute(&cli, &config).await {
        tracing::debug!(error = ?e, "Command failed");
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
