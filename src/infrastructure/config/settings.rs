//! Application configuration loading and validation.
//!
//! [`Config`] is built once at process entry from the environment (after an
//! optional `.env` file is loaded) and handed to every workflow by reference.
//! Nothing reads the environment after that.
//!
//! Values every command needs are validated eagerly. Values only some
//! commands need (RPC URL, filler URL, keys) are stored as options and
//! resolved by accessors that each workflow calls before its first network
//! call, so a missing variable is reported before any side effect.
//!
//! # Example
//!
//! ```no_run
//! use lopctl::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     config.logging.init();
//!     let _rpc = config.rpc_url()?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use alloy_primitives::{address, Address};
use alloy_signer::Signer as _;
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::Eip712Domain;
use rust_decimal::Decimal;
use url::Url;

use super::logging::LoggingConfig;
use crate::domain::order::protocol_domain;
use crate::error::{ConfigError, Result};

pub const POLYGON_RPC_URL: &str = "POLYGON_RPC_URL";
pub const FILLER_API_URL: &str = "FILLER_API_URL";
pub const MAKER_PRIVATE_KEY: &str = "MAKER_PRIVATE_KEY";
pub const TAKER_PRIVATE_KEY: &str = "TAKER_PRIVATE_KEY";
pub const ORDER_PATH: &str = "ORDER_PATH";
pub const CHAIN_ID: &str = "CHAIN_ID";
pub const LOP_CONTRACT: &str = "LOP_CONTRACT";
pub const FIXED_QUOTE_RATE: &str = "FIXED_QUOTE_RATE";
pub const LOG_LEVEL: &str = "LOG_LEVEL";
pub const LOG_FORMAT: &str = "LOG_FORMAT";

/// Polygon PoS chain id.
pub const POLYGON_CHAIN_ID: u64 = 137;

/// Aggregation Router v6, which hosts Limit Order Protocol v4.
pub const DEFAULT_PROTOCOL_ADDRESS: Address = address!("111111125421cA6dc452d289314280a0f8842A65");

/// Output tokens per source token used by the fixed-rate quoter.
pub const DEFAULT_FIXED_RATE: &str = "0.99";

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    rpc_url: Option<Url>,
    filler_api_url: Option<Url>,
    maker_signer: Option<PrivateKeySigner>,
    taker_signer: Option<PrivateKeySigner>,
    /// Pre-built order JSON location.
    pub order_path: Option<PathBuf>,
    pub chain_id: u64,
    /// Limit order protocol contract (EIP-712 verifying contract).
    pub protocol_address: Address,
    pub fixed_quote_rate: Decimal,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if any present variable holds an invalid value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if any present variable holds an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let chain_id = match get(CHAIN_ID) {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                field: CHAIN_ID,
                reason: e.to_string(),
            })?,
            None => POLYGON_CHAIN_ID,
        };

        let protocol_address = match get(LOP_CONTRACT) {
            Some(raw) => Address::from_str(&raw).map_err(|e| ConfigError::InvalidValue {
                field: LOP_CONTRACT,
                reason: e.to_string(),
            })?,
            None => DEFAULT_PROTOCOL_ADDRESS,
        };

        let fixed_quote_rate = parse_rate(
            get(FIXED_QUOTE_RATE)
                .as_deref()
                .unwrap_or(DEFAULT_FIXED_RATE),
        )?;

        let defaults = LoggingConfig::default();
        let logging = LoggingConfig {
            level: get(LOG_LEVEL).unwrap_or(defaults.level),
            format: get(LOG_FORMAT).unwrap_or(defaults.format),
        };

        Ok(Self {
            rpc_url: get(POLYGON_RPC_URL)
                .map(|raw| parse_url(POLYGON_RPC_URL, &raw))
                .transpose()?,
            filler_api_url: get(FILLER_API_URL)
                .map(|raw| parse_url(FILLER_API_URL, &raw))
                .transpose()?,
            maker_signer: get(MAKER_PRIVATE_KEY)
                .map(|raw| parse_signer(MAKER_PRIVATE_KEY, &raw, chain_id))
                .transpose()?,
            taker_signer: get(TAKER_PRIVATE_KEY)
                .map(|raw| parse_signer(TAKER_PRIVATE_KEY, &raw, chain_id))
                .transpose()?,
            order_path: get(ORDER_PATH).map(PathBuf::from),
            chain_id,
            protocol_address,
            fixed_quote_rate,
            logging,
        })
    }

    /// JSON-RPC endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when `POLYGON_RPC_URL` is unset.
    pub fn rpc_url(&self) -> Result<&Url> {
        self.rpc_url.as_ref().ok_or_else(|| missing(POLYGON_RPC_URL))
    }

    /// Filler service base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when `FILLER_API_URL` is unset.
    pub fn filler_api_url(&self) -> Result<&Url> {
        self.filler_api_url
            .as_ref()
            .ok_or_else(|| missing(FILLER_API_URL))
    }

    /// Maker signer bound to the configured chain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when `MAKER_PRIVATE_KEY` is unset.
    pub fn maker_signer(&self) -> Result<&PrivateKeySigner> {
        self.maker_signer
            .as_ref()
            .ok_or_else(|| missing(MAKER_PRIVATE_KEY))
    }

    /// EIP-712 domain of the configured protocol deployment.
    #[must_use]
    pub fn domain(&self) -> Eip712Domain {
        protocol_domain(self.chain_id, self.protocol_address)
    }

    /// Taker signer bound to the configured chain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when `TAKER_PRIVATE_KEY` is unset.
    pub fn taker_signer(&self) -> Result<&PrivateKeySigner> {
        self.taker_signer
            .as_ref()
            .ok_or_else(|| missing(TAKER_PRIVATE_KEY))
    }
}

fn missing(field: &'static str) -> crate::error::Error {
    ConfigError::MissingField { field }.into()
}

fn parse_url(field: &'static str, raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| {
        ConfigError::InvalidValue {
            field,
            reason: e.to_string(),
        }
        .into()
    })
}

fn parse_signer(field: &'static str, raw: &str, chain_id: u64) -> Result<PrivateKeySigner> {
    let signer = PrivateKeySigner::from_str(raw).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: e.to_string(),
    })?;
    Ok(signer.with_chain_id(Some(chain_id)))
}

fn parse_rate(raw: &str) -> Result<Decimal> {
    let rate = Decimal::from_str(raw).map_err(|e| ConfigError::InvalidValue {
        field: FIXED_QUOTE_RATE,
        reason: e.to_string(),
    })?;
    if rate <= Decimal::ZERO {
        return Err(ConfigError::InvalidValue {
            field: FIXED_QUOTE_RATE,
            reason: "must be greater than 0".to_string(),
        }
        .into());
    }
    Ok(rate)
}
