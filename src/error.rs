use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Input validation errors raised before anything touches the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must be greater than zero")]
    ZeroAmount { field: &'static str },

    #[error("invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: String },

    #[error("malformed signature: expected 130 hex characters, got {length}")]
    SignatureLength { length: usize },

    #[error("malformed signature: {0}")]
    SignatureHex(String),

    #[error("malformed signature: recovery byte {v} is not 0, 1, 27 or 28")]
    SignatureRecoveryId { v: u8 },

    #[error("unknown token: {0}")]
    UnknownToken(String),

    #[error("unsupported trading pair: {source_symbol} -> {output_symbol}")]
    UnsupportedPair {
        source_symbol: String,
        output_symbol: String,
    },

    #[error("invalid order field {field}: {reason}")]
    InvalidOrderField { field: &'static str, reason: String },

    #[error("order hash mismatch: record says {recorded}, fields hash to {computed}")]
    OrderHashMismatch { recorded: String, computed: String },

    #[error("invalid rate: {0}")]
    InvalidRate(String),

    #[error("order is signed by {signer}, but its maker is {maker}")]
    SignerMismatch { maker: String, signer: String },

    #[error("'{answer}' is not one of: {options}")]
    InvalidChoice { answer: String, options: String },

    #[error("order expired at unix time {expiration}")]
    OrderExpired { expiration: u64 },

    #[error("{field} {value} exceeds the maximum of {max}")]
    FieldOverflow {
        field: &'static str,
        value: u64,
        max: u64,
    },
}

/// Execution-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("transaction reverted: {reason}")]
    Reverted { reason: String },

    #[error("failed to sign: {0}")]
    SigningFailed(String),

    #[error("failed to submit transaction: {0}")]
    SubmissionFailed(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("filler rejected order: {reason}")]
    Rejected {
        reason: String,
        details: Option<String>,
    },

    #[error("quote failed: {0}")]
    QuoteFailed(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error("insufficient {token} balance: required {required}, available {available}")]
    InsufficientBalance {
        token: String,
        required: String,
        available: String,
    },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("prompt cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        // dialoguer::Error wraps an IO error
        Error::Io(std::io::Error::other(err.to_string()))
    }
}
