//! Reading and writing order JSON documents.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use alloy_sol_types::Eip712Domain;
use tracing::debug;

use crate::domain::order::{OrderRecord, SignedOrder};
use crate::error::Result;

/// Where an order document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderSource {
    File(PathBuf),
    Stdin,
}

impl OrderSource {
    /// An explicit path wins over the configured default; stdin is last.
    #[must_use]
    pub fn pick(explicit: Option<&Path>, configured: Option<&Path>) -> Self {
        match explicit.or(configured) {
            Some(path) => Self::File(path.to_path_buf()),
            None => Self::Stdin,
        }
    }

    fn read(&self) -> Result<String> {
        match self {
            Self::File(path) => Ok(fs::read_to_string(path)?),
            Self::Stdin => {
                let mut text = String::new();
                io::stdin().read_to_string(&mut text)?;
                Ok(text)
            }
        }
    }
}

impl std::fmt::Display for OrderSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdin => f.write_str("stdin"),
        }
    }
}

/// Parse an order document and check its hash under `domain`.
///
/// # Errors
///
/// Returns a JSON error for malformed documents and a validation error for
/// bad fields, a bad signature, or a hash mismatch.
pub fn parse_order(text: &str, domain: &Eip712Domain) -> Result<SignedOrder> {
    let record: OrderRecord = serde_json::from_str(text)?;
    SignedOrder::from_record(&record, domain)
}

/// Load and check an order from `source`.
///
/// # Errors
///
/// Returns an IO error if the source cannot be read, or any [`parse_order`] error.
pub fn load_order(source: &OrderSource, domain: &Eip712Domain) -> Result<SignedOrder> {
    debug!(source = %source, "Loading order");
    parse_order(&source.read()?, domain)
}

/// Write the order's JSON record to `path`.
///
/// # Errors
///
/// Returns an IO or JSON error.
pub fn write_order(path: &Path, signed: &SignedOrder) -> Result<()> {
    let json = serde_json::to_string_pretty(&signed.to_record())?;
    fs::write(path, format!("{json}\n"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ValidationError};
    use crate::testkit::domain::{domain, signed_order};

    #[test]
    fn explicit_path_wins() {
        let explicit = PathBuf::from("a.json");
        let configured = PathBuf::from("b.json");
        assert_eq!(
            OrderSource::pick(Some(&explicit), Some(&configured)),
            OrderSource::File(explicit)
        );
        assert_eq!(
            OrderSource::pick(None, Some(&configured)),
            OrderSource::File(configured)
        );
        assert_eq!(OrderSource::pick(None, None), OrderSource::Stdin);
    }

    #[test]
    fn written_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order.json");
        let order = signed_order();

        write_order(&path, &order).unwrap();
        let loaded = load_order(&OrderSource::File(path), &domain()).unwrap();
        assert_eq!(loaded, order);
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(
            parse_order("{\"orderHash\": 1}", &domain()),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn wrong_domain_is_a_hash_mismatch() {
        let json = serde_json::to_string(&signed_order().to_record()).unwrap();
        let other = crate::domain::order::protocol_domain(1, crate::testkit::domain::PROTOCOL);
        assert!(matches!(
            parse_order(&json, &other),
            Err(Error::Validation(ValidationError::OrderHashMismatch { .. }))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let source = OrderSource::File(PathBuf::from("/nonexistent/order.json"));
        assert!(matches!(load_order(&source, &domain()), Err(Error::Io(_))));
    }
}
