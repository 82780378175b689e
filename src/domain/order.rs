//! Limit order data model, EIP-712 hashing, and signing.
//!
//! [`Order`] is plain data. Signing is a separate step that takes a signer by
//! reference and produces an immutable [`SignedOrder`]; key material never
//! lives on the order itself.

use std::str::FromStr;

use alloy_primitives::{Address, Signature, B256, U256};
use alloy_signer::SignerSync;
use alloy_sol_types::{eip712_domain, sol, Eip712Domain, SolStruct};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::amount::parse_base_units;
use super::signature::{parse_signature_hex, CompactSignature};
use super::token::TradingPair;
use super::traits::MakerTraits;
use crate::error::{ExecutionError, Result, ValidationError};

/// EIP-712 domain name of the Aggregation Router v6 deployment.
pub const DOMAIN_NAME: &str = "1inch Aggregation Router";

/// EIP-712 domain version of the Aggregation Router v6 deployment.
pub const DOMAIN_VERSION: &str = "6";

/// Salt bits used when the order carries no extension.
const SALT_BITS: usize = 96;

sol! {
    /// Limit order as hashed under EIP-712.
    #[derive(Debug, PartialEq, Eq)]
    struct Order {
        uint256 salt;
        address maker;
        address receiver;
        address makerAsset;
        address takerAsset;
        uint256 makingAmount;
        uint256 takingAmount;
        uint256 makerTraits;
    }
}

/// Build the signing domain for a protocol deployment.
#[must_use]
pub fn protocol_domain(chain_id: u64, contract: Address) -> Eip712Domain {
    eip712_domain! {
        name: DOMAIN_NAME,
        version: DOMAIN_VERSION,
        chain_id: chain_id,
        verifying_contract: contract,
    }
}

/// Protocol order hash: the EIP-712 signing hash of `order` under `domain`.
#[must_use]
pub fn order_hash(order: &Order, domain: &Eip712Domain) -> B256 {
    order.eip712_signing_hash(domain)
}

/// Random salt for an order without extensions.
#[must_use]
pub fn random_salt() -> U256 {
    let value: u128 = rand::thread_rng().gen();
    U256::from(value) & ((U256::from(1u8) << SALT_BITS) - U256::from(1u8))
}

/// Inputs for a new order, before a salt is chosen.
#[derive(Debug, Clone)]
pub struct OrderParams {
    pub pair: TradingPair,
    pub maker: Address,
    /// Zero means proceeds go to the maker.
    pub receiver: Address,
    pub making_amount: U256,
    pub taking_amount: U256,
    pub traits: MakerTraits,
}

impl OrderParams {
    /// Assemble the order struct.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroAmount`] if either amount is zero.
    pub fn build(&self, salt: U256) -> std::result::Result<Order, ValidationError> {
        if self.making_amount.is_zero() {
            return Err(ValidationError::ZeroAmount {
                field: "makingAmount",
            });
        }
        if self.taking_amount.is_zero() {
            return Err(ValidationError::ZeroAmount {
                field: "takingAmount",
            });
        }

        Ok(Order {
            salt,
            maker: self.maker,
            receiver: self.receiver,
            makerAsset: self.pair.source.address,
            takerAsset: self.pair.output.address,
            makingAmount: self.making_amount,
            takingAmount: self.taking_amount,
            makerTraits: self.traits.into_raw(),
        })
    }
}

/// An order together with the maker's signature over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedOrder {
    order: Order,
    signature: [u8; 65],
    order_hash: B256,
}

impl SignedOrder {
    #[must_use]
    pub fn order(&self) -> &Order {
        &self.order
    }

    #[must_use]
    pub fn order_hash(&self) -> B256 {
        self.order_hash
    }

    #[must_use]
    pub fn signature(&self) -> &[u8; 65] {
        &self.signature
    }

    /// 0x-prefixed hex of the 65-byte `(r, s, v)` signature.
    #[must_use]
    pub fn signature_hex(&self) -> String {
        format!("0x{}", alloy_primitives::hex::encode(self.signature))
    }

    #[must_use]
    pub fn compact_signature(&self) -> CompactSignature {
        CompactSignature::from_bytes(&self.signature)
    }

    #[must_use]
    pub fn maker_traits(&self) -> MakerTraits {
        MakerTraits::from_raw(self.order.makerTraits)
    }

    /// Recover the address that produced the signature.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the signature bytes are not recoverable.
    pub fn recover_signer(&self) -> Result<Address> {
        let signature = Signature::from_raw(&self.signature)
            .map_err(|e| ValidationError::SignatureHex(e.to_string()))?;
        let signer = signature
            .recover_address_from_prehash(&self.order_hash)
            .map_err(|e| ValidationError::SignatureHex(e.to_string()))?;
        Ok(signer)
    }

    /// Serializable record of this order.
    #[must_use]
    pub fn to_record(&self) -> OrderRecord {
        OrderRecord {
            order_hash: self.order_hash.to_string(),
            signature: self.signature_hex(),
            order: OrderFields::from(&self.order),
        }
    }

    /// Rebuild a signed order from its record, re-deriving the hash under `domain`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed fields, a malformed signature,
    /// or a recorded hash that does not match the fields.
    pub fn from_record(record: &OrderRecord, domain: &Eip712Domain) -> Result<Self> {
        let order = record.order.to_order()?;
        let signature = parse_signature_hex(&record.signature)?;

        let computed = order_hash(&order, domain);
        let recorded =
            B256::from_str(&record.order_hash).map_err(|e| ValidationError::InvalidOrderField {
                field: "orderHash",
                reason: e.to_string(),
            })?;
        if recorded != computed {
            return Err(ValidationError::OrderHashMismatch {
                recorded: recorded.to_string(),
                computed: computed.to_string(),
            }
            .into());
        }

        Ok(Self {
            order,
            signature,
            order_hash: computed,
        })
    }
}

/// Sign `order` under `domain`.
///
/// # Errors
///
/// Returns [`ExecutionError::SigningFailed`] if the signer fails.
pub fn sign_order<S>(order: Order, domain: &Eip712Domain, signer: &S) -> Result<SignedOrder>
where
    S: SignerSync + ?Sized,
{
    let hash = order_hash(&order, domain);
    let signature = signer
        .sign_hash_sync(&hash)
        .map_err(|e| ExecutionError::SigningFailed(e.to_string()))?;

    Ok(SignedOrder {
        order,
        signature: signature.as_bytes(),
        order_hash: hash,
    })
}

/// Order JSON document: `{orderHash, signature, order}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub order_hash: String,
    pub signature: String,
    pub order: OrderFields,
}

/// Order fields as transported: numerics are decimal strings, addresses are
/// checksummed hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFields {
    pub salt: String,
    pub maker: String,
    pub receiver: String,
    pub maker_asset: String,
    pub taker_asset: String,
    pub making_amount: String,
    pub taking_amount: String,
    pub maker_traits: String,
}

impl From<&Order> for OrderFields {
    fn from(order: &Order) -> Self {
        Self {
            salt: order.salt.to_string(),
            maker: order.maker.to_checksum(None),
            receiver: order.receiver.to_checksum(None),
            maker_asset: order.makerAsset.to_checksum(None),
            taker_asset: order.takerAsset.to_checksum(None),
            making_amount: order.makingAmount.to_string(),
            taking_amount: order.takingAmount.to_string(),
            maker_traits: order.makerTraits.to_string(),
        }
    }
}

impl OrderFields {
    /// Parse and validate every field.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidOrderField`] naming the first bad
    /// field, or [`ValidationError::ZeroAmount`] for a zero amount.
    pub fn to_order(&self) -> std::result::Result<Order, ValidationError> {
        let number = |field: &'static str, value: &str| {
            parse_base_units(value).map_err(|e| ValidationError::InvalidOrderField {
                field,
                reason: e.to_string(),
            })
        };
        let address = |field: &'static str, value: &str| {
            Address::from_str(value).map_err(|e| ValidationError::InvalidOrderField {
                field,
                reason: e.to_string(),
            })
        };

        let order = Order {
            salt: number("salt", &self.salt)?,
            maker: address("maker", &self.maker)?,
            receiver: address("receiver", &self.receiver)?,
            makerAsset: address("makerAsset", &self.maker_asset)?,
            takerAsset: address("takerAsset", &self.taker_asset)?,
            makingAmount: number("makingAmount", &self.making_amount)?,
            takingAmount: number("takingAmount", &self.taking_amount)?,
            makerTraits: number("makerTraits", &self.maker_traits)?,
        };

        if order.makingAmount.is_zero() {
            return Err(ValidationError::ZeroAmount {
                field: "makingAmount",
            });
        }
        if order.takingAmount.is_zero() {
            return Err(ValidationError::ZeroAmount {
                field: "takingAmount",
            });
        }
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::token::{USDC, USDT};
    use alloy_primitives::{address, keccak256};
    use alloy_signer_local::PrivateKeySigner;

    const LOP: Address = address!("111111125421cA6dc452d289314280a0f8842A65");

    // Anvil's first development key.
    const MAKER_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn signer() -> PrivateKeySigner {
        MAKER_KEY.parse().unwrap()
    }

    fn params(maker: Address) -> OrderParams {
        OrderParams {
            pair: TradingPair::new(USDC, USDT).unwrap(),
            maker,
            receiver: Address::ZERO,
            making_amount: U256::from(100_000_000u64),
            taking_amount: U256::from(99_000_000u64),
            traits: MakerTraits::default().with_expiration(1_900_000_000).unwrap(),
        }
    }

    fn signed() -> SignedOrder {
        let signer = signer();
        let order = params(signer.address()).build(U256::from(12345u64)).unwrap();
        sign_order(order, &protocol_domain(137, LOP), &signer).unwrap()
    }

    #[test]
    fn order_type_hash_matches_protocol() {
        let expected = keccak256(
            "Order(uint256 salt,address maker,address receiver,address makerAsset,\
             address takerAsset,uint256 makingAmount,uint256 takingAmount,uint256 makerTraits)",
        );
        let order = params(Address::ZERO).build(U256::ZERO).unwrap();
        assert_eq!(order.eip712_type_hash(), expected);
    }

    #[test]
    fn build_maps_pair_to_assets() {
        let order = params(Address::ZERO).build(U256::from(7u64)).unwrap();
        assert_eq!(order.makerAsset, USDC.address);
        assert_eq!(order.takerAsset, USDT.address);
        assert_eq!(order.salt, U256::from(7u64));
        assert_eq!(MakerTraits::from_raw(order.makerTraits).expiration(), 1_900_000_000);
    }

    #[test]
    fn build_rejects_zero_amounts() {
        let mut p = params(Address::ZERO);
        p.making_amount = U256::ZERO;
        assert_eq!(
            p.build(U256::ZERO).unwrap_err(),
            ValidationError::ZeroAmount {
                field: "makingAmount"
            }
        );

        let mut p = params(Address::ZERO);
        p.taking_amount = U256::ZERO;
        assert_eq!(
            p.build(U256::ZERO).unwrap_err(),
            ValidationError::ZeroAmount {
                field: "takingAmount"
            }
        );
    }

    #[test]
    fn hash_depends_on_domain() {
        let order = params(Address::ZERO).build(U256::from(1u64)).unwrap();
        let polygon = order_hash(&order, &protocol_domain(137, LOP));
        let mainnet = order_hash(&order, &protocol_domain(1, LOP));
        assert_ne!(polygon, mainnet);
        assert_eq!(polygon, order_hash(&order, &protocol_domain(137, LOP)));
    }

    #[test]
    fn hash_is_not_the_salt() {
        let order = signed();
        assert_ne!(order.order_hash(), B256::from(order.order().salt));
    }

    #[test]
    fn signature_recovers_maker() {
        let order = signed();
        assert_eq!(order.recover_signer().unwrap(), signer().address());
        let v = order.signature()[64];
        assert!(v == 27 || v == 28);
    }

    #[test]
    fn record_round_trips_through_json() {
        let order = signed();
        let json = serde_json::to_string(&order.to_record()).unwrap();
        assert!(json.contains("\"orderHash\""));
        assert!(json.contains("\"makingAmount\":\"100000000\""));
        assert!(json.contains("\"takingAmount\":\"99000000\""));

        let record: OrderRecord = serde_json::from_str(&json).unwrap();
        let back = SignedOrder::from_record(&record, &protocol_domain(137, LOP)).unwrap();
        assert_eq!(back, order);
    }

    #[test]
    fn tampered_record_is_rejected() {
        let mut record = signed().to_record();
        record.order.taking_amount = "1".into();
        let err = SignedOrder::from_record(&record, &protocol_domain(137, LOP)).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Validation(ValidationError::OrderHashMismatch { .. })
        ));
    }

    #[test]
    fn short_signature_in_record_is_rejected() {
        let mut record = signed().to_record();
        record.signature = "0xdead".into();
        let err = SignedOrder::from_record(&record, &protocol_domain(137, LOP)).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Validation(ValidationError::SignatureLength { length: 4 })
        ));
    }

    #[test]
    fn record_with_zero_one_recovery_byte_is_normalized() {
        let order = signed();
        let v = order.signature()[64];
        let mut raw = *order.signature();
        raw[64] = v - 27;
        let mut record = order.to_record();
        record.signature = alloy_primitives::hex::encode_prefixed(raw);

        let back = SignedOrder::from_record(&record, &protocol_domain(137, LOP)).unwrap();
        assert_eq!(back.signature()[64], v);
        assert_eq!(back.compact_signature(), order.compact_signature());
        assert_eq!(back.recover_signer().unwrap(), signer().address());
    }

    #[test]
    fn record_with_unknown_recovery_byte_is_rejected() {
        let order = signed();
        let mut raw = *order.signature();
        raw[64] = 5;
        let mut record = order.to_record();
        record.signature = alloy_primitives::hex::encode_prefixed(raw);

        let err = SignedOrder::from_record(&record, &protocol_domain(137, LOP)).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Validation(ValidationError::SignatureRecoveryId { v: 5 })
        ));
    }

    #[test]
    fn malformed_field_names_the_field() {
        let mut fields = signed().to_record().order;
        fields.maker_asset = "not-an-address".into();
        assert!(matches!(
            fields.to_order(),
            Err(ValidationError::InvalidOrderField {
                field: "makerAsset",
                ..
            })
        ));
    }

    #[test]
    fn random_salt_fits_in_96_bits() {
        for _ in 0..32 {
            assert!(random_salt() < (U256::from(1u8) << 96));
        }
    }

    #[test]
    fn compact_signature_matches_raw_parity() {
        let order = signed();
        let (_, _, v) = order.compact_signature().expand();
        assert_eq!(v, order.signature()[64]);
    }
}
