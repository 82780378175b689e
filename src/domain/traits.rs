//! Bit-packed maker and taker trait words.
//!
//! Layout of `makerTraits` (high to low):
//!
//! ```text
//! 255 NO_PARTIAL_FILLS   254 ALLOW_MULTIPLE_FILLS
//! [160..200) series  [120..160) nonce or epoch  [80..120) expiration
//! [0..80) low 80 bits of the allowed sender
//! ```
//!
//! `takerTraits` carries the MAKER_AMOUNT flag in bit 255 and the threshold
//! amount in its low 185 bits.

use alloy_primitives::{Address, U256};

use crate::error::ValidationError;

const NO_PARTIAL_FILLS_FLAG: usize = 255;
const ALLOW_MULTIPLE_FILLS_FLAG: usize = 254;

const ALLOWED_SENDER_BITS: usize = 80;
const EXPIRATION_OFFSET: usize = 80;
const NONCE_OR_EPOCH_OFFSET: usize = 120;
const SERIES_OFFSET: usize = 160;
const FIELD_BITS: usize = 40;

/// Largest value the expiration, nonce and series fields can hold.
pub const MAX_FIELD_VALUE: u64 = (1 << FIELD_BITS) - 1;

const MAKER_AMOUNT_FLAG: usize = 255;
const THRESHOLD_BITS: usize = 185;

fn low_mask(bits: usize) -> U256 {
    (U256::from(1u8) << bits) - U256::from(1u8)
}

/// Maker-side order options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MakerTraits(U256);

impl Default for MakerTraits {
    /// Partial and multiple fills allowed, no expiration, any sender.
    fn default() -> Self {
        Self(U256::ZERO).with_multiple_fills(true)
    }
}

impl MakerTraits {
    #[must_use]
    pub const fn from_raw(value: U256) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn into_raw(self) -> U256 {
        self.0
    }

    fn with_field(
        self,
        field: &'static str,
        offset: usize,
        value: u64,
    ) -> Result<Self, ValidationError> {
        if value > MAX_FIELD_VALUE {
            return Err(ValidationError::FieldOverflow {
                field,
                value,
                max: MAX_FIELD_VALUE,
            });
        }
        let mask = low_mask(FIELD_BITS) << offset;
        Ok(Self((self.0 & !mask) | (U256::from(value) << offset)))
    }

    fn field(self, offset: usize) -> u64 {
        let value = (self.0 >> offset) & low_mask(FIELD_BITS);
        value.to::<u64>()
    }

    fn with_flag(self, bit: usize, set: bool) -> Self {
        let mut raw = self.0;
        raw.set_bit(bit, set);
        Self(raw)
    }

    /// Unix timestamp after which the order can no longer be filled. Zero means never.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::FieldOverflow`] above [`MAX_FIELD_VALUE`].
    pub fn with_expiration(self, timestamp: u64) -> Result<Self, ValidationError> {
        self.with_field("expiration", EXPIRATION_OFFSET, timestamp)
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::FieldOverflow`] above [`MAX_FIELD_VALUE`].
    pub fn with_nonce(self, nonce: u64) -> Result<Self, ValidationError> {
        self.with_field("nonce", NONCE_OR_EPOCH_OFFSET, nonce)
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::FieldOverflow`] above [`MAX_FIELD_VALUE`].
    pub fn with_series(self, series: u64) -> Result<Self, ValidationError> {
        self.with_field("series", SERIES_OFFSET, series)
    }

    /// Restrict fills to one taker. Only the low 80 bits of the address are kept.
    #[must_use]
    pub fn with_allowed_sender(self, sender: Address) -> Self {
        let sender = U256::from_be_slice(sender.as_slice()) & low_mask(ALLOWED_SENDER_BITS);
        Self((self.0 & !low_mask(ALLOWED_SENDER_BITS)) | sender)
    }

    #[must_use]
    pub fn with_partial_fills(self, allowed: bool) -> Self {
        self.with_flag(NO_PARTIAL_FILLS_FLAG, !allowed)
    }

    #[must_use]
    pub fn with_multiple_fills(self, allowed: bool) -> Self {
        self.with_flag(ALLOW_MULTIPLE_FILLS_FLAG, allowed)
    }

    #[must_use]
    pub fn expiration(self) -> u64 {
        self.field(EXPIRATION_OFFSET)
    }

    #[must_use]
    pub fn nonce(self) -> u64 {
        self.field(NONCE_OR_EPOCH_OFFSET)
    }

    #[must_use]
    pub fn series(self) -> u64 {
        self.field(SERIES_OFFSET)
    }

    /// Low 80 bits of the allowed sender, zero when anyone may fill.
    #[must_use]
    pub fn allowed_sender(self) -> U256 {
        self.0 & low_mask(ALLOWED_SENDER_BITS)
    }

    #[must_use]
    pub fn allows_partial_fills(self) -> bool {
        !self.0.bit(NO_PARTIAL_FILLS_FLAG)
    }

    #[must_use]
    pub fn allows_multiple_fills(self) -> bool {
        self.0.bit(ALLOW_MULTIPLE_FILLS_FLAG)
    }

    /// True when an expiration is set and `now` is past it.
    #[must_use]
    pub fn is_expired(self, now: u64) -> bool {
        let expiration = self.expiration();
        expiration != 0 && now > expiration
    }
}

/// Taker-side fill options passed alongside `fillOrder`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TakerTraits(U256);

impl TakerTraits {
    /// Interpret the fill `amount` as a making amount instead of a taking amount.
    #[must_use]
    pub fn with_maker_amount(self) -> Self {
        let mut raw = self.0;
        raw.set_bit(MAKER_AMOUNT_FLAG, true);
        Self(raw)
    }

    /// Upper bound on the taking amount (or lower bound on the making amount).
    #[must_use]
    pub fn with_threshold(self, threshold: U256) -> Self {
        let mask = low_mask(THRESHOLD_BITS);
        Self((self.0 & !mask) | (threshold & mask))
    }

    #[must_use]
    pub fn is_maker_amount(self) -> bool {
        self.0.bit(MAKER_AMOUNT_FLAG)
    }

    #[must_use]
    pub fn threshold(self) -> U256 {
        self.0 & low_mask(THRESHOLD_BITS)
    }

    #[must_use]
    pub const fn into_raw(self) -> U256 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn default_allows_partial_and_multiple_fills() {
        let traits = MakerTraits::default();
        assert!(traits.allows_partial_fills());
        assert!(traits.allows_multiple_fills());
        assert_eq!(traits.expiration(), 0);
        assert_eq!(traits.allowed_sender(), U256::ZERO);
    }

    #[test]
    fn fields_round_trip_independently() {
        let traits = MakerTraits::default()
            .with_expiration(1_760_000_000)
            .and_then(|t| t.with_nonce(42))
            .and_then(|t| t.with_series(7))
            .unwrap()
            .with_partial_fills(false);

        assert_eq!(traits.expiration(), 1_760_000_000);
        assert_eq!(traits.nonce(), 42);
        assert_eq!(traits.series(), 7);
        assert!(!traits.allows_partial_fills());
        assert!(traits.allows_multiple_fills());
    }

    #[test]
    fn overwriting_a_field_clears_previous_value() {
        let traits = MakerTraits::default()
            .with_expiration(MAX_FIELD_VALUE)
            .and_then(|t| t.with_expiration(5))
            .unwrap();
        assert_eq!(traits.expiration(), 5);
        assert_eq!(traits.nonce(), 0);
    }

    #[test]
    fn field_limit_is_inclusive() {
        let traits = MakerTraits::default()
            .with_nonce(MAX_FIELD_VALUE)
            .unwrap();
        assert_eq!(traits.nonce(), MAX_FIELD_VALUE);
        assert_eq!(traits.expiration(), 0);
        assert_eq!(traits.series(), 0);
    }

    #[test]
    fn values_wider_than_40_bits_are_rejected() {
        let too_big = MAX_FIELD_VALUE + 1;
        assert_eq!(
            MakerTraits::default().with_expiration(too_big).unwrap_err(),
            ValidationError::FieldOverflow {
                field: "expiration",
                value: too_big,
                max: MAX_FIELD_VALUE,
            }
        );
        assert!(matches!(
            MakerTraits::default().with_nonce(u64::MAX),
            Err(ValidationError::FieldOverflow { field: "nonce", .. })
        ));
        assert!(matches!(
            MakerTraits::default().with_series(too_big),
            Err(ValidationError::FieldOverflow { field: "series", .. })
        ));
    }

    #[test]
    fn expiration_occupies_bits_80_to_120() {
        let traits = MakerTraits::from_raw(U256::ZERO).with_expiration(1).unwrap();
        assert_eq!(traits.into_raw(), U256::from(1u8) << 80);
    }

    #[test]
    fn no_partial_fills_sets_top_bit() {
        let traits = MakerTraits::from_raw(U256::ZERO).with_partial_fills(false);
        assert_eq!(traits.into_raw(), U256::from(1u8) << 255);
    }

    #[test]
    fn allowed_sender_keeps_low_80_bits() {
        let sender = address!("00000000000000000000ffffffffffffffffffff");
        let traits = MakerTraits::default().with_allowed_sender(sender);
        assert_eq!(traits.allowed_sender(), low_mask(80));
        assert_eq!(traits.expiration(), 0);
    }

    #[test]
    fn expiry_check() {
        let traits = MakerTraits::default().with_expiration(100).unwrap();
        assert!(!traits.is_expired(100));
        assert!(traits.is_expired(101));
        assert!(!MakerTraits::default().is_expired(u64::MAX));
    }

    #[test]
    fn taker_traits_flag_and_threshold() {
        let traits = TakerTraits::default()
            .with_maker_amount()
            .with_threshold(U256::from(1_000u64));
        assert!(traits.is_maker_amount());
        assert_eq!(traits.threshold(), U256::from(1_000u64));
        assert_eq!(
            traits.into_raw(),
            (U256::from(1u8) << 255) | U256::from(1_000u64)
        );
    }

    #[test]
    fn default_taker_traits_are_zero() {
        let traits = TakerTraits::default();
        assert!(!traits.is_maker_amount());
        assert_eq!(traits.into_raw(), U256::ZERO);
    }
}
