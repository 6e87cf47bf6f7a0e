//! # Codec — base64url for authenticator buffers
//!
//! Every binary field that crosses the wire between the platform credential
//! API and the Lighthouse service travels as URL-safe, padding-free base64.
//!
//! Decoding is forgiving about *form* but strict about
//! *alphabet*: the URL-safe characters (`-`, `_`) are mapped back to their
//! standard equivalents (`+`, `/`), trailing `=` padding is optional, and
//! standard-alphabet input is accepted as-is. Anything else is rejected with
//! [`CodecError::MalformedEncoding`].
//!
//! ## Invariant
//!
//! `decode(&encode(b)) == b` for every byte sequence `b`, including empty.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine;

use crate::error::CodecError;

/// Standard-alphabet engine that accepts input with or without padding.
const RESTORED: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Encode raw bytes as URL-safe base64 without padding.
pub fn encode(buffer: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(buffer)
}

/// Decode URL-safe (or standard) base64 text back into raw bytes.
pub fn decode(text: &str) -> Result<Vec<u8>, CodecError> {
    let restored: String = text
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    RESTORED
        .decode(restored.as_bytes())
        .map_err(|e| CodecError::MalformedEncoding {
            input: truncate_for_error(text),
            reason: e.to_string(),
        })
}

fn truncate_for_error(text: &str) -> String {
    const MAX: usize = 32;
    if text.chars().count() <= MAX {
        text.to_string()
    } else {
        let head: String = text.chars().take(MAX).collect();
        format!("{head}...")
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Decoding an encoding always restores the original bytes.
        #[test]
        fn round_trip(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
            let text = encode(&bytes);
            prop_assert_eq!(decode(&text).unwrap(), bytes);
        }

        /// Encoded text never carries padding or standard-only characters.
        #[test]
        fn encoding_is_url_safe(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
            let text = encode(&bytes);
            prop_assert!(!text.contains('+'));
            prop_assert!(!text.contains('/'));
            prop_assert!(!text.contains('='));
        }

        /// Runs of bytes that hit `+`, `/` and padding in standard base64.
        #[test]
        fn round_trip_high_bytes(bytes in prop::collection::vec(0xf8u8..=0xff, 0..64)) {
            prop_assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
        }
    }
}
