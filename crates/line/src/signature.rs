//! Webhook signature verification.
//!
//! LINE signs the raw request body with HMAC-SHA256 keyed by the channel
//! secret and sends the base64 digest in `x-line-signature`.

use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Outcome of a webhook signature check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureCheck {
    /// Signature matches the body.
    Valid,
    /// No signature header or no channel secret; nothing to verify.
    Skipped,
    /// Signature does not match.
    Invalid,
}

impl SignatureCheck {
    /// True unless the signature was present and wrong.
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

/// Computes the base64 HMAC-SHA256 signature of `body`.
#[must_use]
pub fn sign(secret: &str, body: &[u8]) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(body);
    Some(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Checks a webhook body against its signature header.
///
/// A missing header or secret skips the check.
#[must_use]
pub fn check_signature(secret: Option<&str>, signature: Option<&str>, body: &[u8]) -> SignatureCheck {
    let (Some(secret), Some(signature)) = (
        secret.filter(|s| !s.is_empty()),
        signature.filter(|s| !s.is_empty()),
    ) else {
        return SignatureCheck::Skipped;
    };

    let Ok(expected) = STANDARD.decode(signature.trim()) else {
        return SignatureCheck::Invalid;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return SignatureCheck::Invalid;
    };
    mac.update(body);
    if mac.verify_slice(&expected).is_ok() {
        SignatureCheck::Valid
    } else {
        SignatureCheck::Invalid
    }
}
