use chrono::Utc;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use crate::{
    errors::{AppError, AppResult},
    models::domain::PaymentEvent,
};

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "Stripe-Signature";

/// Verifies payment webhooks signed as `t=<unix>,v1=<hex hmac-sha256>` over
/// `"<t>.<raw body>"`.
pub struct PaymentVerifier {
    secret: SecretString,
    tolerance_secs: i64,
}

struct SignatureHeader {
    timestamp: i64,
    signatures: Vec<Vec<u8>>,
}

fn parse_header(header: &str) -> AppResult<SignatureHeader> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => timestamp = value.parse::<i64>().ok(),
            // Unknown schemes and undecodable values are skipped.
            "v1" => {
                if let Ok(bytes) = hex::decode(value) {
                    signatures.push(bytes);
                }
            }
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or_else(|| {
        AppError::PaymentVerificationError("signature header has no timestamp".to_string())
    })?;
    if signatures.is_empty() {
        return Err(AppError::PaymentVerificationError(
            "signature header has no v1 signature".to_string(),
        ));
    }

    Ok(SignatureHeader {
        timestamp,
        signatures,
    })
}

fn mac_for(secret: &str, timestamp: i64, payload: &[u8]) -> AppResult<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| AppError::InternalError(format!("invalid webhook secret: {}", e)))?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    Ok(mac)
}

/// Builds a signature header value for `payload`.
pub fn signature_header(secret: &str, payload: &[u8], timestamp: i64) -> AppResult<String> {
    let mac = mac_for(secret, timestamp, payload)?;
    Ok(format!(
        "t={},v1={}",
        timestamp,
        hex::encode(mac.finalize().into_bytes())
    ))
}

impl PaymentVerifier {
    pub fn new(secret: SecretString, tolerance_secs: i64) -> Self {
        Self {
            secret,
            tolerance_secs,
        }
    }

    pub fn verify(&self, payload: &[u8], header: Option<&str>) -> AppResult<PaymentEvent> {
        self.verify_at(payload, header, Utc::now().timestamp())
    }

    pub fn verify_at(
        &self,
        payload: &[u8],
        header: Option<&str>,
        now: i64,
    ) -> AppResult<PaymentEvent> {
        let header = header.ok_or_else(|| {
            AppError::PaymentVerificationError(format!("missing {} header", SIGNATURE_HEADER))
        })?;
        let parsed = parse_header(header)?;

        // The timestamp is unauthenticated here, so any overflow counts as out of range.
        let within_tolerance = now
            .checked_sub(parsed.timestamp)
            .and_then(i64::checked_abs)
            .is_some_and(|skew| skew <= self.tolerance_secs);
        if !within_tolerance {
            return Err(AppError::PaymentVerificationError(
                "signature timestamp outside tolerance".to_string(),
            ));
        }

        let secret = self.secret.expose_secret();
        let mut verified = false;
        for signature in &parsed.signatures {
            let mac = mac_for(secret, parsed.timestamp, payload)?;
            if mac.verify_slice(signature).is_ok() {
                verified = true;
                break;
            }
        }

        if !verified {
            return Err(AppError::PaymentVerificationError(
                "no signature matches the payload".to_string(),
            ));
        }

        PaymentEvent::from_json(payload)
    }
}
