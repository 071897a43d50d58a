//! # Preview Tokens
//!
//! Short-lived credentials that let someone view a page's unpublished
//! state.
//!
//! ```text
//! token = base64url(json {pageId, exp}) "." base64url(hmac_sha256(secret, payload))
//! ```
//!
//! `exp` is a unix timestamp in milliseconds. Verification fails closed:
//! a token with the wrong shape, bad encoding, bad signature or an expiry
//! in the past yields `None`. It never panics and never errors.

use crate::error::{StoreError, StoreResult};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use pagecraft_common::Config;
use serde::Deserialize;
use sha2::Sha256;
use tracing::{debug, warn};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreviewClaims {
    page_id: String,
    exp: i64,
}

#[derive(Clone)]
pub struct PreviewSigner {
    mac: HmacSha256,
    ttl: Duration,
}

impl PreviewSigner {
    /// Signer keyed with `secret`. An empty secret is refused.
    pub fn new(secret: impl AsRef<[u8]>, ttl: Duration) -> StoreResult<Self> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(StoreError::InvalidSecret);
        }
        let mac = HmacSha256::new_from_slice(secret).map_err(|_| StoreError::InvalidSecret)?;
        Ok(Self { mac, ttl })
    }

    /// Signer whose lifetime comes from `previewTtlSecs`. A lifetime that
    /// is not positive or does not fit a `Duration` falls back to the
    /// default one.
    pub fn from_config(secret: impl AsRef<[u8]>, config: &Config) -> StoreResult<Self> {
        let ttl = Some(config.preview_ttl_secs)
            .filter(|secs| *secs > 0)
            .and_then(Duration::try_seconds);
        let ttl = match ttl {
            Some(ttl) => ttl,
            None => {
                let fallback = Config::default().preview_ttl_secs;
                warn!(
                    configured = config.preview_ttl_secs,
                    fallback, "Preview lifetime out of range, using default"
                );
                Duration::seconds(fallback)
            }
        };
        Self::new(secret, ttl)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, page_id: &str) -> String {
        self.issue_at(page_id, Utc::now())
    }

    /// Issue a token as if the current time were `now`. An expiry past
    /// the representable range saturates.
    pub fn issue_at(&self, page_id: &str, now: DateTime<Utc>) -> String {
        let exp = now
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
            .timestamp_millis();
        let claims = serde_json::json!({ "pageId": page_id, "exp": exp });
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        let signature = URL_SAFE_NO_PAD.encode(self.sign(payload.as_bytes()));
        format!("{}.{}", payload, signature)
    }

    /// Page id the token grants access to, if it is authentic and unexpired
    pub fn verify(&self, token: &str) -> Option<String> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Option<String> {
        let Some((payload, signature)) = token.trim().split_once('.') else {
            debug!(reason = "shape", "Preview token rejected");
            return None;
        };

        let Ok(signature) = URL_SAFE_NO_PAD.decode(signature) else {
            debug!(reason = "signature encoding", "Preview token rejected");
            return None;
        };
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        if mac.verify_slice(&signature).is_err() {
            debug!(reason = "signature", "Preview token rejected");
            return None;
        }

        let claims = URL_SAFE_NO_PAD
            .decode(payload)
            .ok()
            .and_then(|bytes| serde_json::from_slice::<PreviewClaims>(&bytes).ok());
        let Some(claims) = claims else {
            debug!(reason = "payload", "Preview token rejected");
            return None;
        };

        if claims.exp < now.timestamp_millis() {
            debug!(reason = "expired", page_id = %claims.page_id, "Preview token rejected");
            return None;
        }
        if claims.page_id.is_empty() {
            debug!(reason = "empty page id", "Preview token rejected");
            return None;
        }

        Some(claims.page_id)
    }

    fn sign(&self, message: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(message);
        mac.finalize().into_bytes().to_vec()
    }
}

impl std::fmt::Debug for PreviewSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewSigner")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
