//! One-shot notices carried across a redirect in a signed cookie.
//!
//! Cookie value: `base64url(json).base64url(hmac_sha256(secret, json_part))`.

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Redirect, Response};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

pub const FLASH_COOKIE: &str = "clinicdb_flash";
const MAX_TOKEN_LEN: usize = 2048;

#[derive(Error, Debug)]
pub enum FlashError {
    #[error("Malformed notice cookie")]
    Malformed,

    #[error("Notice signature mismatch")]
    BadSignature,

    #[error("Notice payload invalid: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Signing key rejected: {0}")]
    Key(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub category: String,
    pub message: String,
}

impl Notice {
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            category: "danger".to_string(),
            message: message.into(),
        }
    }
}

pub struct FlashSigner {
    secret: Vec<u8>,
}

impl FlashSigner {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    pub fn seal(&self, notice: &Notice) -> Result<String, FlashError> {
        let payload_part = URL_SAFE_NO_PAD.encode(serde_json::to_vec(notice)?);
        let mut mac = self.mac()?;
        mac.update(payload_part.as_bytes());
        let sig_part = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        Ok(format!("{payload_part}.{sig_part}"))
    }

    pub fn open(&self, token: &str) -> Result<Notice, FlashError> {
        if token.len() > MAX_TOKEN_LEN {
            return Err(FlashError::Malformed);
        }
        let (payload_part, sig_part) = token.split_once('.').ok_or(FlashError::Malformed)?;
        let expected = URL_SAFE_NO_PAD
            .decode(sig_part)
            .map_err(|_| FlashError::Malformed)?;

        let mut mac = self.mac()?;
        mac.update(payload_part.as_bytes());
        mac.verify_slice(&expected)
            .map_err(|_| FlashError::BadSignature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_part)
            .map_err(|_| FlashError::Malformed)?;
        Ok(serde_json::from_slice(&payload)?)
    }

    /// Notice carried by the request, if any, and whether a notice cookie
    /// was present at all (so the response knows to clear it).
    pub fn take(&self, headers: &HeaderMap) -> (Option<Notice>, bool) {
        let Some(token) = cookie_value(headers, FLASH_COOKIE) else {
            return (None, false);
        };
        match self.open(&token) {
            Ok(notice) => (Some(notice), true),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring notice cookie");
                (None, true)
            }
        }
    }

    /// Redirect to `to`, carrying `notice` to the next page render.
    pub fn redirect_with(&self, to: &str, notice: &Notice) -> Response {
        let mut response = Redirect::to(to).into_response();
        match self.seal(notice) {
            Ok(token) => {
                let cookie = format!("{FLASH_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
                if let Ok(value) = HeaderValue::from_str(&cookie) {
                    response.headers_mut().append(SET_COOKIE, value);
                }
            }
            Err(e) => tracing::error!(error = %e, "Cannot seal notice"),
        }
        response
    }

    fn mac(&self) -> Result<HmacSha256, FlashError> {
        HmacSha256::new_from_slice(&self.secret).map_err(|e| FlashError::Key(e.to_string()))
    }
}

/// `Set-Cookie` value that removes the notice cookie.
pub fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static("clinicdb_flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    fn signer() -> FlashSigner {
        FlashSigner::new("test-secret")
    }

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn sealed_notice_opens() {
        let notice = Notice::danger("Error creating clinic");
        let token = signer().seal(&notice).unwrap();
        assert_eq!(signer().open(&token).unwrap(), notice);
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let token = signer().seal(&Notice::danger("original")).unwrap();
        let (_, sig) = token.split_once('.').unwrap();
        let forged_payload = URL_SAFE_NO_PAD.encode(br#"{"category":"danger","message":"forged"}"#);
        let forged = format!("{forged_payload}.{sig}");
        assert!(matches!(signer().open(&forged), Err(FlashError::BadSignature)));
    }

    #[test]
    fn other_secret_is_rejected() {
        let token = FlashSigner::new("other").seal(&Notice::danger("x")).unwrap();
        assert!(matches!(signer().open(&token), Err(FlashError::BadSignature)));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(signer().open("no-dot-here"), Err(FlashError::Malformed)));
        assert!(matches!(signer().open("abc.!!!"), Err(FlashError::Malformed)));
    }

    #[test]
    fn take_reads_cookie_among_others() {
        let token = signer().seal(&Notice::danger("Error deleting test")).unwrap();
        let headers = headers_with_cookie(&format!("theme=dark; {FLASH_COOKIE}={token}"));
        let (notice, present) = signer().take(&headers);
        assert!(present);
        assert_eq!(notice.unwrap().message, "Error deleting test");
    }

    #[test]
    fn take_ignores_unsigned_cookie_but_reports_it() {
        let headers = headers_with_cookie(&format!("{FLASH_COOKIE}=hello"));
        let (notice, present) = signer().take(&headers);
        assert!(notice.is_none());
        assert!(present);

        let (none, absent) = signer().take(&HeaderMap::new());
        assert!(none.is_none());
        assert!(!absent);
    }

    #[test]
    fn redirect_sets_cookie_and_location() {
        let response = signer().redirect_with("/clinics", &Notice::danger("Error creating clinic"));
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get("location").unwrap(), "/clinics");
        let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("clinicdb_flash="));
    }
}
