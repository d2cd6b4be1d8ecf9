//! Qiniu upload token signing.
//!
//! Token format: `access_key:sign:encoded_policy`, where `encoded_policy` is
//! the URL-safe base64 of the put policy JSON and `sign` is the URL-safe
//! base64 of its HMAC-SHA1 under the secret key.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Seconds an upload token stays valid.
pub(crate) const TOKEN_TTL_SECS: u64 = 3600;

/// Put policy; field order is part of the signed payload.
#[derive(Debug, Serialize)]
struct PutPolicy<'a> {
    scope: &'a str,
    deadline: u64,
}

/// Build an upload token for `bucket`, valid until `deadline` (Unix seconds).
pub(crate) fn upload_token(access_key: &str, secret_key: &str, bucket: &str, deadline: u64) -> String {
    let policy = PutPolicy {
        scope: bucket,
        deadline,
    };
    // Serializing two plain fields cannot fail
    let policy = serde_json::to_string(&policy).unwrap_or_default();
    let encoded_policy = URL_SAFE.encode(policy);
    let sign = URL_SAFE.encode(hmac_sha1(secret_key.as_bytes(), encoded_policy.as_bytes()));
    format!("{access_key}:{sign}:{encoded_policy}")
}

fn hmac_sha1(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha1::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
