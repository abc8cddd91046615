// File: src/platforms/wos/sign.rs

use md5::{Digest, Md5};

/// Deterministic request fingerprint shared by both vendor calls: the
/// `field=value` pairs joined by `&` in protocol order (`cdk`, `fid`,
/// `time` where present), the shared secret appended, MD5 over the UTF-8
/// bytes, rendered as lowercase hex. The vendor recomputes the same digest
/// to verify the request, so this must be reproducible byte-for-byte.
pub fn sign_request(params: &[(&str, &str)], secret: &str) -> String {
    let mut payload = params
        .iter()
        .map(|(field, value)| format!("{field}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    payload.push_str(secret);

    let mut hasher = Md5::new();
    hasher.update(payload.as_bytes());
    hex::encode(hasher.finalize())
}
