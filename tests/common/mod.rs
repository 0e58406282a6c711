#![allow(dead_code)]

use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;

/// 2100-01-01T00:00:00Z.
pub const FAR_FUTURE: i64 = 4_102_444_800;

/// Signed token as the auth endpoint would issue it. The client never
/// checks the signature, so any key will do.
pub fn token(role: &str, email: &str, exp: i64) -> String {
    let claims = json!({
        "sub": "7",
        "email": email,
        "http://schemas.microsoft.com/ws/2008/06/identity/claims/role": role,
        "jti": "3f1c",
        "nbf": 1_700_000_000,
        "exp": exp,
        "iss": "FUNewsManagement",
        "aud": "FUNewsManagementClient",
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"integration-test-secret"),
    )
    .unwrap()
}
