//! Unit tests for the Redis OTP store that need no server

use crate::cache::otp_store::code_key;
use crate::cache::CacheConfig;

#[test]
fn test_code_key_format() {
    assert_eq!(code_key("+15550102030"), "otp:code:+15550102030");
}

#[test]
fn test_code_key_with_prefix() {
    let config = CacheConfig::new("redis://localhost:6379").with_prefix("staging");
    assert_eq!(
        config.make_key(&code_key("+15550102030")),
        "staging:otp:code:+15550102030"
    );
}
