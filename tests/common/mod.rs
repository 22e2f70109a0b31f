// Common utilities for integration tests

use pihole_client::prelude::*;

/// Creates a test configuration pointed at a mock server, with backoff
/// delays collapsed to zero so retry tests run instantly
pub fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig::new(base_url, "test-password").with_retry_delay_secs(0)
}

/// A successful login body carrying the given token pair
pub fn session_body(sid: &str, csrf: &str) -> String {
    json!({
        "session": {
            "valid": true,
            "totp": false,
            "sid": sid,
            "csrf": csrf,
            "validity": 300,
            "message": null
        },
        "took": 0.003
    })
    .to_string()
}

/// A rejected login body with the given server message
pub fn invalid_session_body(message: &str) -> String {
    json!({
        "session": {
            "valid": false,
            "totp": false,
            "sid": null,
            "csrf": null,
            "validity": -1,
            "message": message
        },
        "took": 0.003
    })
    .to_string()
}
