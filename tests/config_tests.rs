use pihole_client::prelude::*;

#[test]
fn base_url_variants_normalize_to_the_same_target() {
    let bare = ClientConfig::new("http://pi.hole", "pw");
    let slashed = ClientConfig::new("http://pi.hole/", "pw");
    let rooted = ClientConfig::new("http://pi.hole/api/", "pw");

    assert_eq!(bare.base_url, "http://pi.hole/api/");
    assert_eq!(slashed.base_url, bare.base_url);
    assert_eq!(rooted.base_url, bare.base_url);

    // The effective request target is identical for a given endpoint
    let targets: Vec<String> = [&bare, &slashed, &rooted]
        .iter()
        .map(|c| format!("{}stats/summary", c.base_url))
        .collect();
    assert!(targets.iter().all(|t| t == "http://pi.hole/api/stats/summary"));
}

#[test]
fn normalization_keeps_ports_and_path_prefixes() {
    assert_eq!(
        normalize_base_url("https://10.0.0.2:8443"),
        "https://10.0.0.2:8443/api/"
    );
    assert_eq!(
        normalize_base_url("http://pi.hole/admin/"),
        "http://pi.hole/admin/api/"
    );
    assert_eq!(normalize_base_url("http://pi.hole//"), "http://pi.hole/api/");
    assert_eq!(normalize_base_url("http://pi.hole/api"), "http://pi.hole/api/");
}

#[test]
fn normalization_does_not_strip_lookalike_segments() {
    // Only a whole trailing "api" segment is stripped
    assert_eq!(
        normalize_base_url("http://pi.hole/xapi"),
        "http://pi.hole/xapi/api/"
    );
}

#[test]
fn construction_applies_documented_defaults() {
    let config = ClientConfig::new("http://pi.hole", "pw");

    assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);
    assert_eq!(config.retry_delay_secs, DEFAULT_RETRY_DELAY_SECS);
    assert_eq!(
        config.connection_timeout_secs,
        DEFAULT_CONNECTION_TIMEOUT_SECS
    );
    assert!(!config.disable_connection_pooling);
    assert!(!config.verify_tls);
}

#[test]
fn builder_methods_override_defaults() {
    let config = ClientConfig::new("http://pi.hole", "pw")
        .with_max_retries(5)
        .with_retry_delay_secs(2)
        .with_connection_timeout_secs(30)
        .without_connection_pooling()
        .with_verify_tls(true);

    assert_eq!(config.max_retries, 5);
    assert_eq!(config.retry_delay_secs, 2);
    assert_eq!(config.connection_timeout_secs, 30);
    assert!(config.disable_connection_pooling);
    assert!(config.verify_tls);
}

#[test]
fn env_parsing_falls_back_to_defaults() {
    // Variable absent: the default wins
    let parsed: u32 = get_env_or_default("PIHOLE_CLIENT_TEST_UNSET_VAR", 7);
    assert_eq!(parsed, 7);

    let missing: Option<u64> = get_env_or_none("PIHOLE_CLIENT_TEST_UNSET_VAR");
    assert!(missing.is_none());
}
