use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;
use std::time::Duration;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, env-mutating tests are serialized.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, env-mutating tests are serialized.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_verity_env() {
    // SAFETY: Test code only, env-mutating tests are serialized.
    unsafe {
        env::remove_var("VERITY_PORT");
        env::remove_var("VERITY_BIND_ADDR");
        env::remove_var("VERITY_SEARCH_URL");
        env::remove_var("VERITY_SEARCH_API_KEYS");
        env::remove_var("VERITY_NLI_URL");
        env::remove_var("VERITY_NLI_TOKEN");
        env::remove_var("VERITY_SEARCH_TIMEOUT_MS");
        env::remove_var("VERITY_NLI_TIMEOUT_MS");
        env::remove_var("VERITY_QUERY_DELAY_MS");
        env::remove_var("VERITY_MAX_CLAIMS");
        env::remove_var("VERITY_MAX_INPUT_CHARS");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.search_url, "https://newsapi.org");
    assert!(config.search_api_keys.is_empty());
    assert!(config.nli_url.is_none());
    assert_eq!(config.max_claims, 10);
    assert!(config.is_search_offline());
    assert!(config.validate().is_ok());
}

#[test]
fn test_socket_addr() {
    let config = Config {
        port: 3000,
        bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        ..Default::default()
    };
    assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");

    let config = Config {
        port: 8080,
        bind_addr: IpAddr::V6(std::net::Ipv6Addr::LOCALHOST),
        ..Default::default()
    };
    assert_eq!(config.socket_addr().to_string(), "[::1]:8080");
}

#[test]
fn test_debug_redacts_secrets() {
    let config = Config {
        search_api_keys: vec!["secret-key-1".to_string(), "secret-key-2".to_string()],
        nli_token: Some("hf_secret".to_string()),
        ..Default::default()
    };

    let rendered = format!("{:?}", config);
    assert!(!rendered.contains("secret-key-1"));
    assert!(!rendered.contains("hf_secret"));
    assert!(rendered.contains("<redacted>"));
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_verity_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.port, 8080);
    assert_eq!(config.query_delay, Duration::from_millis(250));
    assert!(config.search_api_keys.is_empty());
}

#[test]
#[serial]
fn test_from_env_custom_port() {
    clear_verity_env();

    with_env_vars(&[("VERITY_PORT", "3000")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.port, 3000);
    });
}

#[test]
#[serial]
fn test_from_env_zero_port_rejected() {
    clear_verity_env();

    with_env_vars(&[("VERITY_PORT", "0")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
    });
}

#[test]
#[serial]
fn test_from_env_invalid_bind_addr() {
    clear_verity_env();

    with_env_vars(&[("VERITY_BIND_ADDR", "not-an-ip")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
    });
}

#[test]
#[serial]
fn test_from_env_api_key_list() {
    clear_verity_env();

    with_env_vars(&[("VERITY_SEARCH_API_KEYS", " key-a, ,key-b,key-c ")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.search_api_keys, vec!["key-a", "key-b", "key-c"]);
        assert!(!config.is_search_offline());
    });
}

#[test]
#[serial]
fn test_from_env_blank_nli_url_is_none() {
    clear_verity_env();

    with_env_vars(&[("VERITY_NLI_URL", "   ")], || {
        let config = Config::from_env().expect("should parse");
        assert!(config.nli_url.is_none());
    });
}

#[test]
#[serial]
fn test_from_env_timeouts() {
    clear_verity_env();

    with_env_vars(
        &[
            ("VERITY_SEARCH_TIMEOUT_MS", "1500"),
            ("VERITY_NLI_TIMEOUT_MS", "900"),
            ("VERITY_QUERY_DELAY_MS", "0"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.search_timeout, Duration::from_millis(1500));
            assert_eq!(config.nli_timeout, Duration::from_millis(900));
            assert!(config.query_delay.is_zero());
        },
    );
}

#[test]
#[serial]
fn test_from_env_invalid_number() {
    clear_verity_env();

    with_env_vars(&[("VERITY_MAX_CLAIMS", "lots")], || {
        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidNumber { name, value, .. } => {
                assert_eq!(name, "VERITY_MAX_CLAIMS");
                assert_eq!(value, "lots");
            }
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
    });
}

#[test]
fn test_validate_rejects_too_many_claims() {
    let config = Config {
        max_claims: 16,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::OutOfRange { .. })
    ));
}

#[test]
fn test_validate_rejects_zero_claims() {
    let config = Config {
        max_claims: 0,
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_bad_nli_url() {
    let config = Config {
        nli_url: Some("not a url".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidUrl { .. })
    ));
}

#[test]
fn test_validate_rejects_zero_timeout() {
    let config = Config {
        nli_timeout: Duration::ZERO,
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_error_display() {
    let err = ConfigError::InvalidPort {
        value: "0".to_string(),
    };
    assert!(err.to_string().contains("between 1 and 65535"));

    let err = ConfigError::OutOfRange {
        name: "VERITY_MAX_CLAIMS",
        value: "99".to_string(),
        reason: "must be between 1 and 15".to_string(),
    };
    assert!(err.to_string().contains("VERITY_MAX_CLAIMS"));
    assert!(err.to_string().contains("99"));
}
