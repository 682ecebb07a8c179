use iterdns_domain::config::{DatabaseConfig, ResolverConfig};
use iterdns_domain::{CliOverrides, Config, ROOT_SERVERS};
use std::io::Write;
use std::net::Ipv4Addr;

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.resolver.query_timeout_ms, 2000);
    assert_eq!(config.resolver.resolve_timeout_secs, 30);
    assert_eq!(config.resolver.nameserver_port, 53);
    assert_eq!(config.resolver.max_delegation_depth, 16);
    assert!(config.resolver.root_servers.is_empty());
    assert_eq!(config.database.path, ":memory:");
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.json);
    assert!(config.monitor.domains.is_empty());
    assert_eq!(config.monitor.interval_secs, 60);
    assert_eq!(config.monitor.expunge_interval_secs, 300);
    assert!(config.validate().is_ok());
}

#[test]
fn test_root_hints_default_to_builtin_table() {
    let resolver = ResolverConfig::default();
    let hints = resolver.root_hints();

    assert_eq!(hints.len(), 13);
    assert_eq!(hints[0], Ipv4Addr::new(198, 41, 0, 4));
    assert_eq!(hints[0], ROOT_SERVERS[0].ipv4);
    assert_eq!(ROOT_SERVERS[12].name, "m.root-servers.net.");
}

#[test]
fn test_root_hints_override() {
    let config = Config::from_toml(
        r#"
        [resolver]
        root_servers = ["127.0.0.1"]
        "#,
    )
    .unwrap();

    assert_eq!(config.resolver.root_hints(), vec![Ipv4Addr::LOCALHOST]);
}

#[test]
fn test_partial_toml_uses_defaults() {
    let config = Config::from_toml(
        r#"
        [monitor]
        domains = ["example.com", "example.org"]
        interval_secs = 120

        [logging]
        level = "debug"
        "#,
    )
    .unwrap();

    assert_eq!(config.monitor.domains, vec!["example.com", "example.org"]);
    assert_eq!(config.monitor.interval_secs, 120);
    assert_eq!(config.monitor.expunge_interval_secs, 300);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.resolver.nameserver_port, 53);
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let result = Config::from_toml("[resolver\nnameserver_port = ");
    assert!(result.is_err());
}

#[test]
fn test_load_applies_cli_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
        [database]
        path = "cache.db"
        "#
    )
    .unwrap();

    let overrides = CliOverrides {
        database_path: Some("override.db".to_string()),
        log_level: Some("trace".to_string()),
        nameserver_port: Some(5353),
    };

    let config = Config::load(file.path().to_str(), overrides).unwrap();

    assert_eq!(config.database.path, "override.db");
    assert_eq!(config.logging.level, "trace");
    assert_eq!(config.resolver.nameserver_port, 5353);
}

#[test]
fn test_load_missing_file_is_error() {
    let result = Config::load(Some("/nonexistent/iterdns.toml"), CliOverrides::default());
    assert!(result.is_err());
}

#[test]
fn test_validate_rejects_zero_port() {
    let mut config = Config::default();
    config.resolver.nameserver_port = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_blank_monitored_domain() {
    let mut config = Config::default();
    config.monitor.domains = vec!["example.com".to_string(), "  ".to_string()];
    assert!(config.validate().is_err());
}

#[test]
fn test_database_url() {
    let memory = DatabaseConfig::default();
    assert!(memory.is_in_memory());
    assert_eq!(memory.database_url(), "sqlite::memory:");

    let file = DatabaseConfig {
        path: "/var/lib/iterdns/cache.db".to_string(),
        ..DatabaseConfig::default()
    };
    assert!(!file.is_in_memory());
    assert_eq!(file.database_url(), "sqlite:/var/lib/iterdns/cache.db");
}
