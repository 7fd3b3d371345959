use std::io::Write;

use warden::config::{Config, DEFAULT_LISTEN_ADDR, StaticFilesConfig};
use warden::logging::LoggingConfig;
use tracing::Level;

#[test]
fn test_config_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.server.listen_addr, DEFAULT_LISTEN_ADDR);
    assert_eq!(cfg.logging, LoggingConfig::default());
    assert!(cfg.static_files.is_empty());
}

#[test]
fn test_config_empty_yaml_is_default() {
    let cfg = Config::from_yaml("").unwrap();
    assert_eq!(cfg, Config::default());
}

#[test]
fn test_config_full_yaml() {
    let cfg = Config::from_yaml(
        r#"
server:
  listen_addr: "0.0.0.0:3000"
logging:
  level: warn
  debug: true
  with_target: true
static_files:
  - prefix: /static
    root: ./public
  - prefix: /docs/
    root: /srv/docs
"#,
    )
    .unwrap();

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:3000");
    assert_eq!(cfg.logging.level, "warn");
    assert!(cfg.logging.debug);
    assert!(cfg.logging.with_target);
    assert_eq!(
        cfg.static_files,
        vec![
            StaticFilesConfig {
                prefix: "/static".into(),
                root: "./public".into(),
            },
            StaticFilesConfig {
                prefix: "/docs/".into(),
                root: "/srv/docs".into(),
            },
        ]
    );
}

#[test]
fn test_config_partial_yaml_keeps_defaults() {
    let cfg = Config::from_yaml("logging:\n  level: debug\n").unwrap();
    assert_eq!(cfg.server.listen_addr, DEFAULT_LISTEN_ADDR);
    assert_eq!(cfg.logging.level, "debug");
    assert!(!cfg.logging.debug);
}

#[test]
fn test_config_invalid_yaml() {
    let err = Config::from_yaml("server: [not, a, map]").unwrap_err();
    assert!(err.to_string().starts_with("invalid config"));
}

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "server:\n  listen_addr: \"127.0.0.1:9090\"").unwrap();

    let cfg = Config::from_file(file.path()).unwrap();
    assert_eq!(cfg.server.listen_addr, "127.0.0.1:9090");
}

#[test]
fn test_config_missing_file() {
    let err = Config::from_file("/definitely/not/here.yaml").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.yaml"));
}

// All environment mutation lives in this one test so parallel tests
// never observe each other's variables.
#[test]
fn test_config_load_from_env() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "server:\n  listen_addr: \"127.0.0.1:7000\"").unwrap();

    unsafe {
        std::env::remove_var("WARDEN_CONFIG");
        std::env::remove_var("LISTEN");
    }
    assert_eq!(Config::load().unwrap().server.listen_addr, DEFAULT_LISTEN_ADDR);

    unsafe {
        std::env::set_var("WARDEN_CONFIG", file.path());
    }
    assert_eq!(Config::load().unwrap().server.listen_addr, "127.0.0.1:7000");

    unsafe {
        std::env::set_var("LISTEN", "0.0.0.0:5000");
    }
    assert_eq!(Config::load().unwrap().server.listen_addr, "0.0.0.0:5000");

    unsafe {
        std::env::remove_var("WARDEN_CONFIG");
        std::env::remove_var("LISTEN");
    }
}

#[test]
fn test_logging_levels() {
    let level = |name: &str| LoggingConfig {
        level: name.to_string(),
        ..LoggingConfig::default()
    };

    assert_eq!(level("error").max_level(), Level::ERROR);
    assert_eq!(level("WARN").max_level(), Level::WARN);
    assert_eq!(level("info").max_level(), Level::INFO);
    assert_eq!(level("trace").max_level(), Level::TRACE);
    assert_eq!(level("nonsense").max_level(), Level::INFO);

    let debug = LoggingConfig {
        level: "error".to_string(),
        debug: true,
        with_target: false,
    };
    assert_eq!(debug.max_level(), Level::DEBUG);
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1, cfg2);
}
