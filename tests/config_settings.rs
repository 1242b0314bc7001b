use cert_warden::config::{self, Settings};
use std::io::Write;

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[scan]
timeout_secs = 5

[smtp]
host = "mail.example.test"
port = 465

[alerts]
warning_days = 21
"#
    )
    .unwrap();

    let settings = Settings::load_from_file(file.path()).unwrap();
    assert_eq!(settings.scan.timeout_secs, 5);
    assert_eq!(settings.smtp.host, "mail.example.test");
    assert_eq!(settings.smtp.port, 465);
    assert_eq!(settings.alerts.warning_days, 21);
    assert_eq!(settings.alerts.critical_days, 7);
}

#[test]
fn test_missing_file_is_error() {
    let err = config::load(Some(std::path::Path::new("/nonexistent/cert-warden.toml"))).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[scan\ntimeout_secs = ").unwrap();
    assert!(Settings::load_from_file(file.path()).is_err());
}
