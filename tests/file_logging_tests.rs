//! File sink lifecycle on a logger handle.

use std::fs;

use caller_format::config::LoggerConfig;
use caller_format::logger::Logger;
use caller_format::{log_error, log_info, LogError};

fn logger() -> Logger {
    let mut config = LoggerConfig::default();
    config.format.line_template = "%level%|%function%|%msg%\n".into();
    Logger::new(config).unwrap()
}

#[test]
fn test_switches_output_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs/nested/app.log");

    let logger = logger();
    logger.set_file_logging(&path).unwrap();
    logger.in_scope(|| log_info!("written to file"));
    assert_eq!(logger.sink().file_path(), Some(path.clone()));

    logger.close().unwrap();
    assert_eq!(logger.sink().file_path(), None);
    logger.in_scope(|| log_error!("after close"));

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "INFO   |test_switches_output_to_file|Logging started",
            "INFO   |test_switches_output_to_file|written to file",
            "INFO   |test_switches_output_to_file|Closing log file",
        ]
    );
}

#[test]
fn test_appends_to_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    fs::write(&path, "previous run\n").unwrap();

    let logger = logger();
    logger.set_file_logging(&path).unwrap();
    logger.close().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("previous run\nINFO   |"));
    assert_eq!(content.lines().count(), 3);
}

#[test]
fn test_directory_failure_is_returned() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();

    let logger = logger();
    let err = logger.set_file_logging(blocker.join("app.log")).unwrap_err();
    assert!(matches!(err, LogError::CreateDir { .. }));
    assert_eq!(logger.sink().file_path(), None);
}

#[test]
fn test_configured_file_sink() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("configured/app.log");

    let mut config = LoggerConfig::default();
    config.format.line_template = "%msg%\n".into();
    config.output.file = Some(path.to_string_lossy().into_owned());
    let logger = Logger::new(config).unwrap();

    logger.in_scope(|| log_info!("from config"));
    logger.flush().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "from config\n");
}
