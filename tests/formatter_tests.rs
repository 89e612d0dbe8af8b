//! End-to-end formatting through a real subscriber and a real stack walk.

use caller_format::{log_info, log_warn};

mod common;

const CALLER: &str = "%package%|%function%|%file%|%line%|%msg%\n";

fn split(line: &str) -> Vec<&str> {
    line.trim_end_matches('\n').split('|').collect()
}

#[test]
fn test_resolves_calling_function() {
    let logger = common::memory_logger(CALLER);
    logger.in_scope(|| log_info!("hello"));

    let out = logger.take_output();
    let parts = split(&out);
    assert_eq!(parts[0], "formatter_tests");
    assert_eq!(parts[1], "test_resolves_calling_function");
    assert_eq!(parts[2], "formatter_tests.rs");
    assert!(!parts[3].is_empty() && parts[3].chars().all(|c| c.is_ascii_digit()));
    assert_eq!(parts[4], "hello");
}

#[test]
fn test_reports_exact_file_and_line() {
    let logger = common::memory_logger("%file%:%line%:%function%\n");
    let mut line = 0;
    logger.in_scope(|| {
        line = line!() + 1;
        log_info!("x");
    });
    assert_eq!(
        logger.take_output(),
        format!("formatter_tests.rs:{line}:test_reports_exact_file_and_line\n")
    );
}

#[test]
fn test_resolves_with_fields_present() {
    let logger = common::memory_logger(CALLER);
    logger.in_scope(|| log_warn!(user = "ann", attempts = 3, "retrying"));

    let out = logger.take_output();
    let parts = split(&out);
    assert_eq!(parts[0], "formatter_tests");
    assert_eq!(parts[1], "test_resolves_with_fields_present");
    assert_eq!(parts[4], "retrying");
}

fn handle_request() {
    log_info!("handling");
}

mod jobs {
    pub fn run() {
        caller_format::log_info!("job ran");
    }
}

#[test]
fn test_resolves_helper_functions() {
    let logger = common::memory_logger(CALLER);
    logger.in_scope(|| {
        handle_request();
        jobs::run();
    });

    let out = logger.take_output();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(&split(lines[0])[..2], ["formatter_tests", "handle_request"]);
    assert_eq!(&split(lines[1])[..2], ["formatter_tests::jobs", "run"]);
}

#[test]
fn test_event_field_overrides_function() {
    let logger = common::memory_logger("%function%");
    logger.in_scope(|| log_info!(function = "override", "x"));
    assert_eq!(logger.take_output(), "override");
}

#[test]
fn test_integer_field_left_literal() {
    let logger = common::memory_logger("%count% %msg%");
    logger.in_scope(|| log_info!(count = 42, "n"));
    assert_eq!(logger.take_output(), "%count% n");
}

#[test]
fn test_default_template_shape() {
    let logger = common::memory_logger("");
    logger.in_scope(|| log_info!("started"));

    let out = logger.take_output();
    let (time, rest) = out.split_at(19);
    assert!(common::is_default_timestamp(time), "bad timestamp in {out:?}");
    assert!(
        rest.starts_with(" - INFO    - [formatter_tests::formatter_tests.rs::test_default_template_shape::"),
        "unexpected line {out:?}"
    );
    assert!(rest.ends_with("] - started\n"));
}

#[test]
fn test_template_without_caller_placeholders() {
    let logger = common::memory_logger("%level%:%msg%\n");
    logger.in_scope(|| {
        log_warn!("first");
        log_info!("second");
    });
    assert_eq!(logger.take_output(), "WARN   :first\nINFO   :second\n");
}
