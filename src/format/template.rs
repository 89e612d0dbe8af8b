//! Placeholder substitution into the line template.
//!
//! # Responsibilities
//! - Resolve empty templates to the defaults
//! - Substitute `%time%`, `%msg%`, `%level%` and string fields
//!
//! # Design Decisions
//! - One left-to-right scan: inserted values are never scanned again
//! - Each placeholder name is substituted once, at its first occurrence
//! - Overlapping placeholders resolve leftmost first; `time`, `msg` and
//!   `level` only take precedence over fields of the same name
//! - Unknown names and non-string fields stay literal

use std::fmt::{self, Write};

use chrono::format::{Item, StrftimeItems};
use thiserror::Error;

use crate::format::entry::LogEntry;

/// Line template used when none is configured.
pub const DEFAULT_LINE_TEMPLATE: &str =
    "%time% - %level% - [%package%::%file%::%function%::%line%] - %msg%\n";

/// Timestamp layout used when none is configured (`YYYY-MM-DD HH:MM:SS`).
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Width the level name is padded to.
pub const LEVEL_WIDTH: usize = 7;

/// Errors raised while building a [`TemplateFormatter`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("invalid timestamp format {0:?}")]
    TimestampFormat(String),
}

/// Returns true when `format` contains only valid strftime items.
pub fn is_valid_timestamp_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Renders [`LogEntry`] values with a line template and a timestamp format.
#[derive(Debug, Clone)]
pub struct TemplateFormatter {
    line_template: String,
    timestamp_format: String,
}

impl TemplateFormatter {
    /// Build a formatter. Empty strings select the defaults.
    pub fn new(
        line_template: impl Into<String>,
        timestamp_format: impl Into<String>,
    ) -> Result<Self, TemplateError> {
        let mut line_template = line_template.into();
        if line_template.is_empty() {
            line_template = DEFAULT_LINE_TEMPLATE.to_string();
        }

        let mut timestamp_format = timestamp_format.into();
        if timestamp_format.is_empty() {
            timestamp_format = DEFAULT_TIMESTAMP_FORMAT.to_string();
        }
        if !is_valid_timestamp_format(&timestamp_format) {
            return Err(TemplateError::TimestampFormat(timestamp_format));
        }

        Ok(Self {
            line_template,
            timestamp_format,
        })
    }

    pub fn line_template(&self) -> &str {
        &self.line_template
    }

    pub fn timestamp_format(&self) -> &str {
        &self.timestamp_format
    }

    /// Render `entry` into a new string.
    pub fn render(&self, entry: &LogEntry) -> String {
        let mut out = String::with_capacity(self.line_template.len() + entry.message.len());
        // Writing into a String only fails if a Display impl does.
        let _ = self.render_into(&mut out, entry);
        out
    }

    /// Render `entry` into `out`.
    ///
    /// At each `%` the candidate name runs to the next `%`. A name that
    /// resolves and was not substituted yet is replaced; otherwise the text is
    /// copied and scanning resumes at the closing `%`, which may open the next
    /// placeholder.
    pub fn render_into<W: Write + ?Sized>(&self, out: &mut W, entry: &LogEntry) -> fmt::Result {
        let mut used: Vec<&str> = Vec::new();
        let mut rest = self.line_template.as_str();

        while let Some(start) = rest.find('%') {
            out.write_str(&rest[..start])?;
            let after = &rest[start + 1..];
            let Some(end) = after.find('%') else {
                out.write_str(&rest[start..])?;
                return Ok(());
            };

            let name = &after[..end];
            if is_placeholder_name(name)
                && !used.contains(&name)
                && self.substitute(out, name, entry)?
            {
                used.push(name);
                rest = &after[end + 1..];
            } else {
                out.write_char('%')?;
                out.write_str(name)?;
                rest = &after[end..];
            }
        }

        out.write_str(rest)
    }

    /// Write the value for `name`, returning false when there is none.
    fn substitute<W: Write + ?Sized>(
        &self,
        out: &mut W,
        name: &str,
        entry: &LogEntry,
    ) -> Result<bool, fmt::Error> {
        match name {
            "time" => write!(out, "{}", entry.timestamp.format(&self.timestamp_format))?,
            "msg" => out.write_str(&entry.message)?,
            "level" => write!(
                out,
                "{:<width$}",
                entry.level.as_str().to_uppercase(),
                width = LEVEL_WIDTH
            )?,
            key => match entry.fields.get(key).and_then(|v| v.as_str()) {
                Some(value) => out.write_str(value)?,
                None => return Ok(false),
            },
        }
        Ok(true)
    }
}

impl Default for TemplateFormatter {
    fn default() -> Self {
        Self {
            line_template: DEFAULT_LINE_TEMPLATE.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::entry::{FieldValue, Level};
    use chrono::{Local, TimeZone};

    fn entry(level: Level, msg: &str) -> LogEntry {
        let ts = Local
            .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
            .single()
            .expect("unambiguous local time");
        LogEntry::new(level, msg).at(ts)
    }

    fn render(template: &str, entry: &LogEntry) -> String {
        TemplateFormatter::new(template, "").unwrap().render(entry)
    }

    #[test]
    fn test_empty_templates_select_defaults() {
        let e = entry(Level::Info, "started")
            .with_field("package", "app")
            .with_field("function", "Run");
        let implicit = TemplateFormatter::new("", "").unwrap();
        let explicit =
            TemplateFormatter::new(DEFAULT_LINE_TEMPLATE, DEFAULT_TIMESTAMP_FORMAT).unwrap();
        assert_eq!(implicit.render(&e), explicit.render(&e));
        assert_eq!(implicit.render(&e), TemplateFormatter::default().render(&e));
    }

    #[test]
    fn test_default_line() {
        let e = entry(Level::Info, "started")
            .with_field("package", "app")
            .with_field("file", "main.ext")
            .with_field("function", "Run")
            .with_field("line", "10");
        assert_eq!(
            TemplateFormatter::default().render(&e),
            "2024-01-02 03:04:05 - INFO    - [app::main.ext::Run::10] - started\n"
        );
    }

    #[test]
    fn test_first_occurrence_only() {
        assert_eq!(render("%msg% %msg%", &entry(Level::Info, "hi")), "hi %msg%");
    }

    #[test]
    fn test_level_padding() {
        assert_eq!(render("[%level%]", &entry(Level::Warn, "")), "[WARN   ]");
        assert_eq!(render("[%level%]", &entry(Level::Error, "")), "[ERROR  ]");
        assert_eq!(render("[%level%]", &entry(Level::Panic, "")), "[PANIC  ]");
    }

    #[test]
    fn test_non_string_fields_stay_literal() {
        let e = entry(Level::Info, "x")
            .with_field("count", 42i64)
            .with_field("ok", true);
        assert_eq!(render("%count% %ok%", &e), "%count% %ok%");
    }

    #[test]
    fn test_missing_field_stays_literal() {
        assert_eq!(render("[%nope%] %msg%", &entry(Level::Info, "m")), "[%nope%] m");
    }

    #[test]
    fn test_inserted_values_are_not_rescanned() {
        let e = entry(Level::Debug, "%level% %user%").with_field("user", "bob");
        assert_eq!(render("%msg% %level% %user%", &e), "%level% %user% DEBUG   bob");
    }

    #[test]
    fn test_field_value_with_percent() {
        let e = entry(Level::Info, "m")
            .with_field("a", "%b%")
            .with_field("b", "B");
        assert_eq!(render("%a%|%b%", &e), "%b%|B");
    }

    #[test]
    fn test_reserved_names_win_over_fields() {
        let e = entry(Level::Info, "real").with_field("msg", "field");
        assert_eq!(render("%msg%", &e), "real");
    }

    #[test]
    fn test_stray_percent_signs() {
        let e = entry(Level::Info, "hi");
        assert_eq!(render("100% of %msg%", &e), "100% of hi");
        assert_eq!(render("5%x%msg%", &e), "5%xhi");
        assert_eq!(render("%% %msg% %", &e), "%% hi %");
        assert_eq!(render("tail %msg", &e), "tail %msg");
    }

    #[test]
    fn test_overlapping_placeholders_resolve_leftmost() {
        let e = entry(Level::Info, "hi").with_field("user", "U");
        assert_eq!(render("%user%msg%", &e), "Umsg%");
        assert_eq!(render("%nope%msg%", &e), "%nopehi");
    }

    #[test]
    fn test_custom_timestamp_format() {
        let f = TemplateFormatter::new("%time%", "%d/%m/%Y").unwrap();
        assert_eq!(f.render(&entry(Level::Info, "")), "02/01/2024");
    }

    #[test]
    fn test_invalid_timestamp_format_rejected() {
        assert_eq!(
            TemplateFormatter::new("", "%Y-%Q").unwrap_err(),
            TemplateError::TimestampFormat("%Y-%Q".into())
        );
        assert!(is_valid_timestamp_format(DEFAULT_TIMESTAMP_FORMAT));
    }

    #[test]
    fn test_formatted_field_is_not_a_string() {
        let e = entry(Level::Info, "")
            .with_field("peer", FieldValue::Formatted("127.0.0.1".into()));
        assert_eq!(render("%peer%", &e), "%peer%");
    }
}
