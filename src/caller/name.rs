//! Symbol name helpers.

/// Split a fully-qualified function name into `(package, function)`.
///
/// Rust paths split at the last `::` outside angle brackets, after trailing
/// closure segments are folded into their enclosing function. Turbofish
/// arguments (`process::<u32>`) are dropped from the function. Names without
/// `::` split at the last `.` (`example.com/mod/pkg.DoThing`). A name with
/// neither has an empty package.
pub fn split_function_name(name: &str) -> (&str, &str) {
    let name = strip_closures(name);
    if let Some(idx) = last_path_separator(name) {
        let function = &name[idx + 2..];
        let function = function.find("::<").map_or(function, |end| &function[..end]);
        return (&name[..idx], function);
    }
    match name.rfind('.') {
        Some(idx) => (&name[..idx], &name[idx + 1..]),
        None => ("", name),
    }
}

/// Last path segment of `path`, accepting both `/` and `\` separators.
pub fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Returns true when `name` lives under the module path `marker`.
///
/// Matching happens at segment boundaries, ignoring a leading `<` from
/// trait-impl symbols: `tracing` matches `<tracing::Span as Drop>::drop`
/// but not `tracing_subscriber::fmt`.
pub fn has_path_prefix(name: &str, marker: &str) -> bool {
    let name = name.trim_start_matches('<');
    match name.strip_prefix(marker) {
        Some(rest) => rest.is_empty() || rest.starts_with("::"),
        None => false,
    }
}

/// Drop trailing `{{closure}}` / `{closure#N}` segments.
fn strip_closures(mut name: &str) -> &str {
    while let Some(idx) = last_path_separator(name) {
        if name[idx + 2..].starts_with('{') {
            name = &name[..idx];
        } else {
            break;
        }
    }
    name
}

/// Byte offset of the last `::` at angle-bracket depth zero that is not a
/// turbofish `::<`.
fn last_path_separator(name: &str) -> Option<usize> {
    let bytes = name.as_bytes();
    let mut depth = 0usize;
    let mut found = None;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            // `->` in fn pointer types
            b'>' if i > 0 && bytes[i - 1] == b'-' => {}
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                if bytes.get(i + 2) != Some(&b'<') {
                    found = Some(i);
                }
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_dotted_name() {
        assert_eq!(
            split_function_name("example.com/mod/pkg.DoThing"),
            ("example.com/mod/pkg", "DoThing")
        );
    }

    #[test]
    fn test_split_rust_path() {
        assert_eq!(split_function_name("app::server::run"), ("app::server", "run"));
        assert_eq!(split_function_name("main"), ("", "main"));
    }

    #[test]
    fn test_split_folds_closures() {
        assert_eq!(split_function_name("app::run::{{closure}}"), ("app", "run"));
        assert_eq!(
            split_function_name("app::run::{{closure}}::{{closure}}"),
            ("app", "run")
        );
        assert_eq!(split_function_name("app::run::{closure#0}"), ("app", "run"));
    }

    #[test]
    fn test_split_ignores_separators_in_generics() {
        assert_eq!(
            split_function_name("<app::Conn as core::fmt::Display>::fmt"),
            ("<app::Conn as core::fmt::Display>", "fmt")
        );
        assert_eq!(
            split_function_name("app::Pool<std::net::TcpStream>::get"),
            ("app::Pool<std::net::TcpStream>", "get")
        );
    }

    #[test]
    fn test_split_drops_turbofish() {
        assert_eq!(
            split_function_name("app::worker::process::<u32>"),
            ("app::worker", "process")
        );
        assert_eq!(
            split_function_name("app::worker::process::<alloc::vec::Vec<u8>>::{{closure}}"),
            ("app::worker", "process")
        );
        assert_eq!(
            split_function_name("app::Pool<u8>::get::<std::net::TcpStream>"),
            ("app::Pool<u8>", "get")
        );
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("src/bin/main.rs"), "main.rs");
        assert_eq!(base_name(r"C:\src\main.rs"), "main.rs");
        assert_eq!(base_name("main.rs"), "main.rs");
        assert_eq!(base_name(""), "");
    }

    #[test]
    fn test_path_prefix() {
        assert!(has_path_prefix("tracing::span::Span::new", "tracing"));
        assert!(has_path_prefix("<tracing::Span as core::ops::Drop>::drop", "tracing"));
        assert!(has_path_prefix("std", "std"));
        assert!(!has_path_prefix("tracing_subscriber::fmt::Layer::on_event", "tracing"));
        assert!(!has_path_prefix("my_tracing::emit", "tracing"));
        assert!(has_path_prefix(
            "caller_format::format::runtime::x",
            "caller_format::format"
        ));
        assert!(!has_path_prefix("caller_format::main", "caller_format::format"));
    }
}
