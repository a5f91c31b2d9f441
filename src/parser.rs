/// Log-line grammar: extracts request-handling events from Django-style
/// text log lines.
///
/// Expected shape (only the fixed-position prefix and the first path token
/// carry meaning; the rest of the line is free text):
///
/// ```text
/// 2025-04-27 20:15:10,123 INFO django.request: GET /api/v1/test/ 200 OK [192.168.1.1]
/// ^date      ^time        ^lvl ^module         ^... first `/` token is the handler
/// ```

/// Module tag identifying request-log entries.
pub const REQUEST_MODULE: &str = "django.request";

/// Minimum number of whitespace-separated tokens in a well-formed entry.
const MIN_TOKENS: usize = 6;

const LEVEL_INDEX: usize = 2;
const MODULE_INDEX: usize = 3;
/// Handler search starts after the module tag and the HTTP method.
const HANDLER_SEARCH_START: usize = 5;

/// One request-handling event extracted from a log line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventRecord {
    /// URL-like path, always starts with `/`.
    pub handler: String,
    /// Upper-cased severity token, kept verbatim even when unrecognized.
    pub level: String,
}

impl EventRecord {
    pub fn new(handler: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            handler: handler.into(),
            level: level.into(),
        }
    }
}

/// Parse a single log line.
///
/// Returns `None` for blank lines, lines with too few tokens, lines from any
/// module other than [`REQUEST_MODULE`], and request lines with no path token.
pub fn parse_line(line: &str) -> Option<EventRecord> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < MIN_TOKENS {
        return None;
    }

    let module = parts[MODULE_INDEX].trim_end_matches(':');
    if module != REQUEST_MODULE {
        return None;
    }

    let level = parts[LEVEL_INDEX].to_uppercase();
    let handler = parts[HANDLER_SEARCH_START..]
        .iter()
        .find(|part| part.starts_with('/'))?;

    Some(EventRecord::new(*handler, level))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str =
        "2025-04-27 20:15:10,123 INFO django.request: GET /api/v1/test/ 200 OK [192.168.1.1]";

    #[test]
    fn parses_well_formed_request_line() {
        assert_eq!(
            parse_line(SAMPLE),
            Some(EventRecord::new("/api/v1/test/", "INFO"))
        );
    }

    #[test]
    fn blank_and_whitespace_lines_yield_nothing() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   \t  "), None);
        assert_eq!(parse_line("\n"), None);
    }

    #[test]
    fn fewer_than_six_tokens_yields_nothing() {
        assert_eq!(parse_line("2025-04-27 20:15:10,123 INFO django.request:"), None);
        assert_eq!(
            parse_line("2025-04-27 20:15:10,123 INFO django.request: /api/"),
            None
        );
    }

    #[test]
    fn other_modules_are_ignored() {
        let line =
            "2025-04-27 20:15:10,123 WARNING django.security: GET /admin/ 403 Forbidden";
        assert_eq!(parse_line(line), None);

        let prefixed =
            "2025-04-27 20:15:10,123 INFO django.request.extra: GET /api/v1/test/ 200 OK";
        assert_eq!(parse_line(prefixed), None);
    }

    #[test]
    fn module_tag_without_colon_still_matches() {
        let line = "2025-04-27 20:15:10,123 ERROR django.request GET /api/v1/fail/ 500";
        assert_eq!(
            parse_line(line),
            Some(EventRecord::new("/api/v1/fail/", "ERROR"))
        );
    }

    #[test]
    fn first_slash_token_wins() {
        let line = "2025-04-27 20:15:10,123 INFO django.request: GET /first/ /second/ 200";
        assert_eq!(parse_line(line).unwrap().handler, "/first/");
    }

    #[test]
    fn slash_token_before_index_five_is_not_a_handler() {
        // Index 4 is the HTTP method slot and is skipped.
        let line = "2025-04-27 20:15:10,123 INFO django.request: /not-here/ 200 OK done";
        assert_eq!(parse_line(line), None);
    }

    #[test]
    fn no_handler_yields_nothing() {
        let line =
            "2025-04-27 20:15:10,123 INFO django.request: Internal Server Error occurred here";
        assert_eq!(parse_line(line), None);
    }

    #[test]
    fn level_is_upper_cased_but_not_validated() {
        let line = "2025-04-27 20:15:10,123 info django.request: GET /api/ 200 OK";
        assert_eq!(parse_line(line).unwrap().level, "INFO");

        let unknown = "2025-04-27 20:15:10,123 notice django.request: GET /api/ 200 OK";
        assert_eq!(parse_line(unknown).unwrap().level, "NOTICE");
    }

    #[test]
    fn surrounding_whitespace_and_runs_are_tolerated() {
        let line = "  2025-04-27   20:15:10,123\tDEBUG  django.request:  GET   /api/x/  200  ";
        assert_eq!(parse_line(line), Some(EventRecord::new("/api/x/", "DEBUG")));
    }
}
