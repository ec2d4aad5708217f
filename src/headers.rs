//! Ordered response-header map.
//!
//! Built from the already-split header lines libcurl hands to the header
//! callback, never by re-splitting raw response bytes. The status line is
//! stored under the synthetic [`STATUS_LINE_KEY`].

/// Synthetic key holding the HTTP status line (e.g. `HTTP/1.1 200 OK`).
pub const STATUS_LINE_KEY: &str = "http_code";

/// Response headers in arrival order, plus the status line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Case-insensitive lookup. Returns the first matching value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Status line of the response, if one was captured.
    pub fn status_line(&self) -> Option<&str> {
        self.get(STATUS_LINE_KEY)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parses header lines (status line first, as delivered by the transport)
    /// into a map. Lines without a `:` separator are skipped; the transfer is
    /// not failed for them.
    pub(crate) fn from_lines(lines: &[String]) -> Self {
        let mut map = HeaderMap::new();
        for (i, line) in lines.iter().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if i == 0 {
                map.entries
                    .push((STATUS_LINE_KEY.to_string(), line.to_string()));
                continue;
            }
            match line.split_once(':') {
                Some((name, value)) => map
                    .entries
                    .push((name.trim().to_string(), value.trim().to_string())),
                None => tracing::debug!("skipping malformed header line: {:?}", line),
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn from_lines_keeps_status_line_and_order() {
        let map = HeaderMap::from_lines(&lines(&[
            "HTTP/1.1 200 OK",
            "Content-Type: text/html; charset=utf-8",
            "Content-Length: 42",
        ]));
        assert_eq!(map.len(), 3);
        assert_eq!(map.status_line(), Some("HTTP/1.1 200 OK"));
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![STATUS_LINE_KEY, "Content-Type", "Content-Length"]);
    }

    #[test]
    fn get_is_case_insensitive() {
        let map = HeaderMap::from_lines(&lines(&["HTTP/1.1 200 OK", "ETag: \"abc\""]));
        assert_eq!(map.get("etag"), Some("\"abc\""));
        assert_eq!(map.get("ETAG"), Some("\"abc\""));
        assert!(map.get("missing").is_none());
    }

    #[test]
    fn value_keeps_embedded_colons() {
        let map = HeaderMap::from_lines(&lines(&[
            "HTTP/1.1 200 OK",
            "Location: http://example.com:8080/next",
        ]));
        assert_eq!(map.get("Location"), Some("http://example.com:8080/next"));
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let map = HeaderMap::from_lines(&lines(&[
            "HTTP/1.1 200 OK",
            "this-line-has-no-separator",
            "X-Good: yes",
        ]));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("X-Good"), Some("yes"));
    }

    #[test]
    fn empty_input_is_empty_map() {
        let map = HeaderMap::from_lines(&[]);
        assert!(map.is_empty());
        assert!(map.status_line().is_none());
    }
}
