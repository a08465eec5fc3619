//! Expected names for application-triggered downloads
//!
//! The app derives the QR download filename from the typed link text:
//! every non-alphanumeric character becomes a dash, lowercased, followed by
//! an epoch-millis suffix. Two downloads of the same text at different
//! times therefore share a prefix but never a full name.

use regex::Regex;

/// Sanitize link text the way the application does when naming a download.
pub fn sanitized_stem(input: &str) -> String {
    input
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

/// Whether a suggested filename is `<sanitized stem>-<epoch millis>.png`
/// for the given link text.
pub fn download_name_matches(filename: &str, input: &str) -> bool {
    let stem = sanitized_stem(input);
    let pattern = format!(r"^{}-\d+\.png$", regex::escape(&stem));
    Regex::new(&pattern)
        .map(|re| re.is_match(filename))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("myapp://param/test", "myapp---param-test"; "scheme and slashes")]
    #[test_case("MyApp://X", "myapp---x"; "lowercased")]
    #[test_case("abc123", "abc123"; "already clean")]
    #[test_case("a b", "a-b"; "space")]
    fn test_sanitized_stem(input: &str, expected: &str) {
        assert_eq!(sanitized_stem(input), expected);
    }

    #[test]
    fn test_download_name_matches() {
        assert!(download_name_matches(
            "myapp---param-test-1712345678901.png",
            "myapp://param/test"
        ));
        assert!(!download_name_matches(
            "myapp---param-test.png",
            "myapp://param/test"
        ));
        assert!(!download_name_matches(
            "other-1712345678901.png",
            "myapp://param/test"
        ));
    }

    #[test]
    fn test_same_input_different_times_share_prefix() {
        let input = "myapp://verify/test";
        let stem = sanitized_stem(input);
        let first = format!("{stem}-1700000000000.png");
        let second = format!("{stem}-1700000000450.png");

        assert_ne!(first, second);
        assert!(download_name_matches(&first, input));
        assert!(download_name_matches(&second, input));
        assert!(first.starts_with(&stem) && second.starts_with(&stem));
    }
}
