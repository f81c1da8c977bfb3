// File: ./src/model/title.rs
//! Title cleanup for grouping and fixed-width display.

/// Removes every character outside the allow-list.
///
/// With `ascii_only` the allow-list is all of ASCII; otherwise it is ASCII
/// letters, digits, space, `/`, `[` and `]`. Characters are deleted, never
/// replaced or transliterated.
pub fn normalize_title(title: &str, ascii_only: bool) -> String {
    title
        .chars()
        .filter(|c| {
            if ascii_only {
                c.is_ascii()
            } else {
                c.is_ascii_alphanumeric() || matches!(c, ' ' | '/' | '[' | ']')
            }
        })
        .collect()
}

/// Keeps at most `width` leading characters. No ellipsis.
pub fn truncate_title(title: &str, width: usize) -> String {
    title.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_allow_list() {
        assert_eq!(normalize_title("Yoga 🧘", false), "Yoga ");
        assert_eq!(normalize_title("Gym!", false), "Gym");
        assert_eq!(normalize_title("[Team] sync / 1:1", false), "[Team] sync / 11");
        assert_eq!(normalize_title("Café-Treff", false), "CafTreff");
    }

    #[test]
    fn test_ascii_only_keeps_punctuation() {
        assert_eq!(normalize_title("Gym!", true), "Gym!");
        assert_eq!(normalize_title("1:1 w/ Bob (weekly)", true), "1:1 w/ Bob (weekly)");
        assert_eq!(normalize_title("Café 🧘 Treff", true), "Caf  Treff");
    }

    #[test]
    fn test_empty_and_idempotent() {
        assert_eq!(normalize_title("", true), "");
        assert_eq!(normalize_title("", false), "");

        for input in ["Yoga 🧘", "Ünïcödé [x]", "a/b\\c", "plain"] {
            for ascii_only in [true, false] {
                let once = normalize_title(input, ascii_only);
                assert_eq!(normalize_title(&once, ascii_only), once);
            }
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate_title("Standup", 3), "Sta");
        assert_eq!(truncate_title("Standup", 42), "Standup");
        assert_eq!(truncate_title("Standup", 0), "");
    }
}
