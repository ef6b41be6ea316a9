//! Deterministic slug derivation for post titles.

use slug::slugify;

/// Derive a URL-safe slug from a post title.
///
/// Lowercases the title, collapses every run of non-alphanumeric characters
/// into a single hyphen, and strips leading/trailing separators. The slug is
/// recomputed from the current title on every write, so editing a title
/// changes the slug. A title with no representable characters yields an
/// empty string; callers gate on non-empty titles before writing.
pub fn derive_slug(title: &str) -> String {
    slugify(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(derive_slug("Hello World"), "hello-world");
    }

    #[test]
    fn collapses_punctuation_runs() {
        assert_eq!(derive_slug("Hello,   World!!!"), "hello-world");
        assert_eq!(derive_slug("Rust 2024: what's new?"), "rust-2024-what-s-new");
    }

    #[test]
    fn strips_leading_and_trailing_separators() {
        assert_eq!(derive_slug("  --Hello-- "), "hello");
    }

    #[test]
    fn unrepresentable_title_yields_empty_slug() {
        assert_eq!(derive_slug("!!!"), "");
        assert_eq!(derive_slug(""), "");
    }

    #[test]
    fn slug_charset_is_lowercase_alphanumeric_and_hyphen() {
        let titles = [
            "Hello World",
            "ALL CAPS TITLE",
            "punct: a,b;c/d",
            "числа 123 и текст",
            "trailing dots...",
            "a",
        ];

        for title in titles {
            let slug = derive_slug(title);
            assert!(
                slug.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "unexpected character in slug {slug:?} for title {title:?}"
            );
            assert!(!slug.starts_with('-'), "leading separator in {slug:?}");
            assert!(!slug.ends_with('-'), "trailing separator in {slug:?}");
        }
    }
}
