//! Display slug derivation.
//!
//! Slugs are a best-effort display key only: the random suffix reduces
//! collision probability but uniqueness is not enforced. Identity always goes
//! through `NoteId`.

use uuid::Uuid;

/// Length of the random suffix appended to every slug.
const SUFFIX_LEN: usize = 8;

/// Derive a slug from a note title.
///
/// Lowercases the title, collapses whitespace runs into single hyphens, strips
/// everything outside `[a-z0-9-]`, and appends a random suffix.
pub fn slug_from_title(title: &str) -> String {
    let mut slug = String::with_capacity(title.len() + SUFFIX_LEN);

    let mut last_was_hyphen = false;
    for c in title.to_lowercase().chars() {
        if c.is_whitespace() {
            if !last_was_hyphen && !slug.is_empty() {
                slug.push('-');
                last_was_hyphen = true;
            }
        } else if c.is_ascii_alphanumeric() || c == '-' {
            slug.push(c);
            last_was_hyphen = c == '-';
        }
        // everything else is dropped
    }

    let suffix = Uuid::new_v4().simple().to_string();
    slug.push_str(&suffix[..SUFFIX_LEN]);
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stem(slug: &str) -> &str {
        &slug[..slug.len() - SUFFIX_LEN]
    }

    #[test]
    fn lowercases_and_hyphenates() {
        let slug = slug_from_title("My Shopping List");
        assert_eq!(stem(&slug), "my-shopping-list");
    }

    #[test]
    fn strips_non_alphanumeric() {
        let slug = slug_from_title("Hello, World! (v2)");
        assert_eq!(stem(&slug), "hello-world-v2");
    }

    #[test]
    fn collapses_whitespace_runs() {
        let slug = slug_from_title("a   b\t c");
        assert_eq!(stem(&slug), "a-b-c");
    }

    #[test]
    fn suffix_is_lowercase_alphanumeric() {
        let slug = slug_from_title("Title");
        let suffix = &slug[slug.len() - SUFFIX_LEN..];
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn same_title_gets_distinct_slugs() {
        // Random suffix only: collisions possible in principle, vanishingly
        // unlikely in a two-sample test.
        assert_ne!(slug_from_title("Title"), slug_from_title("Title"));
    }

    #[test]
    fn symbol_only_title_still_produces_a_suffix() {
        let slug = slug_from_title("!!!");
        assert_eq!(slug.len(), SUFFIX_LEN);
    }
}
