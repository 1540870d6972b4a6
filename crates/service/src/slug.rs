//! URL slugs for categories and services.
//!
//! A slug is derived from a display name and then made unique against the
//! slugs already taken in the same collection by appending `-2`, `-3`, ...

/// Derive a URL-friendly slug from `name`.
///
/// Lowercases, trims, turns runs of whitespace or underscores into a single
/// hyphen, drops everything that is not a word character or hyphen, collapses
/// hyphen runs and trims hyphens from both ends. The result may be empty;
/// callers decide whether an empty slug is acceptable.
///
/// ```
/// assert_eq!(service::slug::generate_slug("Kitchen Remodeling"), "kitchen-remodeling");
/// assert_eq!(service::slug::generate_slug("  A & B!! "), "a-b");
/// ```
pub fn generate_slug(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_separator = false;

    for ch in lowered.trim().chars() {
        if ch.is_whitespace() || ch == '_' || ch == '-' {
            pending_separator = true;
            continue;
        }
        if !is_word_char(ch) {
            continue;
        }
        if pending_separator && !out.is_empty() {
            out.push('-');
        }
        pending_separator = false;
        out.push(ch);
    }

    out
}

// `\w` without the unicode flag: ASCII letters, digits and underscore.
// Underscores are folded into separators before this check runs.
fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
}

/// Return `slug` unchanged when it is free, otherwise the first `slug-N`
/// (N = 2, 3, ...) not present in `existing`.
pub fn ensure_unique_slug<S: AsRef<str>>(slug: &str, existing: &[S]) -> String {
    let taken = |candidate: &str| existing.iter().any(|s| s.as_ref() == candidate);
    if !taken(slug) {
        return slug.to_string();
    }

    let mut counter = 2u64;
    loop {
        let candidate = format!("{slug}-{counter}");
        if !taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// [`generate_slug`] followed by [`ensure_unique_slug`].
pub fn generate_unique_slug<S: AsRef<str>>(name: &str, existing: &[S]) -> String {
    ensure_unique_slug(&generate_slug(name), existing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_basic() {
        assert_eq!(generate_slug("Kitchen Remodeling"), "kitchen-remodeling");
        assert_eq!(generate_slug("  A & B!! "), "a-b");
    }

    #[test]
    fn slug_collapses_separators() {
        assert_eq!(generate_slug("Exterior & Roofing"), "exterior-roofing");
        assert_eq!(generate_slug("snake_case__name"), "snake-case-name");
        assert_eq!(generate_slug("--already--hyphenated--"), "already-hyphenated");
        assert_eq!(generate_slug("HVAC\tand\nDucts"), "hvac-and-ducts");
    }

    #[test]
    fn slug_drops_non_word_characters() {
        assert_eq!(generate_slug("Café Décor"), "caf-dcor");
        assert_eq!(generate_slug("50% off!"), "50-off");
    }

    #[test]
    fn slug_of_punctuation_is_empty() {
        assert_eq!(generate_slug(""), "");
        assert_eq!(generate_slug("   "), "");
        assert_eq!(generate_slug("&&& !!!"), "");
    }

    #[test]
    fn slug_is_stable_on_its_own_output() {
        for name in ["Kitchen Remodeling", "  A & B!! ", "Pool  Installation_2"] {
            let once = generate_slug(name);
            assert_eq!(generate_slug(&once), once);
        }
    }

    #[test]
    fn unique_slug_suffixes() {
        let none: [&str; 0] = [];
        assert_eq!(ensure_unique_slug("foo", &none), "foo");
        assert_eq!(ensure_unique_slug("foo", &["foo"]), "foo-2");
        assert_eq!(ensure_unique_slug("foo", &["foo", "foo-2"]), "foo-3");
        assert_eq!(ensure_unique_slug("foo", &["foo-2"]), "foo");
    }

    #[test]
    fn unique_slug_skips_gaps_in_order() {
        let existing = vec!["deck".to_string(), "deck-2".to_string(), "deck-4".to_string()];
        assert_eq!(ensure_unique_slug("deck", &existing), "deck-3");
    }

    #[test]
    fn generate_unique_combines_both_steps() {
        assert_eq!(generate_unique_slug("Framing", &["framing"]), "framing-2");
    }
}
