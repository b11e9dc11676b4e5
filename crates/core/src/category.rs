//! Canonical category name matching for AI tag results.
//!
//! The tagging model returns category and subcategory names as free text.
//! A name is accepted only when it matches an entry of the canonical list
//! exactly (ignoring case and surrounding whitespace). There is no fuzzy
//! matching: an unrecognized name is dropped, never guessed.

/// Find the payload of the canonical entry whose name matches `candidate`
/// case-insensitively and exactly.
///
/// Returns `None` for an empty candidate or when no entry matches.
pub fn match_canonical<'a, T>(
    candidate: &str,
    entries: impl IntoIterator<Item = (&'a str, T)>,
) -> Option<T> {
    let wanted = candidate.trim();
    if wanted.is_empty() {
        return None;
    }
    entries
        .into_iter()
        .find(|(name, _)| name.trim().eq_ignore_ascii_case(wanted))
        .map(|(_, payload)| payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANON: [(&str, u32); 3] = [("Tops", 1), ("Bottoms", 2), ("Outerwear", 3)];

    #[test]
    fn exact_match() {
        assert_eq!(match_canonical("Tops", CANON), Some(1));
    }

    #[test]
    fn case_insensitive_match() {
        assert_eq!(match_canonical("tOpS", CANON), Some(1));
        assert_eq!(match_canonical("OUTERWEAR", CANON), Some(3));
    }

    #[test]
    fn surrounding_whitespace_ignored() {
        assert_eq!(match_canonical("  Bottoms ", CANON), Some(2));
    }

    #[test]
    fn no_fuzzy_matching() {
        assert_eq!(match_canonical("Top", CANON), None);
        assert_eq!(match_canonical("Tops & Tees", CANON), None);
    }

    #[test]
    fn empty_candidate_never_matches() {
        assert_eq!(match_canonical("", CANON), None);
        assert_eq!(match_canonical("   ", CANON), None);
    }
}
