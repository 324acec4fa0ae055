//! Lookup URL rules
//!
//! Turns a navigation URL into a candidate word and a dedup key:
//!
//! - The word is the last path segment, percent-decoded, with trailing `/`
//!   removed. `https://lugatim.com/s/KAL%C4%B0TE` yields `KALİTE`.
//! - The dedup key is that decoded last segment, lowercased. Host, scheme,
//!   query and fragment play no part, so `…/s/KALEM`, `…/s/kalem/` and
//!   `https://www.lugatim.com/s/Kalem?ref=home` share a key.

use std::fmt;

use url::Url;

use crate::models::EntryId;

/// Path segment of the dictionary's own landing page (`/s/`)
pub const LANDING_SEGMENT: &str = "s";

/// Why a navigation URL was not recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The URL could not be parsed or its last segment is not valid UTF-8
    InvalidUrl,
    /// The URL carries no lookup term
    EmptyWord,
    /// The URL points at the lookup landing page
    LandingPage,
    /// An entry with the same dedup key already exists
    Duplicate(EntryId),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::InvalidUrl => write!(f, "not a valid lookup URL"),
            Rejection::EmptyWord => write!(f, "no lookup term in URL"),
            Rejection::LandingPage => write!(f, "landing page, not a lookup"),
            Rejection::Duplicate(_) => write!(f, "already in history"),
        }
    }
}

/// Extract the lookup term from a navigation URL
pub fn extract_word(url: &str) -> Result<String, Rejection> {
    let parsed = Url::parse(url).map_err(|_| Rejection::InvalidUrl)?;

    let segment = last_segment(parsed.path());

    let word = urlencoding::decode(segment)
        .map_err(|_| Rejection::InvalidUrl)?
        .trim_end_matches('/')
        .to_string();

    if word.trim().is_empty() {
        return Err(Rejection::EmptyWord);
    }

    if word.eq_ignore_ascii_case(LANDING_SEGMENT) {
        return Err(Rejection::LandingPage);
    }

    Ok(word)
}

/// Case-insensitive identity key for a lookup URL
///
/// Two URLs are the same lookup when their final path segments match after
/// percent-decoding, ignoring case.
pub fn dedup_key(url: &str) -> String {
    let segment = match Url::parse(url) {
        Ok(parsed) => last_segment(parsed.path()).to_string(),
        Err(_) => last_segment(url.trim()).to_string(),
    };

    match urlencoding::decode(&segment) {
        Ok(decoded) => decoded.trim_end_matches('/').to_lowercase(),
        Err(_) => segment.to_lowercase(),
    }
}

/// Last non-empty `/`-separated segment of a path
fn last_segment(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or("")
}

/// Build the lookup URL for a typed word
///
/// The word is trimmed, uppercased and percent-encoded. Returns `None` for
/// blank input.
pub fn build_lookup_url(site_url: &str, lookup_path: &str, word: &str) -> Option<String> {
    let word = word.trim();
    if word.is_empty() {
        return None;
    }

    let path = lookup_path.trim_matches('/');
    Some(format!(
        "{}/{}/{}",
        site_url.trim_end_matches('/'),
        path,
        urlencoding::encode(&word.to_uppercase())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_word_simple() {
        assert_eq!(
            extract_word("https://lugatim.com/s/KALEM").unwrap(),
            "KALEM"
        );
    }

    #[test]
    fn test_extract_word_trailing_slash() {
        assert_eq!(
            extract_word("https://lugatim.com/s/KALEM/").unwrap(),
            "KALEM"
        );
    }

    #[test]
    fn test_extract_word_decodes_non_ascii() {
        assert_eq!(
            extract_word("https://lugatim.com/s/%C4%B0ST%C4%B0KBAL").unwrap(),
            "İSTİKBAL"
        );
        assert_eq!(
            extract_word("https://lugatim.com/s/G%C3%9CZEL%20S%C3%96Z").unwrap(),
            "GÜZEL SÖZ"
        );
    }

    #[test]
    fn test_extract_word_ignores_query_and_fragment() {
        assert_eq!(
            extract_word("https://lugatim.com/s/KALEM?ref=home#top").unwrap(),
            "KALEM"
        );
    }

    #[test]
    fn test_extract_word_landing_page() {
        assert_eq!(
            extract_word("https://lugatim.com/s/"),
            Err(Rejection::LandingPage)
        );
        assert_eq!(
            extract_word("https://lugatim.com/s"),
            Err(Rejection::LandingPage)
        );
        assert_eq!(
            extract_word("https://lugatim.com/S/"),
            Err(Rejection::LandingPage)
        );
    }

    #[test]
    fn test_extract_word_empty() {
        assert_eq!(extract_word("https://lugatim.com"), Err(Rejection::EmptyWord));
        assert_eq!(extract_word("https://lugatim.com/"), Err(Rejection::EmptyWord));
        assert_eq!(
            extract_word("https://lugatim.com/s/%20%20"),
            Err(Rejection::EmptyWord)
        );
    }

    #[test]
    fn test_extract_word_invalid() {
        assert_eq!(extract_word("not a url"), Err(Rejection::InvalidUrl));
        assert_eq!(extract_word(""), Err(Rejection::InvalidUrl));
        assert_eq!(
            extract_word("https://lugatim.com/s/%FF%FE"),
            Err(Rejection::InvalidUrl)
        );
    }

    #[test]
    fn test_dedup_key_case_insensitive() {
        assert_eq!(
            dedup_key("https://lugatim.com/s/KALEM"),
            dedup_key("https://LUGATIM.com/s/kalem")
        );
    }

    #[test]
    fn test_dedup_key_trailing_slash_and_fragment() {
        let key = dedup_key("https://lugatim.com/s/KALEM");
        assert_eq!(key, "kalem");
        assert_eq!(dedup_key("https://lugatim.com/s/KALEM/"), key);
        assert_eq!(dedup_key("https://lugatim.com/s/KALEM#anlam"), key);
    }

    #[test]
    fn test_dedup_key_ignores_query_host_and_scheme() {
        let key = dedup_key("https://lugatim.com/s/KALEM");
        assert_eq!(dedup_key("https://lugatim.com/s/KALEM?ref=home"), key);
        assert_eq!(dedup_key("https://www.lugatim.com/s/kalem"), key);
        assert_eq!(dedup_key("http://lugatim.com/s/Kalem"), key);
    }

    #[test]
    fn test_dedup_key_non_ascii_case() {
        assert_eq!(
            dedup_key("https://lugatim.com/s/%C3%87AY"),
            dedup_key("https://lugatim.com/s/%C3%A7ay")
        );
    }

    #[test]
    fn test_dedup_key_encoding_forms_match() {
        assert_eq!(
            dedup_key("https://lugatim.com/s/%C4%B0LM"),
            dedup_key("https://lugatim.com/s/%c4%b0lm")
        );
        assert_eq!(
            dedup_key("https://lugatim.com/s/İLM"),
            dedup_key("https://lugatim.com/s/%C4%B0LM")
        );
    }

    #[test]
    fn test_dedup_key_distinguishes_words() {
        assert_ne!(
            dedup_key("https://lugatim.com/s/KALEM"),
            dedup_key("https://lugatim.com/s/KELAM")
        );
    }

    #[test]
    fn test_dedup_key_unparsable_fallback() {
        assert_eq!(dedup_key("  Not A URL/ "), "not a url");
    }

    #[test]
    fn test_build_lookup_url() {
        assert_eq!(
            build_lookup_url("https://lugatim.com", "/s/", "kalem").unwrap(),
            "https://lugatim.com/s/KALEM"
        );
        assert_eq!(
            build_lookup_url("https://lugatim.com/", "s", "  güzel söz ").unwrap(),
            "https://lugatim.com/s/G%C3%9CZEL%20S%C3%96Z"
        );
        assert!(build_lookup_url("https://lugatim.com", "/s/", "   ").is_none());
    }

    #[test]
    fn test_built_url_extracts_back() {
        let url = build_lookup_url("https://lugatim.com", "/s/", "istikbal").unwrap();
        assert_eq!(extract_word(&url).unwrap(), "ISTIKBAL");
    }
}
