//! Which pages the validator applies to.

use crate::{Error, Result};

/// True when `url` contains any of `patterns`.
pub fn is_applicable<S: AsRef<str>>(url: &str, patterns: &[S]) -> bool {
    patterns.iter().any(|p| url.contains(p.as_ref()))
}

/// Gate run before evaluation; nothing is evaluated for other sites.
pub fn ensure_applicable<S: AsRef<str>>(url: &str, patterns: &[S]) -> Result<()> {
    if is_applicable(url, patterns) {
        Ok(())
    } else {
        Err(Error::NoApplicablePage(format!(
            "{} no es una página de Samsung",
            url
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATTERNS: [&str; 2] = ["samsung.com", "p6-"];

    #[test]
    fn matches_site_and_preview_hosts() {
        assert!(is_applicable("https://www.samsung.com/pe/", &PATTERNS));
        assert!(is_applicable("https://p6-qa.samsung-preview.net/pe/galaxy", &PATTERNS));
        assert!(!is_applicable("https://www.example.com/", &PATTERNS));
    }

    #[test]
    fn rejects_other_sites() {
        let err = ensure_applicable("https://www.example.com/", &PATTERNS).unwrap_err();
        assert!(matches!(err, Error::NoApplicablePage(_)));
        assert!(ensure_applicable("https://www.samsung.com/pe/", &PATTERNS).is_ok());
    }
}
