use url::Url;

/// Syntactic check applied to every URL before it is shortened.
///
/// Validators are pure: no network access, no reachability checks. Any
/// `Fn(&str) -> bool` closure can be used as a validator.
pub trait UrlValidator: Send + Sync + 'static {
    fn is_valid(&self, url: &str) -> bool;
}

impl<F> UrlValidator for F
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    fn is_valid(&self, url: &str) -> bool {
        self(url)
    }
}

/// Accepts absolute URIs that carry both a scheme and an authority.
///
/// Any scheme is allowed (`https://`, `ftp://`, `foo://host`), but
/// authority-less forms such as `mailto:a@b` are rejected. Input is taken
/// verbatim: surrounding or embedded whitespace and control characters make
/// the URL invalid instead of being stripped, since the stored URL must be
/// the one that was validated.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbsoluteUriValidator;

impl UrlValidator for AbsoluteUriValidator {
    fn is_valid(&self, url: &str) -> bool {
        if url.is_empty() || url.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return false;
        }

        match Url::parse(url) {
            Ok(parsed) => parsed.has_host() && !parsed.cannot_be_a_base(),
            Err(_) => false,
        }
    }
}
