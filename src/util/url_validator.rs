use thiserror::Error;
use url::Url;

/// Reasons a feed URL is rejected by the `--http-only` filter.
#[derive(Error, Debug)]
pub enum FeedUrlError {
    /// The URL string could not be parsed as an absolute URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
}

/// Checks that a feed URL is something the downstream reader can poll.
///
/// Only absolute `http`/`https` URLs pass. Relative references, `file://`,
/// `ftp://` and friends are rejected. No normalisation happens here: callers
/// keep writing the original string.
///
/// # Examples
///
/// ```
/// use opml2feedlist::util::validate_feed_url;
///
/// assert!(validate_feed_url("https://example.com/feed.xml").is_ok());
/// assert!(validate_feed_url("file:///etc/passwd").is_err());
/// assert!(validate_feed_url("/relative/feed").is_err());
/// ```
pub fn validate_feed_url(url_str: &str) -> Result<Url, FeedUrlError> {
    let url = Url::parse(url_str)?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(FeedUrlError::UnsupportedScheme(scheme.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls() {
        assert!(validate_feed_url("https://example.com/feed.xml").is_ok());
        assert!(validate_feed_url("http://news.example.org").is_ok());
        assert!(validate_feed_url("https://example.com:8443/rss?x=1&y=2").is_ok());
    }

    #[test]
    fn test_private_hosts_allowed() {
        // Local feed servers are legitimate subscriptions for a feed list
        assert!(validate_feed_url("http://localhost:8080/feed").is_ok());
        assert!(validate_feed_url("http://192.168.1.10/rss").is_ok());
    }

    #[test]
    fn test_invalid_schemes() {
        let err = validate_feed_url("ftp://example.com/feed").unwrap_err();
        assert!(matches!(err, FeedUrlError::UnsupportedScheme(ref s) if s == "ftp"));
        assert!(validate_feed_url("file:///etc/passwd").is_err());
        assert!(validate_feed_url("feed://example.com/rss").is_err());
    }

    #[test]
    fn test_relative_url_rejected() {
        let err = validate_feed_url("feeds/rss.xml").unwrap_err();
        assert!(matches!(err, FeedUrlError::InvalidUrl(_)));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(validate_feed_url("").is_err());
    }
}
