//! Utility functions shared by the extractor and the writer.
//!
//! - **Feed URL checks**: the opt-in `--http-only` filter
//! - **Title sanitising**: keeps `# <title>` comments on a single line
//!
//! # Examples
//!
//! ```
//! use opml2feedlist::util::{sanitize_title, validate_feed_url};
//!
//! assert!(validate_feed_url("https://example.com/feed.xml").is_ok());
//! assert_eq!(sanitize_title("Multi\nLine"), "Multi Line");
//! ```

mod text;
mod url_validator;

pub use text::sanitize_title;
pub use url_validator::{validate_feed_url, FeedUrlError};
