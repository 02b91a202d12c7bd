//! Feed extraction from OPML subscription lists.
//!
//! - [`record`] - The [`FeedRecord`] entry shared by every pipeline stage
//! - [`opml`] - OPML parsing into records, in document order
//!
//! # Example
//!
//! ```ignore
//! use opml2feedlist::feed::{parse, ExtractOptions};
//!
//! let feeds = parse(Path::new("subscriptions.opml"), ExtractOptions::default()).await?;
//! ```

mod opml;
mod record;

pub use opml::{decode_document, parse, parse_opml_content, ExtractOptions, OpmlError};
pub use record::{FeedRecord, COMMENT_PREFIX, SECTION_RULE};
