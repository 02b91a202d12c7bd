/// Prefix that marks a line of the feed list as a comment.
pub const COMMENT_PREFIX: &str = "#";

/// Separator line framing the per-file section header.
pub const SECTION_RULE: &str = "# ========================================";

/// One entry of the generated feed list.
///
/// Either a feed subscription extracted from an `<outline>` element, or a
/// literal comment line (its `url` starts with `#`) that the writer emits
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRecord {
    /// Feed URL, or the full comment line for section markers.
    pub url: String,
    /// Display title. Empty when the outline had neither `title` nor `text`.
    pub title: String,
}

impl FeedRecord {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }

    /// Builds a comment record that is written out as-is.
    pub fn comment(line: impl Into<String>) -> Self {
        Self {
            url: line.into(),
            title: String::new(),
        }
    }

    /// The three-line header announcing the feeds of one input file.
    pub fn section_header(file_name: &str) -> [FeedRecord; 3] {
        [
            Self::comment(SECTION_RULE),
            Self::comment(format!("{} Feeds from: {}", COMMENT_PREFIX, file_name)),
            Self::comment(SECTION_RULE),
        ]
    }

    /// True for section markers and any other record whose URL starts with `#`.
    pub fn is_comment(&self) -> bool {
        self.url.starts_with(COMMENT_PREFIX)
    }
}
