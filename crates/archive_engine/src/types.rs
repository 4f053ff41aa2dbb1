use std::fmt;
use std::path::PathBuf;

use crate::persist::PersistError;

/// One successfully extracted post. Immutable once produced; written out as a
/// markdown file (and optionally the raw page) under the author namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub title: String,
    pub subtitle: Option<String>,
    pub like_count: Option<u32>,
    pub publish_date: Option<String>,
    pub body_markdown: String,
}

/// Events emitted into the caller-owned progress sink.
///
/// `ImageProcessed` fires exactly once per image reference encountered during
/// localization, whether the download succeeded, failed, or was skipped, so
/// its total always matches `count_images_in_markdown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveEvent {
    Downloading { url: String, bytes: u64 },
    ImageProcessed { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Why a post could not be archived. All of these are normal skip outcomes;
/// callers log them and move on to the next post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    /// The page carries the platform's paywall notice.
    Paywalled,
    /// The main content region is absent entirely.
    MissingContent,
    /// The page itself could not be fetched.
    Fetch(FailureKind),
    /// The fetched bytes could not be decoded to text.
    Undecodable,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::Paywalled => write!(f, "content is paywalled"),
            UnavailableReason::MissingContent => write!(f, "main content region missing"),
            UnavailableReason::Fetch(kind) => write!(f, "page fetch failed: {kind}"),
            UnavailableReason::Undecodable => write!(f, "page bytes could not be decoded"),
        }
    }
}

/// Result of archiving one post URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    Archived(ArchivedPost),
    Unavailable(UnavailableReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedPost {
    pub record: PostRecord,
    pub markdown_path: PathBuf,
    pub html_path: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("post title missing from accessible markup")]
    MissingTitle,
    #[error("main content region missing from accessible markup")]
    MissingContent,
}

/// Hard per-post failures. Unavailable content is deliberately not in here.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}
