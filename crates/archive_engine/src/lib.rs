//! Archiver engine: fetches Substack posts, converts them to markdown, and
//! localizes embedded images so the archive is self-contained.
mod archive;
mod compose;
mod convert;
mod decode;
mod document;
mod extract;
mod fetch;
mod filename;
mod images;
mod namespace;
mod persist;
mod types;

pub use archive::{ArchiveSettings, PostArchiver};
pub use compose::build_post_document;
pub use convert::{Converter, Html2MdConverter};
pub use decode::{decode_page, DecodeError, DecodedPage};
pub use document::PostDocument;
pub use extract::{check_access, extract_post, PageAccess};
pub use fetch::{ChannelProgressSink, FetchSettings, Fetcher, ProgressSink, ReqwestFetcher};
pub use filename::sanitize_image_filename;
pub use images::{count_images_in_markdown, process_markdown_images};
pub use namespace::{author_from_url, slug_from_url, AuthorNamespace};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{
    ArchiveError, ArchiveEvent, ArchivedPost, ExtractError, FailureKind, FetchError,
    FetchMetadata, FetchOutput, PostOutcome, PostRecord, UnavailableReason,
};
