use std::sync::Arc;

use archive_logging::{archive_info, archive_warn};

use crate::compose::build_post_document;
use crate::convert::{Converter, Html2MdConverter};
use crate::decode::decode_page;
use crate::extract::{check_access, extract_post, PageAccess};
use crate::fetch::{Fetcher, ProgressSink};
use crate::images::process_markdown_images;
use crate::namespace::{slug_from_url, AuthorNamespace};
use crate::persist::AtomicFileWriter;
use crate::types::{ArchiveError, ArchivedPost, PostOutcome, PostRecord, UnavailableReason};

#[derive(Debug, Clone)]
pub struct ArchiveSettings {
    /// Also keep the raw fetched page under the html directory.
    pub keep_html: bool,
}

impl Default for ArchiveSettings {
    fn default() -> Self {
        Self { keep_html: true }
    }
}

/// Composes the pipeline for one post URL: fetch, availability gate, field
/// extraction, image localization, persistence.
pub struct PostArchiver {
    fetcher: Arc<dyn Fetcher>,
    namespace: AuthorNamespace,
    settings: ArchiveSettings,
    converter: Box<dyn Converter>,
}

impl PostArchiver {
    pub fn new(fetcher: Arc<dyn Fetcher>, namespace: AuthorNamespace) -> Self {
        Self::with_settings(fetcher, namespace, ArchiveSettings::default())
    }

    pub fn with_settings(
        fetcher: Arc<dyn Fetcher>,
        namespace: AuthorNamespace,
        settings: ArchiveSettings,
    ) -> Self {
        Self {
            fetcher,
            namespace,
            settings,
            converter: Box::new(Html2MdConverter),
        }
    }

    pub fn namespace(&self) -> &AuthorNamespace {
        &self.namespace
    }

    /// Archives one post. Gated, unreachable, and undecodable pages come back
    /// as `PostOutcome::Unavailable`, never as errors; only a missing title or
    /// a filesystem failure is a hard error for the post.
    pub async fn archive_post(
        &self,
        url: &str,
        sink: &dyn ProgressSink,
    ) -> Result<PostOutcome, ArchiveError> {
        let author = self.namespace.author.as_str();

        let fetched = match self.fetcher.fetch(url, sink).await {
            Ok(output) => output,
            Err(err) => {
                archive_warn!("page fetch failed for {url} ({author}): {}", err.message);
                return Ok(PostOutcome::Unavailable(UnavailableReason::Fetch(err.kind)));
            }
        };

        let decoded = match decode_page(&fetched.bytes, fetched.metadata.content_type.as_deref()) {
            Ok(decoded) => decoded,
            Err(err) => {
                archive_warn!("undecodable page at {url} ({author}): {err}");
                return Ok(PostOutcome::Unavailable(UnavailableReason::Undecodable));
            }
        };

        let record = match check_access(&decoded.text) {
            PageAccess::Paywalled => {
                archive_info!("skipping paywalled post {url} ({author})");
                return Ok(PostOutcome::Unavailable(UnavailableReason::Paywalled));
            }
            PageAccess::MissingContent => {
                archive_info!("skipping {url} ({author}): no main content region");
                return Ok(PostOutcome::Unavailable(UnavailableReason::MissingContent));
            }
            PageAccess::Accessible(document) => {
                extract_post(&document, self.converter.as_ref())?
            }
        };

        self.namespace.ensure()?;

        let slug = slug_from_url(url);
        let body_markdown = process_markdown_images(
            &record.body_markdown,
            author,
            &slug,
            self.fetcher.as_ref(),
            &self.namespace.image_dir,
            sink,
        )
        .await;
        let record = PostRecord {
            body_markdown,
            ..record
        };

        let markdown_path = AtomicFileWriter::new(self.namespace.markdown_dir.clone())
            .write(&format!("{slug}.md"), &build_post_document(&record))?;

        let html_path = if self.settings.keep_html {
            let path = AtomicFileWriter::new(self.namespace.html_dir.clone())
                .write_bytes(&format!("{slug}.html"), &fetched.bytes)?;
            Some(path)
        } else {
            None
        };

        archive_info!("archived {url} -> {}", markdown_path.display());
        Ok(PostOutcome::Archived(ArchivedPost {
            record,
            markdown_path,
            html_path,
        }))
    }
}
