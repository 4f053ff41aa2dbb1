use std::collections::{HashMap, HashSet};
use std::path::Path;

use archive_logging::archive_warn;
use regex::Regex;

use crate::fetch::{Fetcher, ProgressSink};
use crate::filename::sanitize_image_filename;
use crate::persist::AtomicFileWriter;
use crate::types::ArchiveEvent;

/// Matches markdown image embeds `![alt](url)`. Plain links have no leading
/// `!` and are not matched.
const IMAGE_EMBED_PATTERN: &str = r"!\[([^\]]*)\]\(([^)\s]+)\)";

fn image_embed_regex() -> Regex {
    Regex::new(IMAGE_EMBED_PATTERN).expect("image embed pattern is valid")
}

/// Number of image embeds in a markdown body. Pure text scan, used to size
/// progress reporting before localization starts.
pub fn count_images_in_markdown(markdown: &str) -> usize {
    image_embed_regex().find_iter(markdown).count()
}

/// Localizes every image embed in `markdown`: downloads each unique source URL
/// at most once into `image_dir` and rewrites successful references to
/// `../substack_images/<author>/<filename>`, relative to the markdown file's
/// own directory.
///
/// A failed download leaves that reference pointing at its original remote URL
/// so the document stays renderable, and never aborts the remaining images.
/// One `ImageProcessed` event is emitted per reference encountered, matching
/// the total from `count_images_in_markdown` exactly.
pub async fn process_markdown_images(
    markdown: &str,
    author: &str,
    post_slug: &str,
    fetcher: &dyn Fetcher,
    image_dir: &Path,
    sink: &dyn ProgressSink,
) -> String {
    let regex = image_embed_regex();
    let references: Vec<String> = regex
        .captures_iter(markdown)
        .map(|caps| caps[2].to_string())
        .collect();

    let writer = AtomicFileWriter::new(image_dir.to_path_buf());
    let mut localized: HashMap<String, String> = HashMap::new();
    let mut failed: HashSet<String> = HashSet::new();

    for source_url in &references {
        if !localized.contains_key(source_url) && !failed.contains(source_url) {
            match localize_one(source_url, author, post_slug, fetcher, image_dir, &writer, sink)
                .await
            {
                Some(filename) => {
                    localized.insert(source_url.clone(), filename);
                }
                None => {
                    failed.insert(source_url.clone());
                }
            }
        }
        sink.emit(ArchiveEvent::ImageProcessed {
            url: source_url.clone(),
        });
    }

    regex
        .replace_all(markdown, |caps: &regex::Captures<'_>| {
            let alt = &caps[1];
            let url = &caps[2];
            match localized.get(url) {
                Some(filename) => format!("![{alt}](../substack_images/{author}/{filename})"),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Returns the local filename on success, `None` when the image could not be
/// downloaded or stored. An already-present file is a success without a
/// download, which is what makes re-runs idempotent.
async fn localize_one(
    source_url: &str,
    author: &str,
    post_slug: &str,
    fetcher: &dyn Fetcher,
    image_dir: &Path,
    writer: &AtomicFileWriter,
    sink: &dyn ProgressSink,
) -> Option<String> {
    let filename = sanitize_image_filename(source_url);
    if image_dir.join(&filename).exists() {
        return Some(filename);
    }

    let output = match fetcher.fetch(source_url, sink).await {
        Ok(output) => output,
        Err(err) => {
            archive_warn!(
                "image download failed for {source_url} ({author}/{post_slug}): {}",
                err.message
            );
            return None;
        }
    };

    match writer.write_bytes(&filename, &output.bytes) {
        Ok(_) => Some(filename),
        Err(err) => {
            archive_warn!("could not store image {source_url} ({author}/{post_slug}): {err}");
            None
        }
    }
}
