use std::path::{Path, PathBuf};

use url::Url;

use crate::persist::{ensure_output_dir, PersistError};

pub const MD_SUBDIR: &str = "substack_md_files";
pub const HTML_SUBDIR: &str = "substack_html_pages";
pub const IMAGE_SUBDIR: &str = "substack_images";

/// The per-author output directory triple. Keeping every asset under
/// author-named subpaths lets multiple authors share one archive root without
/// collisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorNamespace {
    pub author: String,
    pub markdown_dir: PathBuf,
    pub html_dir: PathBuf,
    pub image_dir: PathBuf,
}

impl AuthorNamespace {
    pub fn new(root: &Path, author: &str) -> Self {
        Self {
            author: author.to_string(),
            markdown_dir: root.join(MD_SUBDIR).join(author),
            html_dir: root.join(HTML_SUBDIR).join(author),
            image_dir: root.join(IMAGE_SUBDIR).join(author),
        }
    }

    /// Namespace keyed by the publication subdomain of `url`.
    pub fn for_url(root: &Path, url: &str) -> Self {
        Self::new(root, &author_from_url(url))
    }

    /// Creates all three directories; never errors when they already exist.
    pub fn ensure(&self) -> Result<(), PersistError> {
        ensure_output_dir(&self.markdown_dir)?;
        ensure_output_dir(&self.html_dir)?;
        ensure_output_dir(&self.image_dir)?;
        Ok(())
    }
}

/// Author identifier from the publication subdomain. Falls back to "unknown"
/// when the URL has no usable host, so malformed input never produces a bad
/// directory name.
pub fn author_from_url(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .and_then(|host| host.split('.').next().map(str::to_string))
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Post slug from the URL path (`/p/<slug>`). Falls back to "post" when the
/// path carries no segments.
pub fn slug_from_url(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "post".to_string())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{author_from_url, slug_from_url, AuthorNamespace};

    #[test]
    fn author_is_first_host_label() {
        assert_eq!(author_from_url("https://test.substack.com"), "test");
        assert_eq!(author_from_url("https://test.substack.com/p/a-post"), "test");
    }

    #[test]
    fn malformed_url_falls_back_to_unknown() {
        assert_eq!(author_from_url("not a url"), "unknown");
        assert_eq!(author_from_url(""), "unknown");
    }

    #[test]
    fn slug_is_last_path_segment() {
        assert_eq!(slug_from_url("https://test.substack.com/p/my-post"), "my-post");
        assert_eq!(slug_from_url("https://test.substack.com/"), "post");
    }

    #[test]
    fn namespace_paths_are_author_scoped() {
        let ns = AuthorNamespace::for_url(Path::new("/tmp/archive"), "https://test.substack.com");
        assert_eq!(ns.author, "test");
        assert!(ns.markdown_dir.ends_with("substack_md_files/test"));
        assert!(ns.html_dir.ends_with("substack_html_pages/test"));
        assert!(ns.image_dir.ends_with("substack_images/test"));
    }
}
