use crate::convert::Converter;
use crate::document::PostDocument;
use crate::types::{ExtractError, PostRecord};

/// Availability gate over freshly parsed markup.
///
/// Gated posts are common, so `Paywalled` and `MissingContent` are expected
/// outcomes rather than errors.
pub enum PageAccess {
    Accessible(PostDocument),
    Paywalled,
    MissingContent,
}

pub fn check_access(html: &str) -> PageAccess {
    let document = PostDocument::parse(html);
    if document.has_paywall_marker() {
        return PageAccess::Paywalled;
    }
    if document.find_main_content().is_none() {
        return PageAccess::MissingContent;
    }
    PageAccess::Accessible(document)
}

/// Pulls the structured fields out of an accessible page. The title is
/// required; subtitle, like count and date are reported as absent when their
/// markup is missing. The body keeps its remote image URLs at this stage;
/// localization happens later.
pub fn extract_post(
    document: &PostDocument,
    converter: &dyn Converter,
) -> Result<PostRecord, ExtractError> {
    let content_html = document
        .find_main_content()
        .ok_or(ExtractError::MissingContent)?;
    let title = document.find_title().ok_or(ExtractError::MissingTitle)?;

    Ok(PostRecord {
        title,
        subtitle: document.find_subtitle(),
        like_count: document.find_like_count(),
        publish_date: document.find_publish_date(),
        body_markdown: converter.to_markdown(&content_html),
    })
}
