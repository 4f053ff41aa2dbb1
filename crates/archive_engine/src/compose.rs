use crate::types::PostRecord;

/// Assembles the on-disk document: title heading, optional subtitle, date and
/// like-count lines, then the (localized) body.
pub fn build_post_document(record: &PostRecord) -> String {
    let mut doc = format!("# {}\n\n", record.title);
    if let Some(subtitle) = &record.subtitle {
        doc.push_str(&format!("## {subtitle}\n\n"));
    }
    if let Some(date) = &record.publish_date {
        doc.push_str(&format!("**{date}**\n\n"));
    }
    if let Some(likes) = record.like_count {
        doc.push_str(&format!("**Likes:** {likes}\n\n"));
    }
    doc.push_str(&record.body_markdown);
    if !doc.ends_with('\n') {
        doc.push('\n');
    }
    doc
}
