use sha2::{Digest, Sha256};
use url::Url;

const FALLBACK_STEM: &str = "image";
const FALLBACK_EXT: &str = "bin";
const KNOWN_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "svg", "avif", "bmp", "ico",
];

/// Filesystem-safe, deterministic image filename: `{stem}--{short_hash(url)}.{ext}`.
///
/// The platform serves images through a resizing CDN that percent-encodes the
/// true source URL into its path, so the stem comes from the innermost URL
/// after decoding. The short hash of the full original URL keeps distinct
/// sources with the same basename from colliding, and makes repeated calls
/// with the same URL yield the same name.
pub fn sanitize_image_filename(url: &str) -> String {
    let decoded = urlencoding::decode(url)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| url.to_string());
    let segment = last_path_segment(innermost_url(&decoded));
    let (stem, ext) = split_extension(&segment);
    format!(
        "{stem}--{hash}.{ext}",
        stem = sanitize_stem(stem),
        hash = short_hash(url),
    )
}

/// CDN wrappers embed the original URL in their path; use the last embedded
/// URL when one is present.
fn innermost_url(decoded: &str) -> &str {
    match (decoded.rfind("https://"), decoded.rfind("http://")) {
        (Some(a), Some(b)) => &decoded[a.max(b)..],
        (Some(a), None) => &decoded[a..],
        (None, Some(b)) => &decoded[b..],
        (None, None) => decoded,
    }
}

fn last_path_segment(candidate: &str) -> String {
    if let Ok(parsed) = Url::parse(candidate) {
        if let Some(segment) = parsed
            .path_segments()
            .and_then(|segments| segments.rev().find(|s| !s.is_empty()))
        {
            return segment.to_string();
        }
    }
    // Not a parseable URL; split off query/fragment by hand.
    candidate
        .split(['?', '#'])
        .next()
        .unwrap_or(candidate)
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or("")
        .to_string()
}

fn split_extension(segment: &str) -> (&str, &str) {
    if let Some((stem, ext)) = segment.rsplit_once('.') {
        if KNOWN_EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext))
        {
            return (stem, ext);
        }
    }
    (segment, FALLBACK_EXT)
}

fn sanitize_stem(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]);

    // Collapse runs of underscores left behind by the replacement.
    let mut compacted = String::with_capacity(cleaned.len());
    let mut prev_underscore = false;
    for c in cleaned.chars() {
        if c == '_' {
            if !prev_underscore {
                compacted.push(c);
            }
            prev_underscore = true;
        } else {
            compacted.push(c);
            prev_underscore = false;
        }
    }

    if compacted.is_empty() {
        compacted = FALLBACK_STEM.to_string();
    }
    if compacted.len() > 80 {
        let mut end = 80;
        while end > 0 && !compacted.is_char_boundary(end) {
            end -= 1;
        }
        compacted.truncate(end);
    }
    if is_reserved_windows_name(&compacted) {
        compacted.push('_');
    }
    compacted
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

fn short_hash(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
