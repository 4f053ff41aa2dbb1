use archive_engine::sanitize_image_filename;
use pretty_assertions::assert_eq;

#[test]
fn filename_is_deterministic_and_safe() {
    let url = "https://substackcdn.com/image/fetch/w_720/test%2Fimage.jpg";
    let first = sanitize_image_filename(url);
    let second = sanitize_image_filename(url);

    assert_eq!(first, second);
    assert!(first.ends_with(".jpg"));
    assert!(!first.contains('/'));
    assert!(!first.contains('\\'));
}

#[test]
fn cdn_wrapper_is_unwrapped_to_the_source_basename() {
    let url = "https://substackcdn.com/image/fetch/w_720,c_limit,f_auto,q_auto:good,fl_progressive:steep/https%3A%2F%2Fsubstack-post-media.s3.amazonaws.com%2Fpublic%2Fimages%2Ftest1.jpg";
    let filename = sanitize_image_filename(url);

    assert!(filename.starts_with("test1--"));
    assert!(filename.ends_with(".jpg"));
}

#[test]
fn query_parameters_do_not_leak_into_the_name() {
    let filename = sanitize_image_filename("https://cdn.example.com/pic.png?width=100&dpr=2");
    assert!(filename.ends_with(".png"));
    assert!(!filename.contains('?'));
    assert!(!filename.contains('&'));
}

#[test]
fn missing_extension_falls_back_to_inert_one() {
    let filename = sanitize_image_filename("https://cdn.example.com/image");
    assert!(filename.ends_with(".bin"));
}

#[test]
fn same_basename_from_different_sources_does_not_collide() {
    let a = sanitize_image_filename("https://a.example.com/images/photo.jpg");
    let b = sanitize_image_filename("https://b.example.com/other/photo.jpg");
    assert_ne!(a, b);
}

#[test]
fn long_multibyte_stem_is_truncated_at_a_char_boundary() {
    // 27 three-byte chars: an 81-byte stem whose 80th byte is mid-character.
    let stem = "あ".repeat(27);

    // Relative reference, taken verbatim by the non-URL fallback.
    let filename = sanitize_image_filename(&format!("images/{stem}.jpg"));
    assert!(!filename.is_empty());
    assert!(!filename.contains('/'));
    assert!(!filename.contains('\\'));
    assert!(filename.ends_with(".jpg"));

    // Same stem percent-encoded inside an absolute URL.
    let encoded = format!("https://cdn.example.com/{}.jpg", "%E3%81%82".repeat(27));
    let filename = sanitize_image_filename(&encoded);
    assert!(!filename.is_empty());
    assert!(!filename.contains('/'));
    assert!(filename.ends_with(".jpg"));
}

#[test]
fn malformed_input_still_yields_a_usable_name() {
    for input in ["", "not a url at all", "%%%", "https://"] {
        let filename = sanitize_image_filename(input);
        assert!(!filename.is_empty(), "empty name for {input:?}");
        assert!(!filename.contains('/'), "slash in name for {input:?}");
        assert!(!filename.contains('\\'), "backslash in name for {input:?}");
    }
}
