use std::fs;

use archive_engine::{ensure_output_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("substack_images").join("testauthor");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());

    // Idempotent on the second call.
    ensure_output_dir(&new_dir).unwrap();
}

#[test]
fn atomic_write_replaces_existing_and_is_atomic() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("post.md", "hello").unwrap();
    assert_eq!(first.file_name().unwrap(), "post.md");
    assert_eq!(fs::read_to_string(&first).unwrap(), "hello");

    // Replace existing
    let second = writer.write("post.md", "world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "world");
}

#[test]
fn writes_raw_bytes_for_image_payloads() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let path = writer
        .write_bytes("pic--0a1b2c3d.jpg", b"fake-image-data")
        .unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"fake-image-data");
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("post.md", "data");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("post.md").exists());
}
