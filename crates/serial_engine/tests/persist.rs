use std::fs;
use std::io::Write;

use serial_engine::{ensure_output_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out").join("books");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path());

    let first = writer.write_bytes("book.epub", b"hello").unwrap();
    assert_eq!(first.file_name().unwrap(), "book.epub");
    assert_eq!(fs::read(&first).unwrap(), b"hello");

    let second = writer.write_bytes("book.epub", b"world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"world");
}

#[test]
fn failed_fill_leaves_no_file_behind() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path());

    let result = writer.write_with("book.epub", |file| {
        file.write_all(b"partial")?;
        Err(std::io::Error::other("interrupted"))
    });
    assert!(result.is_err());
    assert!(!temp.path().join("book.epub").exists());
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn output_dir_that_is_a_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write_bytes("book.epub", b"data");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("book.epub").exists());
}
