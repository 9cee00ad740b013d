//! Fixtures shared by the unit tests of this crate.

use std::io::{Cursor, Write};

/// Build an in-memory ZIP archive from `(path, contents)` pairs
pub fn zip_bytes(files: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::FileOptions::default();

    for (path, contents) in files {
        zip.start_file(*path, options).expect("Failed to start file");
        zip.write_all(contents.as_bytes()).expect("Failed to write");
    }

    zip.finish().expect("Failed to finish ZIP").into_inner()
}

/// followers_1.json in the flat layout
pub fn followers_json(records: &[(&str, i64)]) -> String {
    let entries: Vec<String> = records
        .iter()
        .map(|(handle, ts)| {
            format!(
                r#"{{"title":"","media_list_data":[],"string_list_data":[{{"href":"https://www.instagram.com/{handle}","value":"{handle}","timestamp":{ts}}}]}}"#
            )
        })
        .collect();
    format!("[{}]", entries.join(","))
}

/// A keyed file where each item carries its own handle
pub fn keyed_json(key: &str, records: &[(&str, i64)]) -> String {
    let entries: Vec<String> = records
        .iter()
        .map(|(handle, ts)| {
            format!(
                r#"{{"title":"","media_list_data":[],"string_list_data":[{{"href":"https://www.instagram.com/{handle}","value":"{handle}","timestamp":{ts}}}]}}"#
            )
        })
        .collect();
    format!(r#"{{"{key}":[{}]}}"#, entries.join(","))
}

/// following.json in the newer layout, where the handle lives in `title`
pub fn following_json(records: &[(&str, i64)]) -> String {
    let entries: Vec<String> = records
        .iter()
        .map(|(handle, ts)| {
            format!(
                r#"{{"title":"{handle}","string_list_data":[{{"href":"https://www.instagram.com/_u/{handle}","timestamp":{ts}}}]}}"#
            )
        })
        .collect();
    format!(r#"{{"relationships_following":[{}]}}"#, entries.join(","))
}
