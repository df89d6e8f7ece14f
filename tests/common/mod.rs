/*!
 * Common test utilities for the kairyou test suite
 */

use anyhow::Result;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use kairyou::ner::mock::MockNer;
use kairyou::ner::NerSource;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// The canonical blank kudasai table
pub fn blank_kudasai() -> Value {
    json!({
        "kutouten": {},
        "unicode": {},
        "phrases": {},
        "single_words": {},
        "enhanced_check_whitelist": {},
        "full_names": {},
        "single_names": {},
        "name_like": {},
        "honorifics": {}
    })
}

/// The canonical blank fukuin table
pub fn blank_fukuin() -> Value {
    json!({
        "specials": {},
        "basic": {},
        "names": {},
        "single-names": {},
        "full-names": {},
        "name-like": {},
        "honorifics": {}
    })
}

/// A blank kudasai table with the given categories overridden
pub fn kudasai_table(overrides: &[(&str, Value)]) -> Value {
    let mut table = blank_kudasai();
    for (key, value) in overrides {
        table[*key] = value.clone();
    }
    table
}

/// A blank fukuin table with the given categories overridden
pub fn fukuin_table(overrides: &[(&str, Value)]) -> Value {
    let mut table = blank_fukuin();
    for (key, value) in overrides {
        table[*key] = value.clone();
    }
    table
}

/// A NER source backed by a mock that labels every occurrence of the given
/// strings as PERSON
pub fn working_ner<I, S>(persons: I) -> NerSource
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    NerSource::from_backend(Box::new(MockNer::working(persons)))
}

/// A NER source whose backend recognizes nothing
pub fn empty_ner() -> NerSource {
    working_ner(Vec::<String>::new())
}
