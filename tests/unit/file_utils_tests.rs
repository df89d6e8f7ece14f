/*!
 * Tests for file and text-source loading
 */

use anyhow::Result;
use std::time::Duration;

use kairyou::file_utils::{
    format_elapsed, load_knowledge_base, load_text_source, FileManager,
};

use crate::common;

#[test]
fn test_load_text_source_withLiteralText_shouldReturnItUnchanged() -> Result<()> {
    let text = load_text_source("山田太郎が来た。")?;
    assert_eq!(text, "山田太郎が来た。");
    Ok(())
}

#[test]
fn test_load_text_source_withFilePath_shouldReadTheFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "chapter.txt",
        "第一章。",
    )?;

    let text = load_text_source(&path.to_string_lossy())?;
    assert_eq!(text, "第一章。");
    Ok(())
}

#[test]
fn test_find_text_files_withMixedDirectory_shouldReturnSortedTxtFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_file(&dir, "b.txt", "b")?;
    common::create_test_file(&dir, "a.TXT", "a")?;
    common::create_test_file(&dir, "notes.md", "skip")?;

    let files = FileManager::find_text_files(&dir)?;

    assert_eq!(files.len(), 2);
    assert!(files[0].to_string_lossy().ends_with("a.TXT"));
    assert!(files[1].to_string_lossy().ends_with("b.txt"));
    Ok(())
}

#[test]
fn test_load_knowledge_base_withDirectory_shouldReturnOneBlockPerFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_file(&dir, "vol1.txt", "一巻")?;
    common::create_test_file(&dir, "vol2.txt", "二巻")?;

    let blocks = load_knowledge_base(&dir.to_string_lossy())?;

    assert_eq!(blocks, vec!["一巻".to_string(), "二巻".to_string()]);
    Ok(())
}

#[test]
fn test_load_knowledge_base_withLiteralText_shouldReturnSingleBlock() -> Result<()> {
    let blocks = load_knowledge_base("既知の名前")?;
    assert_eq!(blocks, vec!["既知の名前".to_string()]);
    Ok(())
}

#[test]
fn test_format_elapsed_withVariousDurations_shouldPickTheUnit() {
    assert_eq!(format_elapsed(Duration::from_millis(1500)), "1.50 seconds");
    assert_eq!(format_elapsed(Duration::from_secs(90)), "1.50 minutes");
    assert_eq!(format_elapsed(Duration::from_secs(7200)), "2.00 hours");
}
