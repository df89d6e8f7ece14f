/*!
 * End-to-end preprocessing from files on disk
 */

use anyhow::Result;
use serde_json::json;

use kairyou::engine::{Kairyou, PreprocessOptions};
use kairyou::file_utils::load_text_source;
use kairyou::indexer::{IndexOptions, Indexer};

use crate::common;

#[test]
fn test_preprocess_withTableFileOnDisk_shouldReplaceFromIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    let table = common::kudasai_table(&[
        ("full_names", json!({"Taro Yamada": ["山田", "太郎"]})),
        ("honorifics", json!({"さん": "san"})),
    ]);
    let table_path =
        common::create_test_file(&dir, "replacements.json", &table.to_string())?;
    let text_path =
        common::create_test_file(&dir, "chapter.txt", "山田太郎さんが来た。\n「行こう」")?;

    let text = load_text_source(&text_path.to_string_lossy())?;
    let options = PreprocessOptions {
        add_closing_period: true,
        ..PreprocessOptions::default()
    };
    let mut engine = Kairyou::new(common::empty_ner());

    let outcome = engine.preprocess(
        &text,
        table_path.to_string_lossy().as_ref(),
        &options,
    )?;

    assert_eq!(outcome.text, "Taro Yamada-sanが来た。\n「行こう。」");
    assert!(outcome.preprocessing_log.contains("Taro Yamada : 1 (san-1)"));
    assert!(outcome.error_log.is_empty());
    Ok(())
}

#[test]
fn test_index_withKnowledgeBaseDirectory_shouldOnlyFlagUnknownNames() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    let kb_dir = dir.join("lore");
    std::fs::create_dir(&kb_dir)?;
    common::create_test_file(&kb_dir, "vol1.txt", "田中はここで育った。")?;

    let target_path =
        common::create_test_file(&dir, "chapter.txt", "田中と佐藤が話す。")?;

    let mut indexer = Indexer::new(common::working_ner(["田中", "佐藤"]));

    let (new_names, log) = indexer.index(
        &target_path.to_string_lossy(),
        &kb_dir.to_string_lossy(),
        common::blank_kudasai(),
        &IndexOptions::default(),
    )?;

    assert_eq!(new_names.len(), 1);
    assert_eq!(new_names[0].name, "佐藤");
    assert!(log.contains("Name: 佐藤 Occurrence: 1 was flagged as a unique 'name'"));
    Ok(())
}
