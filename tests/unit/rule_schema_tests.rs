/*!
 * Tests for replacement-table schema validation and resolution
 */

use anyhow::Result;
use serde_json::json;

use kairyou::errors::KairyouError;
use kairyou::rule_schema::{
    is_blank_template, resolve_table, validate, SchemaKind, TableInput,
};

use crate::common;

fn as_table(value: serde_json::Value) -> kairyou::rule_schema::RuleTable {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("expected an object"),
    }
}

#[test]
fn test_validate_withKudasaiKeys_shouldDetectKudasai() -> Result<()> {
    let table = as_table(common::blank_kudasai());
    let (kind, rules) = validate(&table)?;
    assert_eq!(kind, SchemaKind::Kudasai);
    assert_eq!(rules.len(), 8);
    assert_eq!(rules[0].key, "kutouten");
    Ok(())
}

#[test]
fn test_validate_withFukuinKeys_shouldDetectFukuin() -> Result<()> {
    let table = as_table(common::blank_fukuin());
    let (kind, rules) = validate(&table)?;
    assert_eq!(kind, SchemaKind::Fukuin);
    assert_eq!(rules.len(), 6);
    assert_eq!(rules[0].key, "specials");
    Ok(())
}

#[test]
fn test_validate_withMissingKeys_shouldFail() {
    let mut table = as_table(common::blank_kudasai());
    table.remove("honorifics");
    let result = validate(&table);
    assert!(matches!(result, Err(KairyouError::SchemaInvalid)));
}

#[test]
fn test_validate_withExtraKeys_shouldStillDetect() -> Result<()> {
    let mut table = as_table(common::blank_kudasai());
    table.insert("comment".to_string(), json!("extra"));
    let (kind, _) = validate(&table)?;
    assert_eq!(kind, SchemaKind::Kudasai);
    Ok(())
}

#[test]
fn test_is_blank_template_withBlankTables_shouldReturnTrue() {
    assert!(is_blank_template(&as_table(common::blank_kudasai())));
    assert!(is_blank_template(&as_table(common::blank_fukuin())));
}

#[test]
fn test_is_blank_template_withPopulatedTable_shouldReturnFalse() {
    let table = common::kudasai_table(&[("single_words", json!({"世界": "world"}))]);
    assert!(!is_blank_template(&as_table(table)));
}

#[test]
fn test_resolve_table_withParsedValue_shouldReturnMap() -> Result<()> {
    let table = resolve_table(TableInput::from(common::blank_kudasai()))?;
    assert!(table.contains_key("kutouten"));
    Ok(())
}

#[test]
fn test_resolve_table_withInlineJson_shouldParse() -> Result<()> {
    let inline = common::blank_fukuin().to_string();
    let table = resolve_table(TableInput::from(inline))?;
    assert!(table.contains_key("specials"));
    Ok(())
}

#[test]
fn test_resolve_table_withJsonFile_shouldLoad() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "rules.json",
        &common::blank_kudasai().to_string(),
    )?;

    let table = resolve_table(TableInput::from(path.to_string_lossy().as_ref()))?;
    assert!(table.contains_key("full_names"));
    Ok(())
}

#[test]
fn test_resolve_table_withBadPath_shouldFailWithTablePathError() {
    let result = resolve_table(TableInput::from("/nonexistent/rules.json"));
    assert!(matches!(result, Err(KairyouError::TablePath(_))));
}

#[test]
fn test_resolve_table_withNonObjectJson_shouldFail() {
    let result = resolve_table(TableInput::from(json!(["not", "a", "table"])));
    assert!(matches!(result, Err(KairyouError::SchemaInvalid)));
}
