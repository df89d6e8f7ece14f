/*!
 * Replacement-table schema handling.
 *
 * Two mutually exclusive table shapes are recognized by exact key set:
 * "kudasai" (the native format) and "fukuin" (legacy-compatible). Validation
 * is structural only. This module also resolves a caller-supplied table from
 * a parsed value, an inline JSON string, or a filesystem path, and detects
 * the canonical blank template that makes a run a no-op.
 */

use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;

use crate::errors::KairyouError;
use crate::name_variants::ReplacementScope;

/// A validated replacement table, category key to mapping
pub type RuleTable = Map<String, Value>;

/// The two supported replacement-table shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Kudasai,
    Fukuin,
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaKind::Kudasai => write!(f, "kudasai"),
            SchemaKind::Fukuin => write!(f, "fukuin"),
        }
    }
}

/// One replacement rule: a category of the table and how to process it.
///
/// Order matters only in that katakana entries are deferred to a second pass
/// regardless of table order.
#[derive(Debug, Clone, Copy)]
pub struct ReplacementRule {
    /// Human-readable category label
    pub label: &'static str,
    /// Key of the category in the table
    pub key: &'static str,
    /// Whether entries are names (expanded into variants) or literal words
    pub is_name: bool,
    /// Which sub-spans of a name are eligible for substitution
    pub scope: ReplacementScope,
    /// Which matched sub-spans also get honorific handling
    pub honorific: ReplacementScope,
}

const fn name_rule(
    label: &'static str,
    key: &'static str,
    scope: ReplacementScope,
    honorific: ReplacementScope,
) -> ReplacementRule {
    ReplacementRule {
        label,
        key,
        is_name: true,
        scope,
        honorific,
    }
}

const fn word_rule(label: &'static str, key: &'static str) -> ReplacementRule {
    ReplacementRule {
        label,
        key,
        is_name: false,
        scope: ReplacementScope::NONE,
        honorific: ReplacementScope::NONE,
    }
}

/// Required keys for a kudasai table
pub const KUDASAI_KEYS: [&str; 9] = [
    "kutouten",
    "unicode",
    "phrases",
    "single_words",
    "enhanced_check_whitelist",
    "full_names",
    "single_names",
    "name_like",
    "honorifics",
];

/// Required keys for a fukuin table
pub const FUKUIN_KEYS: [&str; 7] = [
    "specials",
    "basic",
    "names",
    "single-names",
    "full-names",
    "name-like",
    "honorifics",
];

pub static KUDASAI_RULES: [ReplacementRule; 8] = [
    word_rule("Punctuation", "kutouten"),
    word_rule("Unicode", "unicode"),
    name_rule(
        "Enhanced Check Whitelist",
        "enhanced_check_whitelist",
        ReplacementScope::ALL_NAMES,
        ReplacementScope::ALL_NAMES,
    ),
    name_rule(
        "Full Names",
        "full_names",
        ReplacementScope::ALL_NAMES,
        ReplacementScope::ALL_NAMES,
    ),
    name_rule(
        "Single Names",
        "single_names",
        ReplacementScope::ALL_NAMES,
        ReplacementScope::ALL_NAMES,
    ),
    name_rule(
        "Name Like",
        "name_like",
        ReplacementScope::ALL_NAMES,
        ReplacementScope::NONE,
    ),
    word_rule("Phrases", "phrases"),
    word_rule("Words", "single_words"),
];

pub static FUKUIN_RULES: [ReplacementRule; 6] = [
    word_rule("Special", "specials"),
    word_rule("Basic", "basic"),
    name_rule(
        "Names",
        "names",
        ReplacementScope::ALL_NAMES,
        ReplacementScope::ALL_NAMES,
    ),
    name_rule(
        "Full Names",
        "full-names",
        ReplacementScope::ALL_NAMES,
        ReplacementScope::ALL_NAMES,
    ),
    name_rule(
        "Single Names",
        "single-names",
        ReplacementScope::LAST_NAME,
        ReplacementScope::LAST_NAME,
    ),
    name_rule(
        "Name Like",
        "name-like",
        ReplacementScope::LAST_NAME,
        ReplacementScope::NONE,
    ),
];

static KUDASAI_BLANK: Lazy<Value> = Lazy::new(|| blank_from_keys(&KUDASAI_KEYS));
static FUKUIN_BLANK: Lazy<Value> = Lazy::new(|| blank_from_keys(&FUKUIN_KEYS));

fn blank_from_keys(keys: &[&str]) -> Value {
    let mut map = Map::new();
    for key in keys {
        map.insert((*key).to_string(), Value::Object(Map::new()));
    }
    Value::Object(map)
}

/// Checks the table's keys against the kudasai required key set first, then
/// the fukuin key set. Purely structural, no content typing.
pub fn validate(
    table: &RuleTable,
) -> Result<(SchemaKind, &'static [ReplacementRule]), KairyouError> {
    if KUDASAI_KEYS.iter().all(|key| table.contains_key(*key)) {
        Ok((SchemaKind::Kudasai, &KUDASAI_RULES))
    } else if FUKUIN_KEYS.iter().all(|key| table.contains_key(*key)) {
        Ok((SchemaKind::Fukuin, &FUKUIN_RULES))
    } else {
        Err(KairyouError::SchemaInvalid)
    }
}

/// True iff the table equals the canonical blank template of either schema
pub fn is_blank_template(table: &RuleTable) -> bool {
    let value = Value::Object(table.clone());
    value == *KUDASAI_BLANK || value == *FUKUIN_BLANK
}

/// A rule table supplied either as a parsed structure or as a string
/// (inline JSON or a filesystem path)
#[derive(Debug, Clone)]
pub enum TableInput {
    Parsed(Value),
    Text(String),
}

impl From<Value> for TableInput {
    fn from(value: Value) -> Self {
        TableInput::Parsed(value)
    }
}

impl From<&str> for TableInput {
    fn from(text: &str) -> Self {
        TableInput::Text(text.to_string())
    }
}

impl From<String> for TableInput {
    fn from(text: String) -> Self {
        TableInput::Text(text)
    }
}

/// Resolves a table input into the category map.
///
/// Strings are parsed as inline JSON first; on failure they are treated as a
/// path to a JSON file. A string that is neither is a
/// [`KairyouError::TablePath`].
pub fn resolve_table(input: TableInput) -> Result<RuleTable, KairyouError> {
    match input {
        TableInput::Parsed(Value::Object(map)) => Ok(map),
        TableInput::Parsed(_) => Err(KairyouError::SchemaInvalid),
        TableInput::Text(text) => {
            if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&text) {
                return Ok(map);
            }
            if Path::new(&text).is_file() {
                let content = std::fs::read_to_string(&text)
                    .map_err(|_| KairyouError::TablePath(text.clone()))?;
                match serde_json::from_str::<Value>(&content) {
                    Ok(Value::Object(map)) => Ok(map),
                    _ => Err(KairyouError::TablePath(text)),
                }
            } else {
                Err(KairyouError::TablePath(text))
            }
        }
    }
}
