/*!
 * Gazetteer-based person recognizer.
 *
 * A deterministic, dependency-free backend: it labels a span PERSON iff the
 * span exactly matches one of the configured names. Longer names claim their
 * characters first, so a short name embedded in a longer one is not reported
 * separately. The CLI seeds it from the replacement table's own name
 * categories; library users wanting statistical recognition inject their own
 * backend instead.
 */

use serde_json::Value;

use crate::errors::NerError;
use crate::ner::{find_char_occurrences, Entity, NerBackend};
use crate::rule_schema::RuleTable;

/// Name-category keys across both schemas; only those present are read
const NAME_KEYS: [&str; 8] = [
    "single_names",
    "full_names",
    "enhanced_check_whitelist",
    "name_like",
    "names",
    "single-names",
    "full-names",
    "name-like",
];

#[derive(Debug, Clone, Default)]
pub struct GazetteerNer {
    /// Known person names, longest first
    names: Vec<String>,
}

impl GazetteerNer {
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        let mut gazetteer = GazetteerNer { names: Vec::new() };
        gazetteer.extend(names);
        gazetteer
    }

    /// Seeds the gazetteer from the native name entries of a replacement
    /// table: every token of every name category, plus the joined forms of
    /// multi-token names with and without the interpunct separator.
    pub fn from_rule_table(table: &RuleTable) -> Self {
        let mut names = Vec::new();
        for key in NAME_KEYS {
            let Some(Value::Object(category)) = table.get(key) else {
                continue;
            };
            for value in category.values() {
                match value {
                    Value::String(token) => names.push(token.clone()),
                    Value::Array(tokens) => {
                        let tokens: Vec<&str> =
                            tokens.iter().filter_map(|t| t.as_str()).collect();
                        names.extend(tokens.iter().map(|t| t.to_string()));
                        if tokens.len() > 1 {
                            names.push(tokens.concat());
                            names.push(tokens.join("・"));
                        }
                    }
                    _ => {}
                }
            }
        }
        GazetteerNer::new(names)
    }

    /// Adds more names, keeping the longest-first ordering
    pub fn extend(&mut self, names: impl IntoIterator<Item = String>) {
        for name in names {
            let name = name.trim().to_string();
            if !name.is_empty() && !self.names.contains(&name) {
                self.names.push(name);
            }
        }
        self.names
            .sort_by_key(|name| std::cmp::Reverse(name.chars().count()));
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl NerBackend for GazetteerNer {
    fn recognize(&self, line: &str) -> Result<Vec<Entity>, NerError> {
        let chars: Vec<char> = line.chars().collect();
        let mut claimed = vec![false; chars.len()];
        let mut entities = Vec::new();

        for name in &self.names {
            for (start, end) in find_char_occurrences(&chars, name) {
                if claimed[start..end].iter().any(|&taken| taken) {
                    continue;
                }
                claimed[start..end].fill(true);
                entities.push(Entity {
                    label: "PERSON".to_string(),
                    text: name.clone(),
                    start,
                    end,
                });
            }
        }

        entities.sort_by_key(|entity| entity.start);
        Ok(entities)
    }
}
