/*!
 * Name indexing.
 *
 * Runs the NER backend over a target text and a knowledge-base corpus,
 * eliminates false positives with the katakana heuristics, strips
 * honorifics, and reports PERSON strings from the target that are not
 * substrings of anything already known (knowledge base or replacement
 * table), so a translator can catalogue them.
 */

use log::debug;
use serde::Serialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::time::Instant;

use crate::errors::KairyouError;
use crate::file_utils::{format_elapsed, load_knowledge_base, load_text_source};
use crate::katakana::KatakanaUtil;
use crate::ner::NerSource;
use crate::rule_schema::{self, resolve_table, RuleTable, SchemaKind, TableInput};

/// A name string and the 1-based running count of this exact string's
/// occurrence within the scan it came from. Lets a human triage the most
/// frequent unknown names first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameAndOccurrence {
    pub name: String,
    pub occurrence: u64,
}

/// Options for one indexing run
#[derive(Debug, Clone)]
pub struct IndexOptions {
    /// Entity strings to ignore entirely
    pub blacklist: Vec<String>,
    /// Drop the NER backend after the run
    pub discard_ner: bool,
}

impl Default for IndexOptions {
    fn default() -> Self {
        IndexOptions {
            blacklist: Vec::new(),
            discard_ner: true,
        }
    }
}

/// The indexing engine. One value owns one run context.
pub struct Indexer {
    ner: NerSource,
    /// Log of flagged names and run summary
    pub indexing_log: String,
    /// Entity-label frequencies across all scans, kept for diagnostics
    entity_occurrences: HashMap<String, u64>,
}

impl Indexer {
    pub fn new(ner: NerSource) -> Self {
        Indexer {
            ner,
            indexing_log: String::new(),
            entity_occurrences: HashMap::new(),
        }
    }

    /// Determines which PERSON strings in the target text are not already
    /// known from the knowledge base or the replacement table.
    ///
    /// `text_to_index` may be a path to a text file or the text itself;
    /// `knowledge_base` may be a directory of `.txt` files, a text file, or
    /// the text itself. An empty target simply finds nothing.
    pub fn index(
        &mut self,
        text_to_index: &str,
        knowledge_base: &str,
        table: impl Into<TableInput>,
        options: &IndexOptions,
    ) -> Result<(Vec<NameAndOccurrence>, String), KairyouError> {
        let start = Instant::now();

        self.ner.acquire()?;

        let target_text = load_text_source(text_to_index)?;
        let knowledge_blocks = load_knowledge_base(knowledge_base)?;
        let table = resolve_table(table.into())?;
        let (kind, _) = rule_schema::validate(&table)?;

        let knowledge_names = self.scan_blocks(&knowledge_blocks, &options.blacklist)?;
        let target_names = self.scan_blocks(
            std::slice::from_ref(&target_text),
            &options.blacklist,
        )?;
        let table_names: Vec<NameAndOccurrence> = names_from_table(&table, kind)
            .into_iter()
            .map(|name| NameAndOccurrence {
                name,
                occurrence: 1,
            })
            .collect();

        for (label, count) in &self.entity_occurrences {
            debug!("entity label {label} seen {count} times");
        }

        let knowledge_names = eliminate_false_positives(knowledge_names);
        let target_names = eliminate_false_positives(target_names);
        let table_names = eliminate_false_positives(table_names);

        let honorifics = honorific_markers(&table);
        let knowledge_names = trim_honorifics(knowledge_names, &honorifics);
        let target_names = trim_honorifics(target_names, &honorifics);
        let table_names = trim_honorifics(table_names, &honorifics);

        let mut known: HashSet<String> = knowledge_names
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        known.extend(table_names.into_iter().map(|entry| entry.name));

        let mut new_names = Vec::new();
        for entry in target_names {
            if !is_name_in_other_sources(&entry.name, &known) {
                self.indexing_log.push_str(&format!(
                    "Name: {} Occurrence: {} was flagged as a unique 'name'\n",
                    entry.name, entry.occurrence
                ));
                new_names.push(entry);
            }
        }

        if options.discard_ner {
            self.ner.discard();
        }

        self.indexing_log
            .push_str(&format!("\nIgnored Strings: {:?}", options.blacklist));
        self.indexing_log
            .push_str(&format!("\nTotal Unique 'Names'  : {}", new_names.len()));
        self.indexing_log
            .push_str(&format!("\nTime Elapsed : {}", format_elapsed(start.elapsed())));

        Ok((new_names, self.indexing_log.clone()))
    }

    /// Runs the recognizer line-by-line over a sequence of text blocks.
    /// The occurrence counter is scoped to the whole sequence, so each call
    /// numbers one source independently.
    fn scan_blocks(
        &mut self,
        blocks: &[String],
        blacklist: &[String],
    ) -> Result<Vec<NameAndOccurrence>, KairyouError> {
        let mut occurrences: HashMap<String, u64> = HashMap::new();
        let mut found = Vec::new();

        for block in blocks {
            for line in block.split('\n') {
                let entities = self.ner.acquire()?.recognize(line)?;
                for entity in entities {
                    if blacklist.iter().any(|ignored| ignored == &entity.text) {
                        continue;
                    }

                    *self
                        .entity_occurrences
                        .entry(entity.label.clone())
                        .or_insert(0) += 1;

                    if entity.label == "PERSON" {
                        let count = occurrences.entry(entity.text.clone()).or_insert(0);
                        *count += 1;
                        found.push(NameAndOccurrence {
                            name: entity.text,
                            occurrence: *count,
                        });
                    }
                }
            }
        }

        Ok(found)
    }
}

/// Flattens all native names out of the table's name categories,
/// deduplicated, whatever shape the values take (scalar, list, or
/// dict-of-list)
fn names_from_table(table: &RuleTable, kind: SchemaKind) -> Vec<String> {
    let keys: &[&str] = match kind {
        SchemaKind::Kudasai => &["single_names", "full_names"],
        SchemaKind::Fukuin => &["names", "single-names", "full-names"],
    };

    let mut seen = HashSet::new();
    let mut names = Vec::new();
    let mut push = |name: String, seen: &mut HashSet<String>, names: &mut Vec<String>| {
        if seen.insert(name.clone()) {
            names.push(name);
        }
    };

    for key in keys {
        match table.get(*key) {
            Some(Value::Object(category)) => {
                for value in category.values() {
                    match value {
                        Value::Array(items) => {
                            for item in items {
                                if let Some(token) = item.as_str() {
                                    push(token.to_string(), &mut seen, &mut names);
                                }
                            }
                        }
                        Value::String(token) => push(token.clone(), &mut seen, &mut names),
                        _ => {}
                    }
                }
            }
            Some(Value::Array(items)) => {
                for item in items {
                    if let Some(token) = item.as_str() {
                        push(token.to_string(), &mut seen, &mut names);
                    }
                }
            }
            Some(Value::String(token)) => push(token.clone(), &mut seen, &mut names),
            _ => {}
        }
    }

    names
}

/// Drops strings that are mostly punctuation, known loanwords, partially
/// English, or onomatopoeia-like repeating sequences
fn eliminate_false_positives(names: Vec<NameAndOccurrence>) -> Vec<NameAndOccurrence> {
    names
        .into_iter()
        .filter(|entry| {
            !(KatakanaUtil::is_more_punctuation_than_japanese(&entry.name)
                || KatakanaUtil::is_actual_word(&entry.name)
                || KatakanaUtil::is_partially_english(&entry.name)
                || KatakanaUtil::is_repeating_sequence(&entry.name))
        })
        .collect()
}

/// Honorific markers in table iteration order
fn honorific_markers(table: &RuleTable) -> Vec<String> {
    table
        .get("honorifics")
        .and_then(Value::as_object)
        .map(|honorifics| honorifics.keys().cloned().collect())
        .unwrap_or_default()
}

/// Strips every configured honorific marker from each name
fn trim_honorifics(
    names: Vec<NameAndOccurrence>,
    honorifics: &[String],
) -> Vec<NameAndOccurrence> {
    names
        .into_iter()
        .map(|entry| {
            let mut name = entry.name;
            for honorific in honorifics {
                name = name.replace(honorific.as_str(), "");
            }
            NameAndOccurrence {
                name,
                occurrence: entry.occurrence,
            }
        })
        .collect()
}

/// A target name is already known iff any reference string is a substring
/// of it; containment rather than equality catches a known short name
/// embedded in a slightly different target string
fn is_name_in_other_sources(name: &str, all_names: &HashSet<String>) -> bool {
    all_names.iter().any(|other| name.contains(other.as_str()))
}
