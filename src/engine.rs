/*!
 * The substitution engine.
 *
 * One preprocessing pass over one text with one validated replacement table:
 * a non-katakana pass in table category order, then a katakana pass sorted
 * longest native string first, then postprocessing. Ambiguous tokens (single
 * kanji, whitelist entries, katakana names) are only replaced where the NER
 * backend confirms a PERSON span.
 *
 * All run state lives on the [`Kairyou`] value; each run resets it unless
 * the caller asks for persistence, in which case logs and counters carry
 * forward but the working text never does.
 */

use anyhow::anyhow;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Instant;

use crate::errors::KairyouError;
use crate::file_utils::format_elapsed;
use crate::katakana::KatakanaUtil;
use crate::name_variants::{name_variants, Name, NameVariant};
use crate::ner::NerSource;
use crate::rule_schema::{
    self, is_blank_template, resolve_table, ReplacementRule, RuleTable, SchemaKind, TableInput,
    KUDASAI_RULES,
};

/// Closing bracket preceded by something that is not terminal punctuation
static MISSING_PERIOD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^。！？.!?])」").unwrap());

/// Runs of Latin letters left in the text after replacement
static LATIN_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{Latin}+").unwrap());

/// Options for one preprocessing run
#[derive(Debug, Clone)]
pub struct PreprocessOptions {
    /// Carry logs and the replacement counter forward from the previous run
    pub persist: bool,
    /// Drop the NER backend after the run to bound memory; it is re-acquired
    /// lazily on next use
    pub discard_ner: bool,
    /// Insert `。` before `」` wherever no terminal punctuation precedes it,
    /// before any other substitution
    pub add_closing_period: bool,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        PreprocessOptions {
            persist: false,
            discard_ner: true,
            add_closing_period: false,
        }
    }
}

/// Result of one preprocessing run
#[derive(Debug, Clone)]
pub struct PreprocessOutcome {
    /// The processed text
    pub text: String,
    /// Human-readable changelog of every replacement made
    pub preprocessing_log: String,
    /// Per-category failures; non-empty does not mean the text is unusable
    pub error_log: String,
}

/// An entry deferred to the katakana pass
enum KatakanaEntry {
    Name(Name, &'static ReplacementRule),
    Word(String, String),
}

impl KatakanaEntry {
    fn native_len(&self) -> usize {
        match self {
            KatakanaEntry::Name(name, _) => name.jap.chars().count(),
            KatakanaEntry::Word(jap, _) => jap.chars().count(),
        }
    }
}

/// The preprocessing engine. One value owns one run context; create an
/// independent instance per concurrent run.
pub struct Kairyou {
    ner: NerSource,
    text: String,
    table: RuleTable,
    kind: SchemaKind,
    rules: &'static [ReplacementRule],
    /// Changelog of replacements, accumulated across runs when persisting
    pub preprocessing_log: String,
    /// Per-category failures, accumulated across runs when persisting
    pub error_log: String,
    total_replacements: u64,
}

impl Kairyou {
    pub fn new(ner: NerSource) -> Self {
        Kairyou {
            ner,
            text: String::new(),
            table: RuleTable::new(),
            kind: SchemaKind::Kudasai,
            rules: &KUDASAI_RULES,
            preprocessing_log: String::new(),
            error_log: String::new(),
            total_replacements: 0,
        }
    }

    /// Preprocesses `text` using the replacement table.
    ///
    /// Skips entirely (changelog `"Skipped"`) when the table is the canonical
    /// blank template for its schema. Category-level failures are recovered
    /// locally and reported through the error log; the primary result is
    /// still returned.
    pub fn preprocess(
        &mut self,
        text: &str,
        table: impl Into<TableInput>,
        options: &PreprocessOptions,
    ) -> Result<PreprocessOutcome, KairyouError> {
        if text.is_empty() {
            return Err(KairyouError::EmptyText);
        }

        let table = resolve_table(table.into())?;

        if is_blank_template(&table) {
            return Ok(PreprocessOutcome {
                text: text.to_string(),
                preprocessing_log: "Skipped".to_string(),
                error_log: String::new(),
            });
        }

        // Surface an unavailable recognizer before mutating anything
        self.ner.acquire()?;

        if !options.persist {
            self.reset_run();
        }

        let (kind, rules) = rule_schema::validate(&table)?;
        self.kind = kind;
        self.rules = rules;
        self.table = table;

        // Inserted periods must be part of the text the rules see
        self.text = if options.add_closing_period {
            add_missing_periods(text)
        } else {
            text.to_string()
        };

        let start = Instant::now();
        let mut replaced_names: HashMap<String, u64> = HashMap::new();

        self.replace_non_katakana(&mut replaced_names);
        self.replace_katakana(&mut replaced_names);
        self.perform_postprocessing();

        if options.discard_ner {
            self.ner.discard();
        }

        self.preprocessing_log
            .push_str(&format!("\nTotal Replacements  : {}", self.total_replacements));
        self.preprocessing_log
            .push_str(&format!("\nTime Elapsed : {}", format_elapsed(start.elapsed())));

        Ok(PreprocessOutcome {
            text: self.text.clone(),
            preprocessing_log: self.preprocessing_log.clone(),
            error_log: self.error_log.clone(),
        })
    }

    fn reset_run(&mut self) {
        self.text.clear();
        self.preprocessing_log.clear();
        self.error_log.clear();
        self.total_replacements = 0;
        self.kind = SchemaKind::Kudasai;
        self.rules = &KUDASAI_RULES;
    }

    /// First pass: everything except katakana-only entries, in table
    /// category order
    fn replace_non_katakana(&mut self, replaced_names: &mut HashMap<String, u64>) {
        let rules = self.rules;
        for rule in rules {
            let outcome = if rule.is_name {
                self.process_name_category(rule, replaced_names)
            } else {
                self.process_word_category(rule)
            };
            if let Err(err) = outcome {
                self.log_category_error(rule.key, &err);
            }
        }
    }

    /// Second pass: katakana-only entries from all categories, longest
    /// native string first so a long name is never mangled by a shorter one
    /// embedded in it
    fn replace_katakana(&mut self, replaced_names: &mut HashMap<String, u64>) {
        let rules = self.rules;
        let mut entries: Vec<KatakanaEntry> = Vec::new();

        for rule in rules {
            if let Err(err) = self.collect_katakana_entries(rule, &mut entries) {
                self.log_category_error(rule.key, &err);
            }
        }

        entries.sort_by_key(|entry| std::cmp::Reverse(entry.native_len()));

        for entry in entries {
            match entry {
                KatakanaEntry::Name(name, rule) => {
                    if let Err(err) = self.replace_name(&name, rule, replaced_names, true) {
                        self.log_category_error(rule.key, &err);
                    }
                }
                KatakanaEntry::Word(jap, eng) => {
                    let count = self.replace_single_word(&jap, &eng, true);
                    if count > 0 {
                        self.preprocessing_log
                            .push_str(&format!("{jap} → {eng} : {count}\n"));
                    }
                }
            }
        }
    }

    fn collect_katakana_entries(
        &self,
        rule: &'static ReplacementRule,
        entries: &mut Vec<KatakanaEntry>,
    ) -> anyhow::Result<()> {
        if rule.is_name {
            for name in self.name_entries(rule.key)? {
                if KatakanaUtil::is_katakana_only(&name.jap)
                    && !KatakanaUtil::is_actual_word(&name.jap)
                {
                    entries.push(KatakanaEntry::Name(name, rule));
                }
            }
        } else {
            for (jap, eng) in self.word_entries(rule.key)? {
                if KatakanaUtil::is_katakana_only(&jap) && !KatakanaUtil::is_actual_word(&jap) {
                    entries.push(KatakanaEntry::Word(jap, eng));
                }
            }
        }
        Ok(())
    }

    fn process_word_category(&mut self, rule: &ReplacementRule) -> anyhow::Result<()> {
        for (jap, eng) in self.word_entries(rule.key)? {
            // katakana-only entries wait for the second pass
            if KatakanaUtil::is_katakana_only(&jap) && !KatakanaUtil::is_actual_word(&jap) {
                continue;
            }
            let count = self.replace_single_word(&jap, &eng, false);
            if count > 0 {
                self.preprocessing_log
                    .push_str(&format!("{jap} → {eng} : {count}\n"));
            }
        }
        Ok(())
    }

    fn process_name_category(
        &mut self,
        rule: &'static ReplacementRule,
        replaced_names: &mut HashMap<String, u64>,
    ) -> anyhow::Result<()> {
        for name in self.name_entries(rule.key)? {
            // katakana names are replaced at the end
            if KatakanaUtil::is_katakana_only(&name.jap) {
                continue;
            }
            self.replace_name(&name, rule, replaced_names, false)?;
        }
        Ok(())
    }

    /// Replaces one name's variants, handling honorific-suffixed forms and
    /// routing ambiguous variants through the NER gate
    fn replace_name(
        &mut self,
        name: &Name,
        rule: &ReplacementRule,
        replaced_names: &mut HashMap<String, u64>,
        is_katakana: bool,
    ) -> anyhow::Result<()> {
        let honorifics = self.honorific_entries()?;
        let variants = name_variants(name, rule.scope, rule.honorific)?;

        for variant in variants {
            // Idempotence guard against reprocessing overlapping variants
            if replaced_names.contains_key(&variant.jap) {
                continue;
            }

            let mut replacement_data: Vec<(String, u64)> = Vec::new();

            // Honorific-suffixed forms are unambiguous, always literal
            for (honorific, honorific_eng) in &honorifics {
                let count = self.replace_single_word(
                    &format!("{}{}", variant.jap, honorific),
                    &format!("{}-{}", variant.eng, honorific_eng),
                    false,
                );
                replacement_data.push((honorific_eng.clone(), count));
            }

            if is_katakana {
                if KatakanaUtil::is_actual_word(&variant.jap) {
                    continue;
                }
                let count = self.perform_enhanced_replace(&variant.jap, &variant.eng)?;
                replacement_data.push(("NA".to_string(), count));
            } else if variant.no_honor {
                let count = if self.requires_enhanced_check(rule, &variant) {
                    self.perform_enhanced_replace(&variant.jap, &variant.eng)?
                } else {
                    self.replace_single_word(&variant.jap, &variant.eng, false)
                };
                replacement_data.push(("NA".to_string(), count));
            }

            let total: u64 = replacement_data.iter().map(|(_, count)| count).sum();
            replaced_names.insert(variant.jap.clone(), total);

            // Zero-replacement variants stay out of the changelog
            if total == 0 {
                continue;
            }

            let breakdown = replacement_data
                .iter()
                .filter(|(_, count)| *count > 0)
                .map(|(key, count)| format!("{key}-{count}"))
                .collect::<Vec<_>>()
                .join(", ");
            self.preprocessing_log
                .push_str(&format!("{} : {} ({})\n", variant.eng, total, breakdown));
        }

        Ok(())
    }

    /// Whitelisted entries and single-character native strings are too
    /// ambiguous for a blind substring replacement
    fn requires_enhanced_check(&self, rule: &ReplacementRule, variant: &NameVariant) -> bool {
        (self.kind == SchemaKind::Kudasai && rule.key == "enhanced_check_whitelist")
            || variant.jap.chars().count() == 1
    }

    /// Literal substring replacement, counting occurrences
    fn replace_single_word(&mut self, word: &str, replacement: &str, is_katakana: bool) -> u64 {
        if word.is_empty() {
            return 0;
        }
        if is_katakana && KatakanaUtil::is_actual_word(word) {
            return 0;
        }

        let occurrences = self.text.matches(word).count() as u64;
        if occurrences > 0 {
            self.text = self.text.replace(word, replacement);
        }

        self.total_replacements += occurrences;
        occurrences
    }

    /// NER-gated replacement: only spans the recognizer labels PERSON with
    /// exactly the native text are replaced, by span rather than by blind
    /// substring. May miss true positives but does not add false positives.
    fn perform_enhanced_replace(&mut self, jap: &str, replacement: &str) -> anyhow::Result<u64> {
        let mut lines: Vec<String> = self.text.split('\n').map(str::to_string).collect();
        let mut replace_count = 0u64;

        for line in lines.iter_mut() {
            if !line.contains(jap) {
                continue;
            }

            let entities = self.ner.acquire()?.recognize(line)?;
            let mut person_spans: Vec<(usize, usize)> = entities
                .iter()
                .filter(|entity| entity.label == "PERSON" && entity.text == jap)
                .map(|entity| (entity.start, entity.end))
                .collect();
            // rightmost first so earlier offsets stay valid
            person_spans.sort_by(|a, b| b.0.cmp(&a.0));

            for (start, end) in person_spans {
                let chars: Vec<char> = line.chars().collect();
                if start > end || end > chars.len() {
                    debug!("discarding out-of-range entity span {start}..{end} for {jap}");
                    continue;
                }
                let mut rebuilt: String = chars[..start].iter().collect();
                rebuilt.push_str(replacement);
                rebuilt.extend(&chars[end..]);
                *line = rebuilt;
                replace_count += 1;
            }
        }

        self.text = lines.join("\n");
        self.total_replacements += replace_count;
        Ok(replace_count)
    }

    fn perform_postprocessing(&mut self) {
        self.perform_missing_space_correction();
    }

    /// Two individual names may be replaced separately rather than as a
    /// single name, leaving their translations fused without a space. Only
    /// applies to kudasai tables, which carry two-token full-name keys.
    fn perform_missing_space_correction(&mut self) {
        if self.kind != SchemaKind::Kudasai {
            return;
        }

        let full_names: Vec<String> = self
            .table
            .get("full_names")
            .and_then(Value::as_object)
            .map(|names| names.keys().cloned().collect())
            .unwrap_or_default();

        let latin_starts: Vec<usize> = LATIN_RUN_REGEX
            .find_iter(&self.text)
            .map(|run| run.start())
            .collect();

        for start in latin_starts {
            for full_name in &full_names {
                let mut parts = full_name.split(' ');
                let (Some(first), Some(last), None) = (parts.next(), parts.next(), parts.next())
                else {
                    continue;
                };

                // earlier corrections may have shifted byte offsets
                let Some(tail) = self.text.get(start..) else {
                    continue;
                };
                if tail.contains(first) && tail.contains(last) {
                    let fused = format!("{first}{last}");
                    let spaced = format!("{first} {last}");
                    self.text = self.text.replace(&fused, &spaced);
                }
            }
        }
    }

    fn word_entries(&self, key: &str) -> anyhow::Result<Vec<(String, String)>> {
        let category = self
            .table
            .get(key)
            .and_then(Value::as_object)
            .ok_or_else(|| anyhow!("category '{key}' is missing or not an object"))?;

        let mut entries = Vec::with_capacity(category.len());
        for (jap, eng) in category {
            let eng = eng
                .as_str()
                .ok_or_else(|| anyhow!("entry '{jap}' in '{key}' is not a string"))?;
            entries.push((jap.clone(), eng.to_string()));
        }
        Ok(entries)
    }

    fn name_entries(&self, key: &str) -> anyhow::Result<Vec<Name>> {
        let category = self
            .table
            .get(key)
            .and_then(Value::as_object)
            .ok_or_else(|| anyhow!("category '{key}' is missing or not an object"))?;

        let mut names = Vec::with_capacity(category.len());
        for (eng, value) in category {
            let tokens: Vec<String> = match value {
                Value::String(token) => vec![token.clone()],
                Value::Array(items) => items
                    .iter()
                    .map(|item| {
                        item.as_str().map(str::to_string).ok_or_else(|| {
                            anyhow!("entry '{eng}' in '{key}' has a non-string token")
                        })
                    })
                    .collect::<anyhow::Result<_>>()?,
                _ => return Err(anyhow!("entry '{eng}' in '{key}' is not a string or list")),
            };
            names.push(Name::new(tokens.join(" "), eng.clone()));
        }
        Ok(names)
    }

    fn honorific_entries(&self) -> anyhow::Result<Vec<(String, String)>> {
        self.word_entries("honorifics")
    }

    fn log_category_error(&mut self, key: &str, err: &anyhow::Error) {
        self.error_log
            .push_str(&format!("Issue with the following key : {key}\n"));
        self.error_log
            .push_str(&format!("Error is as follows : {err}\n"));
    }
}

/// Adds closing periods before `」` where no terminal punctuation is present.
/// Must run before any replacements occur.
pub fn add_missing_periods(text: &str) -> String {
    MISSING_PERIOD_REGEX
        .replace_all(text, "${1}。」")
        .into_owned()
}
