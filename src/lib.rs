/*!
 * # Kairyou
 *
 * A Rust library for preprocessing Japanese text before machine or human
 * translation.
 *
 * ## Features
 *
 * - Substitute Japanese tokens (names, phrases, punctuation, single words)
 *   with English equivalents from a user-supplied replacement table
 * - Two supported table schemas: "kudasai" and "fukuin"
 * - Name-variant expansion for multi-token names with honorific handling
 * - Katakana-aware precedence: longer katakana entries substitute first
 * - NER-gated "enhanced" replacement for ambiguous tokens, behind a
 *   pluggable recognizer trait
 * - Index a text against a knowledge-base corpus to surface personal names
 *   not yet catalogued
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `engine`: The substitution engine (`Kairyou`)
 * - `indexer`: New-name discovery against a knowledge base (`Indexer`)
 * - `rule_schema`: Replacement-table validation and resolution
 * - `name_variants`: Name data model and variant expansion
 * - `katakana`: Character-set membership tests and heuristics
 * - `ner`: Recognizer seam, plus the gazetteer and mock backends
 * - `file_utils`: Text and knowledge-base loading
 * - `errors`: Custom error types
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod engine;
pub mod errors;
pub mod file_utils;
pub mod indexer;
pub mod katakana;
pub mod name_variants;
pub mod ner;
pub mod rule_schema;

// Re-export main types for easier usage
pub use engine::{Kairyou, PreprocessOptions, PreprocessOutcome};
pub use errors::{KairyouError, NerError};
pub use indexer::{IndexOptions, Indexer, NameAndOccurrence};
pub use katakana::KatakanaUtil;
pub use name_variants::{name_variants, Name, NameVariant, ReplacementScope};
pub use ner::{Entity, NerBackend, NerSource};
pub use rule_schema::{SchemaKind, TableInput};
