/*!
 * Error types for the kairyou library.
 *
 * This module contains custom error types for different parts of the library,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with a NER backend
#[derive(Error, Debug)]
pub enum NerError {
    /// The recognizer model/resource could not be acquired.
    ///
    /// This is almost always an environment or setup problem rather than a
    /// data problem, so it carries its own actionable message.
    #[error("NER model not available: {0}\nInstall or configure a recognizer backend before running")]
    ModelNotAvailable(String),

    /// A recognition call on a single line failed
    #[error("Entity recognition failed: {0}")]
    RecognitionFailed(String),
}

/// Main error type for preprocessing and indexing
#[derive(Error, Debug)]
pub enum KairyouError {
    /// The replacement table's key set matches neither recognized schema
    #[error(
        "Invalid replacement table. A kudasai table requires the keys: kutouten, unicode, \
         phrases, single_words, enhanced_check_whitelist, full_names, single_names, name_like \
         and honorifics. A fukuin table requires: specials, basic, names, single-names, \
         full-names, name-like and honorifics."
    )]
    SchemaInvalid,

    /// Native and translated token counts differ for one name entry
    #[error("Name lengths do not match for : {jap}/{eng}\nPlease correct the name entry in the replacement table")]
    NameMismatch {
        /// Native (Japanese) side of the offending name
        jap: String,
        /// Translated (English) side of the offending name
        eng: String,
    },

    /// A rule-table string was neither valid inline JSON nor a readable file
    #[error("Invalid path to replacement json file: {0}\nPlease check the path and try again")]
    TablePath(String),

    /// A text or knowledge-base source could not be read
    #[error("Unreadable text source: {0}")]
    SourceUnreadable(String),

    /// The text handed to `preprocess` was empty
    #[error("Text to be preprocessed is empty.")]
    EmptyText,

    /// Error from the NER capability
    #[error("NER capability error: {0}")]
    Ner(#[from] NerError),
}
