/*!
 * Named-entity recognition seam.
 *
 * The engine and indexer never talk to a concrete recognizer directly. They
 * hold a [`NerSource`], which acquires a [`NerBackend`] lazily through a
 * caller-supplied factory and can discard it between runs to bound memory.
 * This keeps backends interchangeable: a statistical model binding, the
 * in-tree gazetteer, or a scripted mock in tests.
 */

use serde::Serialize;
use std::fmt;
use std::fmt::Debug;
use std::sync::Arc;

use crate::errors::NerError;

/// One detected entity span within a single line.
///
/// Offsets are character indices into the line, end exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    /// Entity label, e.g. "PERSON"
    pub label: String,
    /// Exact text of the span
    pub text: String,
    /// Start offset in characters
    pub start: usize,
    /// End offset in characters, exclusive
    pub end: usize,
}

/// Common trait for all recognizer backends.
///
/// Recognition is a blocking call with no timeout; a hang in the backend
/// hangs the run.
pub trait NerBackend: Send + Sync + Debug {
    /// Detect entity spans in one line of text
    fn recognize(&self, line: &str) -> Result<Vec<Entity>, NerError>;
}

impl<T: NerBackend + ?Sized> NerBackend for Arc<T> {
    fn recognize(&self, line: &str) -> Result<Vec<Entity>, NerError> {
        (**self).recognize(line)
    }
}

/// Factory producing a fresh backend, used for lazy (re-)acquisition
pub type NerFactory = Box<dyn Fn() -> Result<Box<dyn NerBackend>, NerError> + Send + Sync>;

/// Lazily acquired, discardable recognizer handle
pub struct NerSource {
    factory: NerFactory,
    backend: Option<Box<dyn NerBackend>>,
}

impl NerSource {
    /// Creates a source that acquires its backend through `factory` on first
    /// use and after every [`discard`](Self::discard)
    pub fn new(factory: NerFactory) -> Self {
        NerSource {
            factory,
            backend: None,
        }
    }

    /// Wraps an already constructed backend. After a discard, re-acquisition
    /// fails with [`NerError::ModelNotAvailable`] since there is no factory
    /// to rebuild it.
    pub fn from_backend(backend: Box<dyn NerBackend>) -> Self {
        NerSource {
            factory: Box::new(|| {
                Err(NerError::ModelNotAvailable(
                    "the recognizer was discarded and no factory is configured".to_string(),
                ))
            }),
            backend: Some(backend),
        }
    }

    /// Returns the backend, acquiring it through the factory if needed
    pub fn acquire(&mut self) -> Result<&dyn NerBackend, NerError> {
        if self.backend.is_none() {
            self.backend = Some((self.factory)()?);
        }
        match self.backend.as_deref() {
            Some(backend) => Ok(backend),
            None => Err(NerError::ModelNotAvailable(
                "recognizer factory produced no backend".to_string(),
            )),
        }
    }

    /// Drops the backend; the next [`acquire`](Self::acquire) goes back
    /// through the factory
    pub fn discard(&mut self) {
        self.backend = None;
    }

    /// Whether a backend is currently held
    pub fn is_acquired(&self) -> bool {
        self.backend.is_some()
    }
}

impl fmt::Debug for NerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NerSource")
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

/// All non-overlapping char-offset occurrences of `needle` in `chars`
pub(crate) fn find_char_occurrences(chars: &[char], needle: &str) -> Vec<(usize, usize)> {
    let needle_chars: Vec<char> = needle.chars().collect();
    let mut spans = Vec::new();
    if needle_chars.is_empty() || needle_chars.len() > chars.len() {
        return spans;
    }
    let mut start = 0;
    while start + needle_chars.len() <= chars.len() {
        if chars[start..start + needle_chars.len()] == needle_chars[..] {
            spans.push((start, start + needle_chars.len()));
            start += needle_chars.len();
        } else {
            start += 1;
        }
    }
    spans
}

pub mod gazetteer;
pub mod mock;
