/*!
 * Scripted mock recognizer for tests.
 *
 * - `MockNer::working(..)` labels every occurrence of the given strings as
 *   PERSON, without overlap suppression between entries
 * - `MockNer::failing()` always errors
 * - `with_entity` adds spans under arbitrary labels
 */

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::NerError;
use crate::ner::{find_char_occurrences, Entity, NerBackend};

#[derive(Debug, Default)]
pub struct MockNer {
    /// (text, label) pairs to report wherever the text occurs
    entities: Vec<(String, String)>,
    fail: bool,
    calls: AtomicUsize,
}

impl MockNer {
    /// Mock that labels every occurrence of each given string as PERSON
    pub fn working<I, S>(persons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockNer {
            entities: persons
                .into_iter()
                .map(|p| (p.into(), "PERSON".to_string()))
                .collect(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Mock whose every recognition call fails
    pub fn failing() -> Self {
        MockNer {
            entities: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// Adds a span under an arbitrary label
    pub fn with_entity(mut self, text: &str, label: &str) -> Self {
        self.entities.push((text.to_string(), label.to_string()));
        self
    }

    /// Number of recognition calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl NerBackend for MockNer {
    fn recognize(&self, line: &str) -> Result<Vec<Entity>, NerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(NerError::RecognitionFailed(
                "mock recognizer configured to fail".to_string(),
            ));
        }

        let chars: Vec<char> = line.chars().collect();
        let mut entities = Vec::new();
        for (text, label) in &self.entities {
            for (start, end) in find_char_occurrences(&chars, text) {
                entities.push(Entity {
                    label: label.clone(),
                    text: text.clone(),
                    start,
                    end,
                });
            }
        }
        entities.sort_by_key(|entity| entity.start);
        Ok(entities)
    }
}
