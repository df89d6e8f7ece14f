/*!
 * Katakana-aware character classification.
 *
 * Pure, stateless membership tests and heuristics used to tell legitimate
 * katakana loanwords apart from transliterated personal names, and to throw
 * out NER false positives that are mostly symbols, partially English, or
 * onomatopoeia-like.
 */

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Embedded flat lexicon of known katakana loanwords, one word per line.
static KATAKANA_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    include_str!("data/katakana_words.txt")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
});

/// The katakana Unicode block, including the interpunct and long-vowel mark.
/// https://en.wikipedia.org/wiki/Katakana_(Unicode_block)
static KATAKANA_CHARSET: Lazy<HashSet<char>> = Lazy::new(|| {
    "゠ァアィイゥウェエォオカガキギクグケゲコゴサザシジスズセゼソゾタダチヂッツヅテデトドナニヌネノ\
     ハバパヒビピフブプヘベペホボポマミムメモャヤュユョヨラリルレロヮワヰヱヲンヴヵヶヷヸヹヺ・ーヽヾ"
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
});

/// Punctuation ranges covering CJK and Latin punctuation.
/// https://kairozu.github.io/updates/cleaning-jp-text
static PUNCTUATION_CHARSET: Lazy<HashSet<char>> = Lazy::new(|| {
    let mut set: HashSet<char> = HashSet::new();
    // CJK Symbols and Punctuation block
    set.extend('\u{3000}'..='\u{303F}');
    // General Punctuation block (width spaces, dashes, invisible controls)
    set.extend('\u{2000}'..='\u{206F}');
    // Fullwidth ASCII punctuation
    set.extend('\u{FF01}'..='\u{FF0F}');
    set.extend('\u{FF1A}'..='\u{FF20}');
    set.extend('\u{FF3B}'..='\u{FF40}');
    set.extend('\u{FF5B}'..='\u{FF65}');
    // ASCII punctuation
    set.extend(r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##.chars());
    // Stragglers present in Japanese prose
    set.extend("«»×△▼※ー".chars());
    set.insert(' ');
    set
});

/// Katakana and punctuation classification helpers
pub struct KatakanaUtil;

impl KatakanaUtil {
    /// True iff every character belongs to the katakana block.
    /// Vacuously true for the empty string.
    pub fn is_katakana_only(text: &str) -> bool {
        text.chars().all(|c| KATAKANA_CHARSET.contains(&c))
    }

    /// True iff the string is a verbatim entry in the loanword lexicon
    pub fn is_actual_word(jap: &str) -> bool {
        KATAKANA_WORDS.contains(jap)
    }

    /// True iff every character is punctuation
    pub fn is_punctuation(text: &str) -> bool {
        text.chars().all(|c| PUNCTUATION_CHARSET.contains(&c))
    }

    /// True iff punctuation characters strictly outnumber the rest
    pub fn is_more_punctuation_than_japanese(text: &str) -> bool {
        let punctuation = text
            .chars()
            .filter(|c| PUNCTUATION_CHARSET.contains(c))
            .count();
        let non_punctuation = text.chars().count() - punctuation;
        punctuation > non_punctuation
    }

    /// True iff any character is a Latin letter.
    /// Such a "name" is likely a mis-segmented English fragment.
    pub fn is_partially_english(text: &str) -> bool {
        text.chars().any(|c| c.is_ascii_alphabetic())
    }

    /// True iff some contiguous subsequence of length k (1 <= k <= len/2) is
    /// immediately repeated. Flags onomatopoeia-like tokens. O(n²) over all
    /// sizes and positions, which is fine at entity-token lengths.
    pub fn is_repeating_sequence(word: &str) -> bool {
        let chars: Vec<char> = word.chars().collect();
        for size in 1..=chars.len() / 2 {
            for start in 0..chars.len().saturating_sub(size) {
                if start + 2 * size > chars.len() {
                    break;
                }
                if chars[start..start + size] == chars[start + size..start + 2 * size] {
                    return true;
                }
            }
        }
        false
    }
}
