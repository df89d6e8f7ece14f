/*!
 * Tests for katakana classification and heuristics
 */

use kairyou::katakana::KatakanaUtil;

/// Empty string is vacuously katakana-only
#[test]
fn test_is_katakana_only_withEmptyString_shouldReturnTrue() {
    assert!(KatakanaUtil::is_katakana_only(""));
}

#[test]
fn test_is_katakana_only_withKatakana_shouldReturnTrue() {
    assert!(KatakanaUtil::is_katakana_only("テスト"));
    assert!(KatakanaUtil::is_katakana_only("ミュラー・リヒト"));
}

#[test]
fn test_is_katakana_only_withEmbeddedLatinLetter_shouldReturnFalse() {
    assert!(!KatakanaUtil::is_katakana_only("テストt"));
}

#[test]
fn test_is_katakana_only_withKanjiAndHiragana_shouldReturnFalse() {
    assert!(!KatakanaUtil::is_katakana_only("山田"));
    assert!(!KatakanaUtil::is_katakana_only("テストだ"));
}

#[test]
fn test_is_actual_word_withLexiconEntry_shouldReturnTrue() {
    assert!(KatakanaUtil::is_actual_word("コーヒー"));
    assert!(KatakanaUtil::is_actual_word("インターネット"));
}

#[test]
fn test_is_actual_word_withUnknownName_shouldReturnFalse() {
    assert!(!KatakanaUtil::is_actual_word("アリシア"));
}

#[test]
fn test_is_repeating_sequence_withDoubledWord_shouldReturnTrue() {
    assert!(KatakanaUtil::is_repeating_sequence("テストテスト"));
    // a single doubled character counts too
    assert!(KatakanaUtil::is_repeating_sequence("ダダン"));
}

#[test]
fn test_is_repeating_sequence_withPlainWord_shouldReturnFalse() {
    assert!(!KatakanaUtil::is_repeating_sequence("テスト"));
    assert!(!KatakanaUtil::is_repeating_sequence(""));
}

#[test]
fn test_is_partially_english_withMixedText_shouldReturnTrue() {
    assert!(KatakanaUtil::is_partially_english("テストtest"));
}

#[test]
fn test_is_partially_english_withPureJapanese_shouldReturnFalse() {
    assert!(!KatakanaUtil::is_partially_english("テスト"));
    assert!(!KatakanaUtil::is_partially_english("山田太郎"));
}

#[test]
fn test_is_punctuation_withMixedPunctuation_shouldReturnTrue() {
    assert!(KatakanaUtil::is_punctuation("「」。、!?"));
}

#[test]
fn test_is_punctuation_withContent_shouldReturnFalse() {
    assert!(!KatakanaUtil::is_punctuation("「山田」"));
}

#[test]
fn test_is_more_punctuation_than_japanese_withMostlySymbols_shouldReturnTrue() {
    assert!(KatakanaUtil::is_more_punctuation_than_japanese("…※「」田"));
}

#[test]
fn test_is_more_punctuation_than_japanese_withMostlyContent_shouldReturnFalse() {
    assert!(!KatakanaUtil::is_more_punctuation_than_japanese("山田太郎。"));
}
