/*!
 * Tests for name variant expansion
 */

use anyhow::Result;

use kairyou::errors::KairyouError;
use kairyou::name_variants::{name_variants, Name, ReplacementScope};

#[test]
fn test_name_variants_withMismatchedTokenCounts_shouldFailWithNameMismatch() {
    let name = Name::new("ジョン", "John Smith");
    let result = name_variants(&name, ReplacementScope::ALL_NAMES, ReplacementScope::ALL_NAMES);

    match result {
        Err(KairyouError::NameMismatch { jap, eng }) => {
            assert_eq!(jap, "ジョン");
            assert_eq!(eng, "John Smith");
        }
        other => panic!("expected NameMismatch, got {other:?}"),
    }
}

#[test]
fn test_name_variants_withTwoTokens_shouldYieldFullFirstAndLast() -> Result<()> {
    let name = Name::new("山田 太郎", "Taro Yamada");
    let variants = name_variants(
        &name,
        ReplacementScope::ALL_NAMES,
        ReplacementScope::ALL_NAMES,
    )?;

    // full name with both joiners, then first, then last
    assert_eq!(variants.len(), 4);
    assert_eq!(variants[0].jap, "山田・太郎");
    assert_eq!(variants[0].eng, "Taro Yamada");
    assert_eq!(variants[1].jap, "山田太郎");
    assert_eq!(variants[1].eng, "Taro Yamada");
    assert_eq!(variants[2].jap, "山田");
    assert_eq!(variants[2].eng, "Taro");
    assert_eq!(variants[3].jap, "太郎");
    assert_eq!(variants[3].eng, "Yamada");
    assert!(variants.iter().all(|variant| variant.no_honor));
    Ok(())
}

#[test]
fn test_name_variants_withThreeTokens_shouldYieldAllCombinations() -> Result<()> {
    let name = Name::new("甲 乙 丙", "Ko Otsu Hei");
    let variants = name_variants(
        &name,
        ReplacementScope::ALL_NAMES,
        ReplacementScope::ALL_NAMES,
    )?;

    // 4 index combinations of size >= 2, each with 2 joiners, plus first and last
    assert_eq!(variants.len(), 10);
    assert!(variants.iter().any(|variant| variant.jap == "甲乙丙"));
    assert!(variants.iter().any(|variant| variant.jap == "甲・丙"));
    assert_eq!(variants[8].jap, "甲");
    assert_eq!(variants[9].jap, "丙");
    Ok(())
}

#[test]
fn test_name_variants_withLastNameScope_shouldYieldOnlyLast() -> Result<()> {
    let name = Name::new("山田 太郎", "Taro Yamada");
    let variants = name_variants(
        &name,
        ReplacementScope::LAST_NAME,
        ReplacementScope::LAST_NAME,
    )?;

    assert_eq!(variants.len(), 1);
    assert_eq!(variants[0].jap, "太郎");
    assert_eq!(variants[0].eng, "Yamada");
    assert!(variants[0].no_honor);
    Ok(())
}

#[test]
fn test_name_variants_withNoneHonorificScope_shouldClearHonorFlags() -> Result<()> {
    let name = Name::new("山田 太郎", "Taro Yamada");
    let variants = name_variants(
        &name,
        ReplacementScope::ALL_NAMES,
        ReplacementScope::NONE,
    )?;

    assert!(variants.iter().all(|variant| !variant.no_honor));
    Ok(())
}

#[test]
fn test_name_variants_withSingleToken_shouldSkipFullNameCombinations() -> Result<()> {
    let name = Name::new("アリス", "Alice");
    let variants = name_variants(
        &name,
        ReplacementScope::ALL_NAMES,
        ReplacementScope::ALL_NAMES,
    )?;

    // no combination of size >= 2 exists; first and last collapse to the
    // same token and are both yielded
    assert_eq!(variants.len(), 2);
    assert_eq!(variants[0].jap, "アリス");
    assert_eq!(variants[1].jap, "アリス");
    Ok(())
}
