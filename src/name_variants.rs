/*!
 * Name data model and variant expansion.
 *
 * A `Name` pairs the native (Japanese) and translated (English) sides of one
 * multi-part personal name. Variant expansion produces every sub-span of a
 * multi-token name that counts as a valid partial match, in the order the
 * substitution engine should attempt them.
 */

use std::ops::BitOr;

use crate::errors::KairyouError;

/// How Japanese names are separated in the source text
pub const JAPANESE_NAME_SEPARATORS: [&str; 2] = ["・", ""];

/// A Japanese name along with its English equivalent.
///
/// Both sides are stored space-joined; token counts must match, which is
/// checked at expansion time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    /// Native (Japanese) side, tokens joined with a single space
    pub jap: String,
    /// Translated (English) side, tokens joined with a single space
    pub eng: String,
}

impl Name {
    pub fn new(jap: impl Into<String>, eng: impl Into<String>) -> Self {
        Name {
            jap: jap.into(),
            eng: eng.into(),
        }
    }
}

/// Bitmask over the three name sub-span markers.
///
/// Union values are constructed with `|`, never hand-enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplacementScope(u8);

impl ReplacementScope {
    pub const NONE: Self = Self(0);
    pub const FULL_NAME: Self = Self(1);
    pub const FIRST_NAME: Self = Self(1 << 1);
    pub const LAST_NAME: Self = Self(1 << 2);
    pub const ALL_NAMES: Self =
        Self(Self::FULL_NAME.0 | Self::FIRST_NAME.0 | Self::LAST_NAME.0);

    /// Membership test. `NONE` is never contained in anything.
    pub fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }
}

impl BitOr for ReplacementScope {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// One (translated, native, honorific-policy) triple to attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameVariant {
    /// Translated form to substitute in
    pub eng: String,
    /// Native form to look for in the text
    pub jap: String,
    /// Whether the bare, honorific-free form may be replaced for this
    /// variant (set when the matching sub-span is in the honorific scope)
    pub no_honor: bool,
}

/// Expands a name into the ordered, finite sequence of variants to attempt.
///
/// Full-name variants come first: every combination of two or more token
/// indices, each joined with the interpunct separator and with no separator,
/// so multi-token names match whether or not the text writes a visible
/// separator. First-name and last-name variants follow.
///
/// Fails with [`KairyouError::NameMismatch`] when the native and translated
/// token counts differ.
pub fn name_variants(
    name: &Name,
    replace_scope: ReplacementScope,
    honorific_scope: ReplacementScope,
) -> Result<Vec<NameVariant>, KairyouError> {
    let jap_tokens: Vec<&str> = name.jap.split(' ').collect();
    let eng_tokens: Vec<&str> = name.eng.split(' ').collect();

    if jap_tokens.len() != eng_tokens.len() {
        return Err(KairyouError::NameMismatch {
            jap: name.jap.clone(),
            eng: name.eng.clone(),
        });
    }

    let mut variants = Vec::new();

    if replace_scope.contains(ReplacementScope::FULL_NAME) {
        for combination in index_combinations(jap_tokens.len()) {
            for separator in JAPANESE_NAME_SEPARATORS {
                variants.push(NameVariant {
                    eng: combination
                        .iter()
                        .map(|&i| eng_tokens[i])
                        .collect::<Vec<_>>()
                        .join(" "),
                    jap: combination
                        .iter()
                        .map(|&i| jap_tokens[i])
                        .collect::<Vec<_>>()
                        .join(separator),
                    no_honor: honorific_scope.contains(ReplacementScope::FULL_NAME),
                });
            }
        }
    }

    if replace_scope.contains(ReplacementScope::FIRST_NAME) {
        variants.push(NameVariant {
            eng: eng_tokens[0].to_string(),
            jap: jap_tokens[0].to_string(),
            no_honor: honorific_scope.contains(ReplacementScope::FIRST_NAME),
        });
    }

    if replace_scope.contains(ReplacementScope::LAST_NAME) {
        variants.push(NameVariant {
            eng: eng_tokens[eng_tokens.len() - 1].to_string(),
            jap: jap_tokens[jap_tokens.len() - 1].to_string(),
            no_honor: honorific_scope.contains(ReplacementScope::LAST_NAME),
        });
    }

    Ok(variants)
}

/// All index combinations of size 2 up to `n`, in ascending size order
fn index_combinations(n: usize) -> Vec<Vec<usize>> {
    let mut all = Vec::new();
    for size in 2..=n {
        let mut current = Vec::with_capacity(size);
        combine(0, n, size, &mut current, &mut all);
    }
    all
}

fn combine(
    start: usize,
    n: usize,
    size: usize,
    current: &mut Vec<usize>,
    out: &mut Vec<Vec<usize>>,
) {
    if current.len() == size {
        out.push(current.clone());
        return;
    }
    for i in start..n {
        current.push(i);
        combine(i + 1, n, size, current, out);
        current.pop();
    }
}
