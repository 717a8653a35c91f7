//! Section-key spellings seen across dataset revisions.
//!
//! Matching is exact and case-sensitive. Anything not listed here is kept as
//! an extra section under its original key.

use crate::catalog::SectionKey;

const ALIASES: &[(&str, SectionKey)] = &[
    ("출처", SectionKey::Source),
    ("source", SectionKey::Source),
    ("sources", SectionKey::Source),
    ("참고자료", SectionKey::Source),
    ("주요영양소", SectionKey::Nutrients),
    ("주요 영양소", SectionKey::Nutrients),
    ("영양소", SectionKey::Nutrients),
    ("nutrients", SectionKey::Nutrients),
    ("nutrition", SectionKey::Nutrients),
    ("약효및효용", SectionKey::Efficacy),
    ("약효 및 효용", SectionKey::Efficacy),
    ("효능", SectionKey::Efficacy),
    ("efficacy", SectionKey::Efficacy),
    ("benefits", SectionKey::Efficacy),
    ("제철및선택법", SectionKey::Season),
    ("제철 및 선택법", SectionKey::Season),
    ("제철", SectionKey::Season),
    ("season", SectionKey::Season),
    ("seasonality", SectionKey::Season),
    ("조리포인트", SectionKey::Tips),
    ("조리 포인트", SectionKey::Tips),
    ("tips", SectionKey::Tips),
    ("cooking_tips", SectionKey::Tips),
    ("어울리는요리", SectionKey::Pairing),
    ("어울리는 요리", SectionKey::Pairing),
    ("pairing", SectionKey::Pairing),
    ("pairings", SectionKey::Pairing),
    ("레시피", SectionKey::Recipe),
    ("recipe", SectionKey::Recipe),
    ("개요", SectionKey::Overview),
    ("소개", SectionKey::Overview),
    ("overview", SectionKey::Overview),
    ("summary", SectionKey::Overview),
];

/// Canonical key for a known spelling.
pub fn canonical_key(label: &str) -> Option<SectionKey> {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == label)
        .map(|(_, key)| key.clone())
}

/// Canonical key for `label`, or `Extra(label)` when it is not a known alias.
pub fn resolve_key(label: &str) -> SectionKey {
    canonical_key(label).unwrap_or_else(|| SectionKey::Extra(label.to_string()))
}
