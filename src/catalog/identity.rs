use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Name of a category (e.g. `등푸른생선`), unique within a catalog.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryName(pub String);

/// Name of a species (e.g. `고등어`), unique within its owning category.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeciesName(pub String);

impl CategoryName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl SpeciesName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for SpeciesName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Section facet attached to a species.
///
/// Known variants cover the fixed section enumeration; `Extra` carries keys
/// that no alias recognizes so their content is preserved verbatim.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum SectionKey {
    Overview,
    Source,
    Nutrients,
    Efficacy,
    Season,
    Tips,
    Pairing,
    Recipe,
    Extra(String),
}

impl SectionKey {
    /// Fixed sections in the order `ALL` displays them.
    pub const DISPLAY_ORDER: [SectionKey; 8] = [
        SectionKey::Overview,
        SectionKey::Source,
        SectionKey::Nutrients,
        SectionKey::Efficacy,
        SectionKey::Season,
        SectionKey::Tips,
        SectionKey::Pairing,
        SectionKey::Recipe,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            SectionKey::Overview => "overview",
            SectionKey::Source => "source",
            SectionKey::Nutrients => "nutrients",
            SectionKey::Efficacy => "efficacy",
            SectionKey::Season => "season",
            SectionKey::Tips => "tips",
            SectionKey::Pairing => "pairing",
            SectionKey::Recipe => "recipe",
            SectionKey::Extra(value) => value.as_str(),
        }
    }

    fn from_str(value: &str) -> Self {
        match value {
            "overview" => SectionKey::Overview,
            "source" => SectionKey::Source,
            "nutrients" => SectionKey::Nutrients,
            "efficacy" => SectionKey::Efficacy,
            "season" => SectionKey::Season,
            "tips" => SectionKey::Tips,
            "pairing" => SectionKey::Pairing,
            "recipe" => SectionKey::Recipe,
            other => SectionKey::Extra(other.to_string()),
        }
    }

    /// Spaced Korean heading shown above the section.
    pub fn display_label(&self) -> &str {
        match self {
            SectionKey::Overview => "개요",
            SectionKey::Source => "출처",
            SectionKey::Nutrients => "주요 영양소",
            SectionKey::Efficacy => "약효 및 효용",
            SectionKey::Season => "제철 및 선택법",
            SectionKey::Tips => "조리 포인트",
            SectionKey::Pairing => "어울리는 요리",
            SectionKey::Recipe => "레시피",
            SectionKey::Extra(value) => value.as_str(),
        }
    }

    /// Compact Korean key used by the legacy dataset layout.
    pub fn legacy_label(&self) -> &str {
        match self {
            SectionKey::Overview => "개요",
            SectionKey::Source => "출처",
            SectionKey::Nutrients => "주요영양소",
            SectionKey::Efficacy => "약효및효용",
            SectionKey::Season => "제철및선택법",
            SectionKey::Tips => "조리포인트",
            SectionKey::Pairing => "어울리는요리",
            SectionKey::Recipe => "레시피",
            SectionKey::Extra(value) => value.as_str(),
        }
    }

    pub fn is_extra(&self) -> bool {
        matches!(self, SectionKey::Extra(_))
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SectionKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SectionKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}
