use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a headshot style. Declaration order is the generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleId {
    CorporateClassic,
    CreativeProfessional,
    ExecutivePortrait,
    ArtisticFusion,
}

impl StyleId {
    pub const ALL: [StyleId; 4] = [
        StyleId::CorporateClassic,
        StyleId::CreativeProfessional,
        StyleId::ExecutivePortrait,
        StyleId::ArtisticFusion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleId::CorporateClassic => "corporate-classic",
            StyleId::CreativeProfessional => "creative-professional",
            StyleId::ExecutivePortrait => "executive-portrait",
            StyleId::ArtisticFusion => "artistic-fusion",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StyleId::CorporateClassic => "Corporate Classic",
            StyleId::CreativeProfessional => "Creative Professional",
            StyleId::ExecutivePortrait => "Executive Portrait",
            StyleId::ArtisticFusion => "Artistic Fusion",
        }
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStyle(pub String);

impl fmt::Display for UnknownStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown style: {}", self.0)
    }
}

impl std::error::Error for UnknownStyle {}

impl FromStr for StyleId {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleId::ALL
            .iter()
            .copied()
            .find(|style| style.as_str() == s.trim())
            .ok_or_else(|| UnknownStyle(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_id_parses_kebab_case() {
        assert_eq!(
            "executive-portrait".parse::<StyleId>(),
            Ok(StyleId::ExecutivePortrait)
        );
        assert_eq!(" artistic-fusion ".parse::<StyleId>(), Ok(StyleId::ArtisticFusion));
        assert!("vintage-sepia".parse::<StyleId>().is_err());
    }

    #[test]
    fn test_style_id_serializes_as_map_key() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(StyleId::CreativeProfessional, 1);
        map.insert(StyleId::CorporateClassic, 2);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"corporate-classic":2,"creative-professional":1}"#);
    }
}
