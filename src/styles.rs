use std::collections::HashMap;

use crate::models::{StyleId, StyleInfo};

const CORPORATE_CLASSIC: &str = "Professional LinkedIn-style corporate headshot. Subject facing camera with confident, approachable expression. Neutral solid background (light gray or soft blue). Clean business attire visible. Studio lighting with soft shadows. Sharp focus on face. Professional color grading. High-quality executive portrait suitable for business profiles and corporate communications.";

const CREATIVE_PROFESSIONAL: &str = "Modern creative professional headshot. Close-up portrait with shallow depth of field. Soft bokeh background with warm, natural lighting. Subject with friendly, engaging expression. Contemporary style with subtle artistic touches. Balanced exposure with natural skin tones. Professional yet approachable aesthetic. Perfect for creative industry portfolios and modern business profiles.";

const EXECUTIVE_PORTRAIT: &str = "Dramatic black and white executive portrait. High-contrast artistic lighting with defined shadows. Professional subject with commanding presence. Clean composition focusing on facial features and expression. Editorial magazine quality. Sophisticated monochrome treatment. Sharp details with rich tonal range. Premium portrait suitable for executive profiles and high-end publications.";

const ARTISTIC_FUSION: &str = "Creative artistic portrait with surreal fruit headdress. Subject's head adorned with an elaborate arrangement of fresh colorful fruits - apples, kiwis, grapes, peaches, oranges, berries - mixed with tropical leaves and flowers. Dramatic studio lighting against pure black background. Subject with glamorous makeup featuring bold red lips and shimmering eye shadow. Fruits appear to be growing from and merging with the subject's hair and head in an organic, artistic way. Professional fashion photography style with vibrant colors and sharp details. The composition shows upper body and face with fruits creating a crown-like arrangement. Hyper-realistic yet fantastical aesthetic blending natural elements with high fashion.";

pub fn default_prompt(style: StyleId) -> &'static str {
    match style {
        StyleId::CorporateClassic => CORPORATE_CLASSIC,
        StyleId::CreativeProfessional => CREATIVE_PROFESSIONAL,
        StyleId::ExecutivePortrait => EXECUTIVE_PORTRAIT,
        StyleId::ArtisticFusion => ARTISTIC_FUSION,
    }
}

/// Ordered, immutable style → default prompt table shared by request
/// validation and orchestration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleCatalog {
    entries: Vec<(StyleId, String)>,
}

impl Default for StyleCatalog {
    fn default() -> Self {
        Self::with_styles(&StyleId::ALL)
    }
}

impl StyleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog restricted to `styles`, in the given order. Duplicates are dropped.
    pub fn with_styles(styles: &[StyleId]) -> Self {
        let mut entries: Vec<(StyleId, String)> = Vec::with_capacity(styles.len());
        for &style in styles {
            if !entries.iter().any(|(existing, _)| *existing == style) {
                entries.push((style, default_prompt(style).to_string()));
            }
        }
        Self { entries }
    }

    pub fn styles(&self) -> impl Iterator<Item = StyleId> + '_ {
        self.entries.iter().map(|(style, _)| *style)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, style: StyleId) -> bool {
        self.entries.iter().any(|(existing, _)| *existing == style)
    }

    pub fn prompt(&self, style: StyleId) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == style)
            .map(|(_, prompt)| prompt.as_str())
    }

    /// Merges caller overrides over the defaults.
    ///
    /// Blank overrides fall back to the default prompt. Keys that are not
    /// styles of this catalog are ignored.
    pub fn resolve(&self, overrides: &HashMap<String, String>) -> ResolvedPrompts {
        for key in overrides.keys() {
            let known = key
                .parse::<StyleId>()
                .map(|style| self.contains(style))
                .unwrap_or(false);
            if !known {
                log::debug!("Ignoring prompt override for unknown style '{}'", key);
            }
        }

        let prompts = self
            .entries
            .iter()
            .map(|(style, default)| {
                let prompt = overrides
                    .get(style.as_str())
                    .filter(|text| !text.trim().is_empty())
                    .cloned()
                    .unwrap_or_else(|| default.clone());
                (*style, prompt)
            })
            .collect();

        ResolvedPrompts { prompts }
    }

    pub fn describe(&self) -> Vec<StyleInfo> {
        self.entries
            .iter()
            .map(|(style, prompt)| StyleInfo {
                id: *style,
                name: style.display_name().to_string(),
                prompt: prompt.clone(),
            })
            .collect()
    }
}

/// Exactly one prompt per catalog style, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPrompts {
    prompts: Vec<(StyleId, String)>,
}

impl ResolvedPrompts {
    pub fn iter(&self) -> impl Iterator<Item = (StyleId, &str)> + '_ {
        self.prompts
            .iter()
            .map(|(style, prompt)| (*style, prompt.as_str()))
    }

    pub fn get(&self, style: StyleId) -> Option<&str> {
        self.iter()
            .find(|(existing, _)| *existing == style)
            .map(|(_, prompt)| prompt)
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}
