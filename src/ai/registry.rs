//! Provider Registry
//!
//! Static catalog of selectable models per provider. Labels carry a tier hint
//! after the id, e.g. `"gpt-4o (Balanced/Latest)"`; tiers are relative
//! cost/performance indicators only.

use super::provider::ProviderKind;

/// One selectable model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOption {
    pub id: &'static str,
    pub tier: &'static str,
}

impl ModelOption {
    const fn new(id: &'static str, tier: &'static str) -> Self {
        Self { id, tier }
    }

    /// Display label, `"<id> (<tier>)"`
    pub fn label(&self) -> String {
        format!("{} ({})", self.id, self.tier)
    }
}

const OPENAI_MODELS: &[ModelOption] = &[
    ModelOption::new("gpt-4o", "Balanced/Latest"),
    ModelOption::new("gpt-4-turbo", "Powerful"),
    ModelOption::new("gpt-3.5-turbo", "Fast/Cheap"),
];

const ANTHROPIC_MODELS: &[ModelOption] = &[
    ModelOption::new("claude-3-opus-20240229", "Most Powerful"),
    ModelOption::new("claude-3-sonnet-20240229", "Balanced"),
    ModelOption::new("claude-3-haiku-20240307", "Fastest/Cheapest"),
];

const GOOGLE_MODELS: &[ModelOption] = &[
    ModelOption::new("gemini-1.5-pro-latest", "Powerful"),
    ModelOption::new("gemini-1.5-flash-latest", "Fast"),
    ModelOption::new("gemini-1.0-pro", "General"),
];

const DEEPSEEK_MODELS: &[ModelOption] = &[
    ModelOption::new("deepseek-chat", "General Chat"),
    ModelOption::new("deepseek-coder", "Code-focused"),
];

/// Stateless lookup over the model catalog
pub struct ProviderRegistry;

impl ProviderRegistry {
    /// Models for a provider, in catalog order
    pub fn models_for(kind: ProviderKind) -> &'static [ModelOption] {
        match kind {
            ProviderKind::OpenAi => OPENAI_MODELS,
            ProviderKind::Anthropic => ANTHROPIC_MODELS,
            ProviderKind::Google => GOOGLE_MODELS,
            ProviderKind::DeepSeek => DEEPSEEK_MODELS,
        }
    }

    /// Models for a provider identifier; unknown providers have none
    pub fn models(provider: &str) -> &'static [ModelOption] {
        provider
            .parse::<ProviderKind>()
            .map(Self::models_for)
            .unwrap_or(&[])
    }

    /// Display labels for a provider identifier, in catalog order
    pub fn labels(provider: &str) -> Vec<String> {
        Self::models(provider).iter().map(ModelOption::label).collect()
    }

    /// First catalog entry, used when no model is configured
    pub fn default_model(provider: &str) -> Option<&'static str> {
        Self::models(provider).first().map(|m| m.id)
    }

    /// Extract the model id from a display label: text before the first `(`,
    /// trimmed. A label without a tier hint is returned trimmed.
    pub fn model_id_from_label(label: &str) -> Option<String> {
        let id = label.split('(').next().unwrap_or_default().trim();
        (!id.is_empty()).then(|| id.to_string())
    }
}
