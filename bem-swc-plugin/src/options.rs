use serde::Deserialize;

/// Naming prefixes used when building BEM class names.
///
/// Deserialized from the plugin config, e.g.
/// `["bem_swc_plugin", { "elementPrefix": "-", "modifierPrefix": "_" }]`.
/// Missing keys keep their defaults and unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BemOptions {
    pub block_prefix: String,
    pub element_prefix: String,
    pub modifier_prefix: String,
}

impl Default for BemOptions {
    fn default() -> Self {
        Self {
            block_prefix: String::new(),
            element_prefix: "__".to_string(),
            modifier_prefix: "--".to_string(),
        }
    }
}

impl BemOptions {
    pub fn from_json(config: &str) -> serde_json::Result<Self> {
        if config.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(config)
    }

    /// Same as [`BemOptions::from_json`], but falls back to the defaults when the
    /// config can't be read.
    pub fn from_json_or_default(config: &str) -> Self {
        Self::from_json(config).unwrap_or_else(|err| {
            tracing::warn!(%err, "invalid BEM plugin config, using defaults");
            Self::default()
        })
    }
}
