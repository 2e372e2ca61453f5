//! Style modifiers applied to a generation request.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// How loosely the generated outfit should fit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Fit {
    Loose,
    Regular,
    Tight,
}

/// Optional style modifiers for a generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit: Option<Fit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
}

impl StyleParams {
    /// Shallow-merges `patch` into these params. Keys the patch leaves unset
    /// keep their current value.
    pub fn merge(&mut self, patch: StyleParamsPatch) {
        if let Some(style) = patch.style {
            self.style = Some(style);
        }
        if let Some(fit) = patch.fit {
            self.fit = Some(fit);
        }
        if let Some(occasion) = patch.occasion {
            self.occasion = Some(occasion);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.style.is_none() && self.fit.is_none() && self.occasion.is_none()
    }
}

/// Partial update for [`StyleParams`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleParamsPatch {
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub fit: Option<Fit>,
    #[serde(default)]
    pub occasion: Option<String>,
}

impl StyleParamsPatch {
    pub fn style(style: impl Into<String>) -> Self {
        Self {
            style: Some(style.into()),
            ..Self::default()
        }
    }

    pub fn fit(fit: Fit) -> Self {
        Self {
            fit: Some(fit),
            ..Self::default()
        }
    }

    pub fn occasion(occasion: impl Into<String>) -> Self {
        Self {
            occasion: Some(occasion.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.style.is_none() && self.fit.is_none() && self.occasion.is_none()
    }
}
