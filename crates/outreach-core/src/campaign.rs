//! Campaign-level personalization input.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::files::read_structured;
use crate::prospect::Profile;
use crate::ConfigError;

/// What the campaign is trying to book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CampaignIntent {
    #[serde(rename = "Demo Calls", alias = "demo_calls")]
    DemoCalls,
    #[serde(rename = "Sales Calls", alias = "sales_calls")]
    SalesCalls,
    #[serde(rename = "Partnerships", alias = "partnerships")]
    Partnerships,
    #[serde(rename = "Investor Calls", alias = "investor_calls")]
    InvestorCalls,
    #[serde(rename = "Potential Hires", alias = "potential_hires")]
    PotentialHires,
}

impl CampaignIntent {
    pub const ALL: [CampaignIntent; 5] = [
        CampaignIntent::DemoCalls,
        CampaignIntent::SalesCalls,
        CampaignIntent::Partnerships,
        CampaignIntent::InvestorCalls,
        CampaignIntent::PotentialHires,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CampaignIntent::DemoCalls => "Demo Calls",
            CampaignIntent::SalesCalls => "Sales Calls",
            CampaignIntent::Partnerships => "Partnerships",
            CampaignIntent::InvestorCalls => "Investor Calls",
            CampaignIntent::PotentialHires => "Potential Hires",
        }
    }
}

impl std::fmt::Display for CampaignIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessValue {
    pub value_proposition: String,
    pub differentiator: String,
    pub target_customer: String,
    pub pain_points: Vec<String>,
    pub capabilities: Vec<String>,
    pub competitive_edges: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetSegment {
    pub industries: Vec<String>,
    pub roles: Vec<String>,
    pub company_sizes: Vec<String>,
    pub locations: Vec<String>,
}

/// Regeneration and style settings.
///
/// The four enum-like fields are kept as free strings because they arrive
/// from the UI layer; unknown values map to a fallback description when the
/// prompt is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageStyle {
    pub tone: String,
    pub play_type: String,
    pub cta_style: String,
    pub cta_action: String,
    pub custom_instructions: String,
}

impl Default for MessageStyle {
    fn default() -> Self {
        Self {
            tone: "professional".to_string(),
            play_type: "direct".to_string(),
            cta_style: "soft".to_string(),
            cta_action: "book-call".to_string(),
            custom_instructions: String::new(),
        }
    }
}

/// Everything the personalization client needs besides the prospect.
///
/// Immutable for the duration of a run. [`PersonalizationContext::with_profile`]
/// derives a per-prospect copy carrying that prospect's enriched profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalizationContext {
    #[serde(default)]
    pub campaign_name: String,
    pub intent: CampaignIntent,
    #[serde(default)]
    pub business: BusinessValue,
    #[serde(default)]
    pub segment: TargetSegment,
    #[serde(default)]
    pub style: MessageStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
}

impl PersonalizationContext {
    #[must_use]
    pub fn new(campaign_name: impl Into<String>, intent: CampaignIntent) -> Self {
        Self {
            campaign_name: campaign_name.into(),
            intent,
            business: BusinessValue::default(),
            segment: TargetSegment::default(),
            style: MessageStyle::default(),
            profile: None,
        }
    }

    /// Returns a copy augmented with `profile`. Business, segment and style
    /// settings are left untouched.
    #[must_use]
    pub fn with_profile(&self, profile: Profile) -> Self {
        Self {
            profile: Some(profile),
            ..self.clone()
        }
    }
}

/// Load a campaign context from a JSON or YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed.
pub fn load_campaign(path: &Path) -> Result<PersonalizationContext, ConfigError> {
    read_structured(path)
}
