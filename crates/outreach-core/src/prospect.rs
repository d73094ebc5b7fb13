use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::files::read_structured;
use crate::ConfigError;

/// One unit of work for an orchestration run.
///
/// `id` must be unique within a run. A prospect with an empty `email` or
/// `profile_url` is skipped before any external call. The name, company,
/// and title fields are whatever the upstream search layer already knew and
/// may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProspectRef {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "profileUrl")]
    pub profile_url: String,
    #[serde(default, alias = "firstName")]
    pub first_name: String,
    #[serde(default, alias = "lastName")]
    pub last_name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub title: String,
}

impl ProspectRef {
    /// `true` when both identity fields needed for enrichment are present.
    #[must_use]
    pub fn is_enrichable(&self) -> bool {
        !self.email.trim().is_empty() && !self.profile_url.trim().is_empty()
    }
}

/// Normalized enrichment result.
///
/// Every text field is best-effort: a field missing upstream is an empty
/// string, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub headline: String,
    pub company_name: String,
    pub company_size: String,
    pub company_industry: String,
    pub location: String,
    pub connections: String,
    pub followers: String,
    pub about: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// What the personalization prompt knows about the recipient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProspectSummary {
    pub name: String,
    pub email: String,
    pub company: String,
    pub title: String,
}

impl ProspectSummary {
    /// Build a summary from the prospect, preferring enriched values when
    /// the search-layer fields are empty.
    #[must_use]
    pub fn from_prospect(prospect: &ProspectRef, profile: Option<&Profile>) -> Self {
        let pick = |own: &str, enriched: Option<&str>| -> String {
            if own.trim().is_empty() {
                enriched.unwrap_or_default().trim().to_string()
            } else {
                own.trim().to_string()
            }
        };

        let own_name = format!("{} {}", prospect.first_name.trim(), prospect.last_name.trim());
        let enriched_name = profile.map(|p| {
            if p.full_name.trim().is_empty() {
                format!("{} {}", p.first_name.trim(), p.last_name.trim())
            } else {
                p.full_name.clone()
            }
        });

        Self {
            name: pick(own_name.trim(), enriched_name.as_deref().map(str::trim)),
            email: prospect.email.trim().to_string(),
            company: pick(&prospect.company, profile.map(|p| p.company_name.as_str())),
            title: pick(&prospect.title, profile.map(|p| p.headline.as_str())),
        }
    }
}

/// Load a prospect list from a JSON or YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed.
pub fn load_prospects(path: &Path) -> Result<Vec<ProspectRef>, ConfigError> {
    read_structured(path)
}
