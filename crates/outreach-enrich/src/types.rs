//! Person-lookup API response types.
//!
//! Every field is optional: the service omits or nulls anything it does not
//! know, and [`crate::normalize_profile`] turns absence into empty strings.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub headline: Option<String>,
    /// Free-text "Title at Company" line.
    pub occupation: Option<String>,
    pub summary: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country_full_name: Option<String>,
    pub connections: Option<u64>,
    pub follower_count: Option<u64>,
    pub profile_pic_url: Option<String>,
    pub industry: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experiences: Option<Vec<RawExperience>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawExperience {
    pub company: Option<String>,
    pub title: Option<String>,
    pub company_industry: Option<String>,
    pub company_size_on_linkedin: Option<u64>,
    /// `null` for the current position.
    pub ends_at: Option<serde_json::Value>,
}
