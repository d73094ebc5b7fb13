//! Column mapping between [`PersistableRecord`] and the store's table.

use outreach_core::PersistableRecord;
use serde::{Deserialize, Serialize};

/// Status written on every newly created row.
pub const DRAFT_STATUS: &str = "Draft";

/// One row as the store sees it. Column names match the outreach table.
#[derive(Debug, Serialize)]
pub struct RecordFields<'a> {
    #[serde(rename = "Prospect ID")]
    pub prospect_id: &'a str,
    #[serde(rename = "Email")]
    pub email: &'a str,
    #[serde(rename = "First Name")]
    pub first_name: &'a str,
    #[serde(rename = "Last Name")]
    pub last_name: &'a str,
    #[serde(rename = "Company", skip_serializing_if = "str::is_empty")]
    pub company: &'a str,
    #[serde(rename = "Title", skip_serializing_if = "str::is_empty")]
    pub title: &'a str,
    #[serde(rename = "LinkedIn URL", skip_serializing_if = "str::is_empty")]
    pub profile_url: &'a str,
    #[serde(rename = "Location", skip_serializing_if = "str::is_empty")]
    pub location: &'a str,
    #[serde(rename = "Subject")]
    pub subject: &'a str,
    #[serde(rename = "Message")]
    pub body: &'a str,
    #[serde(rename = "Campaign")]
    pub campaign_name: &'a str,
    #[serde(rename = "Campaign Intent")]
    pub campaign_intent: &'static str,
    #[serde(rename = "Organization ID")]
    pub organization_id: &'a str,
    #[serde(rename = "Status")]
    pub status: &'static str,
}

impl<'a> From<&'a PersistableRecord> for RecordFields<'a> {
    fn from(record: &'a PersistableRecord) -> Self {
        Self {
            prospect_id: &record.prospect_id,
            email: &record.email,
            first_name: &record.first_name,
            last_name: &record.last_name,
            company: &record.company,
            title: &record.title,
            profile_url: &record.profile_url,
            location: &record.location,
            subject: &record.subject,
            body: &record.body,
            campaign_name: &record.campaign_name,
            campaign_intent: record.campaign_intent.label(),
            organization_id: &record.organization_id,
            status: DRAFT_STATUS,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateRecord<'a> {
    pub fields: RecordFields<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateRecordsRequest<'a> {
    pub records: Vec<CreateRecord<'a>>,
    pub typecast: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedRecord {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateRecordsResponse {
    pub records: Vec<CreatedRecord>,
}
