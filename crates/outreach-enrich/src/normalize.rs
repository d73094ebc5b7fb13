use outreach_core::Profile;

use crate::types::{RawExperience, RawProfile};

/// Convert a raw lookup response into a [`Profile`].
///
/// Missing fields become empty strings. Company details come from the
/// current position (the first experience without an end date, else the
/// first listed), falling back to the "Title at Company" occupation line.
#[must_use]
pub fn normalize_profile(raw: RawProfile) -> Profile {
    let current = current_experience(raw.experiences.as_deref().unwrap_or_default());

    let first_name = clean(raw.first_name.as_deref());
    let last_name = clean(raw.last_name.as_deref());
    let full_name = match clean(raw.full_name.as_deref()) {
        name if name.is_empty() => format!("{first_name} {last_name}").trim().to_string(),
        name => name,
    };

    let occupation = clean(raw.occupation.as_deref());
    let headline = match clean(raw.headline.as_deref()) {
        h if h.is_empty() => occupation.clone(),
        h => h,
    };

    let company_name = match current.map(|e| clean(e.company.as_deref())) {
        Some(name) if !name.is_empty() => name,
        _ => company_from_occupation(&occupation),
    };

    let company_industry = match current.map(|e| clean(e.company_industry.as_deref())) {
        Some(industry) if !industry.is_empty() => industry,
        _ => clean(raw.industry.as_deref()),
    };

    let company_size = current
        .and_then(|e| e.company_size_on_linkedin)
        .map(|n| n.to_string())
        .unwrap_or_default();

    let location = [&raw.city, &raw.state, &raw.country_full_name]
        .into_iter()
        .map(|part| clean(part.as_deref()))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    let picture_url = raw
        .profile_pic_url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string);

    let skills = raw
        .skills
        .unwrap_or_default()
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    Profile {
        first_name,
        last_name,
        full_name,
        headline,
        company_name,
        company_size,
        company_industry,
        location,
        connections: count_to_string(raw.connections),
        followers: count_to_string(raw.follower_count),
        about: clean(raw.summary.as_deref()),
        picture_url,
        skills,
    }
}

fn current_experience(experiences: &[RawExperience]) -> Option<&RawExperience> {
    experiences
        .iter()
        .find(|e| e.ends_at.as_ref().is_none_or(serde_json::Value::is_null))
        .or_else(|| experiences.first())
}

/// `"Head of Growth at Acme Corp"` → `"Acme Corp"`.
fn company_from_occupation(occupation: &str) -> String {
    occupation
        .rsplit_once(" at ")
        .map(|(_, company)| company.trim().to_string())
        .unwrap_or_default()
}

fn clean(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

fn count_to_string(value: Option<u64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_from(json: serde_json::Value) -> RawProfile {
        serde_json::from_value(json).expect("fixture should deserialize")
    }

    #[test]
    fn empty_response_normalizes_to_empty_strings() {
        let profile = normalize_profile(raw_from(serde_json::json!({})));
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn nulls_are_treated_as_absent() {
        let profile = normalize_profile(raw_from(serde_json::json!({
            "first_name": null,
            "headline": null,
            "connections": null,
            "skills": null,
            "experiences": null
        })));
        assert_eq!(profile.first_name, "");
        assert_eq!(profile.connections, "");
        assert!(profile.skills.is_empty());
    }

    #[test]
    fn full_profile_maps_every_field() {
        let profile = normalize_profile(raw_from(serde_json::json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "full_name": "Ada Lovelace",
            "headline": "Founder",
            "summary": "Writes programs for engines.",
            "city": "London",
            "state": "",
            "country_full_name": "United Kingdom",
            "connections": 500,
            "follower_count": 1200,
            "profile_pic_url": "https://img.example.com/ada.png",
            "skills": ["Mathematics", " ", "Poetry"],
            "experiences": [
                {"company": "Old Co", "title": "Analyst", "ends_at": {"year": 2020}},
                {"company": "Engines Ltd", "title": "Founder", "ends_at": null,
                 "company_industry": "Computing", "company_size_on_linkedin": 42}
            ]
        })));

        assert_eq!(profile.full_name, "Ada Lovelace");
        assert_eq!(profile.company_name, "Engines Ltd");
        assert_eq!(profile.company_industry, "Computing");
        assert_eq!(profile.company_size, "42");
        assert_eq!(profile.location, "London, United Kingdom");
        assert_eq!(profile.connections, "500");
        assert_eq!(profile.followers, "1200");
        assert_eq!(profile.about, "Writes programs for engines.");
        assert_eq!(
            profile.picture_url.as_deref(),
            Some("https://img.example.com/ada.png")
        );
        assert_eq!(profile.skills, vec!["Mathematics", "Poetry"]);
    }

    #[test]
    fn company_falls_back_to_occupation() {
        let profile = normalize_profile(raw_from(serde_json::json!({
            "occupation": "Head of Growth at Acme Corp",
            "industry": "Software"
        })));
        assert_eq!(profile.company_name, "Acme Corp");
        assert_eq!(profile.headline, "Head of Growth at Acme Corp");
        assert_eq!(profile.company_industry, "Software");
    }

    #[test]
    fn full_name_is_built_from_parts_when_missing() {
        let profile = normalize_profile(raw_from(serde_json::json!({
            "first_name": "Grace",
            "last_name": "Hopper"
        })));
        assert_eq!(profile.full_name, "Grace Hopper");
    }

    #[test]
    fn blank_picture_url_is_none() {
        let profile = normalize_profile(raw_from(serde_json::json!({"profile_pic_url": "  "})));
        assert!(profile.picture_url.is_none());
    }
}
