//! Prompt assembly for message generation.

use std::fmt::Write as _;

use outreach_core::{PersonalizationContext, Profile, ProspectSummary};

use crate::caps::{BODY_MAX_CHARS, SUBJECT_MAX_CHARS};
use crate::strategy::{
    describe_cta_action, describe_cta_style, describe_play_type, describe_tone, intent_strategy,
};

/// A system/user message pair for a chat-completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Build the generation prompt for one prospect.
///
/// Sections with no content (an empty pain-point list, an absent profile)
/// are omitted rather than rendered blank.
#[must_use]
pub fn build_prompt(prospect: &ProspectSummary, context: &PersonalizationContext) -> Prompt {
    let system = format!(
        "You write short, personalized cold outreach emails. \
         Respond with a JSON object with exactly two string fields: \"subject\" \
         (at most {SUBJECT_MAX_CHARS} characters) and \"body\" (at most {BODY_MAX_CHARS} characters). \
         Do not include placeholders, signatures, or markdown."
    );

    let mut user = String::new();
    let strategy = intent_strategy(context.intent);

    section(&mut user, "Campaign");
    line(&mut user, "Name", &context.campaign_name);
    line(&mut user, "Intent", context.intent.label());
    line(&mut user, "Focus", strategy.focus);
    line(&mut user, "Approach", strategy.approach);
    line(&mut user, "Urgency", strategy.urgency);
    line(&mut user, "Call to action", strategy.cta);

    let business = &context.business;
    section(&mut user, "What we offer");
    line(&mut user, "Value proposition", &business.value_proposition);
    line(&mut user, "Differentiator", &business.differentiator);
    line(&mut user, "Target customer", &business.target_customer);
    list(&mut user, "Pain points we solve", &business.pain_points);
    list(&mut user, "Capabilities", &business.capabilities);
    list(&mut user, "Competitive edges", &business.competitive_edges);

    let segment = &context.segment;
    section(&mut user, "Target segment");
    list(&mut user, "Industries", &segment.industries);
    list(&mut user, "Roles", &segment.roles);
    list(&mut user, "Company sizes", &segment.company_sizes);
    list(&mut user, "Locations", &segment.locations);

    section(&mut user, "Recipient");
    line(&mut user, "Name", &prospect.name);
    line(&mut user, "Company", &prospect.company);
    line(&mut user, "Title", &prospect.title);

    if let Some(profile) = &context.profile {
        profile_section(&mut user, profile);
    }

    let style = &context.style;
    section(&mut user, "Style");
    line(&mut user, "Tone", describe_tone(&style.tone));
    line(&mut user, "Play", describe_play_type(&style.play_type));
    line(&mut user, "CTA style", describe_cta_style(&style.cta_style));
    line(&mut user, "CTA action", describe_cta_action(&style.cta_action));
    line(
        &mut user,
        "Additional instructions",
        &style.custom_instructions,
    );

    Prompt {
        system,
        user: user.trim_end().to_string(),
    }
}

fn profile_section(out: &mut String, profile: &Profile) {
    section(out, "Recipient profile");
    line(out, "Headline", &profile.headline);
    line(out, "Company", &profile.company_name);
    line(out, "Company size", &profile.company_size);
    line(out, "Industry", &profile.company_industry);
    line(out, "Location", &profile.location);
    line(out, "Connections", &profile.connections);
    line(out, "Followers", &profile.followers);
    line(out, "About", &profile.about);
    list(out, "Skills", &profile.skills);
}

fn section(out: &mut String, title: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "## {title}");
}

fn line(out: &mut String, label: &str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        let _ = writeln!(out, "{label}: {value}");
    }
}

fn list(out: &mut String, label: &str, values: &[String]) {
    let joined = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    line(out, label, &joined);
}
