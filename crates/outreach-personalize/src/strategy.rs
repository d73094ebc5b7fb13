//! Static domain knowledge folded into every prompt: one strategy per
//! campaign intent, plus human-readable expansions of the four style settings.
//!
//! Style values arrive as free strings from the UI layer. Matching ignores
//! case and treats `-`, `_` and spaces alike; anything unrecognized maps to
//! the table's fallback entry.

use outreach_core::CampaignIntent;

/// How a message for a given intent should read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentStrategy {
    pub focus: &'static str,
    pub approach: &'static str,
    pub urgency: &'static str,
    pub cta: &'static str,
}

#[must_use]
pub fn intent_strategy(intent: CampaignIntent) -> IntentStrategy {
    match intent {
        CampaignIntent::DemoCalls => IntentStrategy {
            focus: "showing the product solving the prospect's specific problem",
            approach: "lead with a concrete outcome, then offer a short walkthrough",
            urgency: "moderate: tie the demo to a current priority of their team",
            cta: "invite them to a 15-minute product demo",
        },
        CampaignIntent::SalesCalls => IntentStrategy {
            focus: "business impact and return on investment",
            approach: "name a pain point their role typically owns and quantify the fix",
            urgency: "moderate to high: reference cost of inaction",
            cta: "ask for a brief call to discuss fit and pricing",
        },
        CampaignIntent::Partnerships => IntentStrategy {
            focus: "mutual benefit and complementary strengths",
            approach: "show why the two companies serve overlapping customers",
            urgency: "low: emphasize long-term value over speed",
            cta: "propose an exploratory conversation about working together",
        },
        CampaignIntent::InvestorCalls => IntentStrategy {
            focus: "traction, market size, and why now",
            approach: "open with one headline metric and connect it to their thesis",
            urgency: "moderate: mention the current round timing without pressure",
            cta: "request a short intro call to share the deck",
        },
        CampaignIntent::PotentialHires => IntentStrategy {
            focus: "the role's impact and the team they would join",
            approach: "reference something specific from their background that fits the role",
            urgency: "low: respect that they may not be actively looking",
            cta: "offer an informal chat about the opportunity",
        },
    }
}

#[must_use]
pub fn describe_tone(tone: &str) -> &'static str {
    match normalize_key(tone).as_str() {
        "professional" => "Professional: polished, confident, and respectful of their time.",
        "friendly" => "Friendly: warm and approachable while staying businesslike.",
        "casual" => "Casual: relaxed, conversational, short sentences, no jargon.",
        "formal" => "Formal: courteous and precise, no slang or contractions.",
        "enthusiastic" => "Enthusiastic: energetic and positive without exaggeration.",
        "direct" => "Direct: plain and to the point, no filler.",
        _ => "Professional and courteous.",
    }
}

#[must_use]
pub fn describe_play_type(play_type: &str) -> &'static str {
    match normalize_key(play_type).as_str() {
        "direct" => "Direct ask: state the offer and the ask up front.",
        "consultative" => {
            "Consultative: open with an observation about their situation and offer perspective."
        }
        "storytelling" => "Storytelling: a two-sentence story of a similar customer's result.",
        "problem solution" => "Problem-solution: name one pain point, then the fix.",
        "social proof" => "Social proof: reference peers or customers like them.",
        "value first" => "Value first: give one useful insight before any ask.",
        _ => "Balanced: brief context, clear value, simple ask.",
    }
}

#[must_use]
pub fn describe_cta_style(cta_style: &str) -> &'static str {
    match normalize_key(cta_style).as_str() {
        "soft" => "Soft: low-pressure, easy to say yes to.",
        "direct" => "Direct: a specific, time-bound ask.",
        "question" => "Question: end with an open question that invites a reply.",
        "value driven" => "Value-driven: frame the ask around what they gain.",
        _ => "Clear and polite.",
    }
}

#[must_use]
pub fn describe_cta_action(cta_action: &str) -> &'static str {
    match normalize_key(cta_action).as_str() {
        "book call" => "Book a short call.",
        "reply" => "Reply to this email.",
        "schedule demo" | "demo" => "Schedule a product demo.",
        "visit website" => "Visit the website to learn more.",
        "connect" => "Connect on LinkedIn.",
        "intro" | "referral" => "Point us to the right person on their team.",
        _ => "Respond with interest.",
    }
}

fn normalize_key(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(['-', '_', ' '])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_intent_has_a_complete_strategy() {
        for intent in CampaignIntent::ALL {
            let s = intent_strategy(intent);
            assert!(!s.focus.is_empty(), "{intent} focus");
            assert!(!s.approach.is_empty(), "{intent} approach");
            assert!(!s.urgency.is_empty(), "{intent} urgency");
            assert!(!s.cta.is_empty(), "{intent} cta");
        }
    }

    #[test]
    fn style_keys_ignore_case_and_separators() {
        assert_eq!(describe_play_type("Problem-Solution"), describe_play_type("problem_solution"));
        assert_eq!(describe_cta_action("BOOK_CALL"), "Book a short call.");
        assert_eq!(describe_tone("  Friendly "), describe_tone("friendly"));
    }

    #[test]
    fn unknown_values_use_fallbacks() {
        assert_eq!(describe_tone("sarcastic"), "Professional and courteous.");
        assert_eq!(
            describe_play_type(""),
            "Balanced: brief context, clear value, simple ask."
        );
        assert_eq!(describe_cta_style("???"), "Clear and polite.");
        assert_eq!(describe_cta_action("fax us"), "Respond with interest.");
    }
}
