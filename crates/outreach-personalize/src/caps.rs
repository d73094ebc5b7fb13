use outreach_core::MessageDraft;

pub const SUBJECT_MAX_CHARS: usize = 100;
pub const BODY_MAX_CHARS: usize = 1000;

const ELLIPSIS: &str = "...";

/// Truncate subject and body independently to their caps.
///
/// Lengths are counted in `char`s. Over-length text keeps the first
/// `cap - 3` characters followed by `...`, so the result is exactly `cap`
/// long.
#[must_use]
pub fn enforce_caps(draft: MessageDraft) -> MessageDraft {
    MessageDraft {
        subject: truncate_with_ellipsis(draft.subject, SUBJECT_MAX_CHARS),
        body: truncate_with_ellipsis(draft.body, BODY_MAX_CHARS),
    }
}

fn truncate_with_ellipsis(text: String, cap: usize) -> String {
    if text.chars().count() <= cap {
        return text;
    }
    let keep = cap.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
