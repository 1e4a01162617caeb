use serde::{Deserialize, Serialize};

use crate::domain::email::Email;

/// Separator placed between the per-email blocks of a prompt.
pub const BLOCK_DELIMITER: &str = "\n\n---\n";

/// Instruction flavour sent ahead of the email blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptStyle {
    /// Five prioritized bullets per email with `[DUE: MM/DD]` tags.
    #[default]
    Prioritized,
    /// A plain five-bullet summary per email.
    Plain,
}

const PRIORITIZED_INSTRUCTIONS: &str = "\
Analyze these emails and extract the most critical information following these rules:

1. Create exactly 5 bullet points per email (new line for each email)
2. Format strictly without ** or any markdown symbols
3. Prioritize in this order:
   - Deadlines/dates (highlight with [DUE: MM/DD])
   - Decisions made or required
   - Action items with owners
   - Risks/blockers needing attention
   - Key insights or trends

4. For each email, structure like this:
[Email 1]
- Point 1 (include deadline first if exists)
- Point 2 (action item)
- Point 3 (key decision)
- Point 4 (risk/opportunity)
- Point 5 (strategic insight)

[Email 2]
- ...

5. Omit:
   - Greetings/closings
   - Repeated information
   - Non-essential details";

const PLAIN_INSTRUCTIONS: &str = "\
Summarize each of these emails in exactly 5 short bullet points.
Label each summary [Email 1], [Email 2], ... in the order given.
Do not use markdown formatting.";

impl PromptStyle {
    pub fn instructions(self) -> &'static str {
        match self {
            PromptStyle::Prioritized => PRIORITIZED_INSTRUCTIONS,
            PromptStyle::Plain => PLAIN_INSTRUCTIONS,
        }
    }
}

/// `Subject: <subject>\n<body>`; the snippet stands in for a missing body.
pub fn email_block(email: &Email) -> String {
    let body = email.body_text.as_deref().unwrap_or(&email.snippet);
    format!("Subject: {}\n{}", email.summary_subject(), body)
}

/// Assemble the full prompt for the given (already truncated) emails.
pub fn build_prompt(style: PromptStyle, emails: &[Email]) -> String {
    let blocks: Vec<String> = emails.iter().map(email_block).collect();
    format!(
        "{}\n\nEmails:\n{}",
        style.instructions(),
        blocks.join(BLOCK_DELIMITER)
    )
}

/// Number of email blocks in a prompt produced by [`build_prompt`].
#[cfg(test)]
pub(crate) fn count_blocks(prompt: &str) -> usize {
    match prompt.split_once("\n\nEmails:\n") {
        Some((_, blocks)) if blocks.starts_with("Subject: ") => {
            1 + blocks.matches(&format!("{BLOCK_DELIMITER}Subject: ")).count()
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::email::Header;

    fn email(id: &str, subject: Option<&str>, body: Option<&str>) -> Email {
        Email {
            id: id.into(),
            snippet: format!("snippet {id}"),
            headers: subject
                .map(|s| vec![Header::new("Subject", s)])
                .unwrap_or_default(),
            internal_date: None,
            body_text: body.map(str::to_string),
        }
    }

    #[test]
    fn block_uses_subject_and_body() {
        let e = email("1", Some("Launch"), Some("Ship on Friday"));
        assert_eq!(email_block(&e), "Subject: Launch\nShip on Friday");
    }

    #[test]
    fn block_falls_back_to_placeholder_and_snippet() {
        let e = email("2", None, None);
        assert_eq!(email_block(&e), "Subject: No Subject\nsnippet 2");
    }

    #[test]
    fn prompt_is_deterministic_and_delimited() {
        let emails = vec![
            email("1", Some("A"), Some("x")),
            email("2", Some("B"), Some("y")),
        ];
        let p1 = build_prompt(PromptStyle::Prioritized, &emails);
        let p2 = build_prompt(PromptStyle::Prioritized, &emails);
        assert_eq!(p1, p2);
        assert!(p1.starts_with("Analyze these emails"));
        assert!(p1.contains("[DUE: MM/DD]"));
        assert!(p1.ends_with("Subject: A\nx\n\n---\nSubject: B\ny"));
        assert_eq!(count_blocks(&p1), 2);
    }

    #[test]
    fn delimiter_inside_a_body_is_not_a_new_block() {
        let emails = vec![
            email("1", Some("A"), Some("Thanks\n\n---\nSent from my phone")),
            email("2", Some("B"), Some("y")),
        ];
        let p = build_prompt(PromptStyle::Prioritized, &emails);
        assert_eq!(count_blocks(&p), 2);
        assert_eq!(count_blocks(&build_prompt(PromptStyle::Plain, &[])), 0);
    }

    #[test]
    fn plain_style_only_changes_instructions() {
        let emails = vec![email("1", Some("A"), Some("x"))];
        let p = build_prompt(PromptStyle::Plain, &emails);
        assert!(!p.contains("[DUE: MM/DD]"));
        assert!(p.ends_with("Emails:\nSubject: A\nx"));
    }

    #[test]
    fn style_parses_from_config_strings() {
        #[derive(Deserialize)]
        struct Wrap {
            style: PromptStyle,
        }
        let w: Wrap = toml::from_str("style = \"plain\"").unwrap();
        assert_eq!(w.style, PromptStyle::Plain);
    }
}
