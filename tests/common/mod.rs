//! Helpers shared by the HTTP-level tests.

/// Number of `Subject:` blocks in a digest prompt.
pub fn count_blocks(prompt: &str) -> usize {
    match prompt.split_once("\n\nEmails:\n") {
        Some((_, blocks)) if blocks.starts_with("Subject: ") => {
            1 + blocks.matches("\n\n---\nSubject: ").count()
        }
        _ => 0,
    }
}
