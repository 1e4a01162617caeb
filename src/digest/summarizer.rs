use std::sync::Arc;

use log::{debug, error};

use crate::digest::TextGenerator;
use crate::digest::prompt::{PromptStyle, build_prompt};
use crate::domain::email::Email;
use crate::error::InboxError;

/// Most emails folded into a single digest prompt.
pub const MAX_SUMMARY_EMAILS: usize = 10;

pub struct Summarizer {
    generator: Arc<dyn TextGenerator>,
    style: PromptStyle,
}

impl Summarizer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self::with_style(generator, PromptStyle::default())
    }

    pub fn with_style(generator: Arc<dyn TextGenerator>, style: PromptStyle) -> Self {
        Self { generator, style }
    }

    /// Summarize the first [`MAX_SUMMARY_EMAILS`] emails with one generative
    /// call and return its text untouched. An empty input returns an empty
    /// string without calling out.
    pub async fn summarize(&self, emails: &[Email]) -> Result<String, InboxError> {
        let batch = &emails[..emails.len().min(MAX_SUMMARY_EMAILS)];
        if batch.is_empty() {
            return Ok(String::new());
        }

        let prompt = build_prompt(self.style, batch);
        debug!(
            "summarizing {} of {} emails ({} prompt bytes)",
            batch.len(),
            emails.len(),
            prompt.len()
        );

        self.generator.generate(&prompt).await.map_err(|e| {
            error!("generative call failed: {e}");
            InboxError::SummarizationFailed(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::digest::prompt::count_blocks;
    use crate::error::ProviderError;

    #[derive(Default)]
    struct RecordingGenerator {
        prompts: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail {
                return Err(ProviderError::Status {
                    status: 503,
                    body: "overloaded".into(),
                });
            }
            Ok("[Email 1]\n- something".into())
        }
    }

    fn emails(n: usize) -> Vec<Email> {
        (0..n)
            .map(|i| Email {
                id: format!("m{i}"),
                body_text: Some(format!("body {i}")),
                ..Default::default()
            })
            .collect()
    }

    #[tokio::test]
    async fn twelve_emails_are_cut_to_ten_in_one_call() {
        let generator = Arc::new(RecordingGenerator::default());
        let summarizer = Summarizer::new(generator.clone());

        let out = summarizer.summarize(&emails(12)).await.unwrap();
        assert!(!out.is_empty());

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(count_blocks(&prompts[0]), MAX_SUMMARY_EMAILS);
        assert!(prompts[0].contains("body 9"));
        assert!(!prompts[0].contains("body 10"));
    }

    #[tokio::test]
    async fn empty_input_makes_no_call() {
        let generator = Arc::new(RecordingGenerator::default());
        let summarizer = Summarizer::new(generator.clone());

        let out = summarizer.summarize(&[]).await.unwrap();
        assert_eq!(out, "");
        assert!(generator.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn generator_error_is_a_summarization_failure() {
        let generator = Arc::new(RecordingGenerator {
            fail: true,
            ..Default::default()
        });
        let summarizer = Summarizer::new(generator);

        let err = summarizer.summarize(&emails(2)).await.unwrap_err();
        assert!(matches!(err, InboxError::SummarizationFailed(_)));
    }
}
