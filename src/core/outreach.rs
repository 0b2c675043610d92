use std::sync::Arc;
use std::time::Duration;

use crate::models::{Candidate, SenderIdentity};
use crate::services::generator::{GenerateError, TextGenerator};

/// Drafts a short collaboration pitch per matched candidate
///
/// The generative path is best-effort. Any failure, timeout or blank reply
/// degrades to a fixed template, so `draft` always returns a non-empty message.
#[derive(Clone)]
pub struct OutreachDrafter {
    generator: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
}

impl OutreachDrafter {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    /// Drafter that always uses the template
    pub fn template_only() -> Self {
        Self::new(None, Duration::from_secs(0))
    }

    pub fn generation_enabled(&self) -> bool {
        self.generator.is_some()
    }

    pub async fn draft(&self, brief: &str, candidate: &Candidate, sender: &SenderIdentity) -> String {
        if let Some(generator) = &self.generator {
            let prompt = build_prompt(brief, candidate, sender);

            match self.generate_with_timeout(generator.as_ref(), &prompt).await {
                Ok(text) => return text,
                Err(e) => {
                    tracing::warn!(
                        "Outreach generation failed for {}, using template: {}",
                        candidate.name,
                        e
                    );
                }
            }
        }

        fallback_message(candidate, sender)
    }

    async fn generate_with_timeout(
        &self,
        generator: &dyn TextGenerator,
        prompt: &str,
    ) -> Result<String, GenerateError> {
        let text = tokio::time::timeout(self.timeout, generator.generate(prompt))
            .await
            .map_err(|_| GenerateError::Timeout(self.timeout))??;

        let text = text.trim();
        if text.is_empty() {
            return Err(GenerateError::EmptyContent);
        }
        Ok(text.to_string())
    }
}

/// Prompt for the generative capability
pub fn build_prompt(brief: &str, candidate: &Candidate, sender: &SenderIdentity) -> String {
    format!(
        "Write a short promotional outreach email (<120 words), warm and professional.\n\
         Use the brand brief, mention platform & category, and end with a clear CTA.\n\
         The email should be from {sender_name} representing {sender_company}.\n\
         \n\
         Brief: {brief}\n\
         \n\
         Sender:\n\
         Name: {sender_name}\n\
         Company: {sender_company}\n\
         \n\
         Influencer:\n\
         Name: {name}\n\
         Email: {contact}\n\
         Platform: {platform}\n\
         Followers: {followers}\n\
         Country: {country} (Continent: {continent})\n\
         Category: {category}\n\
         Hashtags: {tags}\n",
        sender_name = sender.name,
        sender_company = sender.company,
        brief = brief,
        name = candidate.name,
        contact = candidate.contact,
        platform = candidate.platform,
        followers = candidate.audience_size,
        country = candidate.region,
        continent = candidate.group_region,
        category = candidate.category,
        tags = candidate.tags,
    )
}

/// Deterministic message used whenever generation is unavailable
pub fn fallback_message(candidate: &Candidate, sender: &SenderIdentity) -> String {
    let greeting = if candidate.name.trim().is_empty() {
        "there"
    } else {
        candidate.name.as_str()
    };

    format!(
        "Hi {greeting},\n\n\
         I'm {sender_name} from {sender_company}. We love your {category} content on {platform} \
         and think you'd be a great fit for our upcoming campaign.\n\n\
         Can we share the brief and timelines?\n\n\
         Best regards,\n{sender_name}\n{sender_company}",
        greeting = greeting,
        sender_name = sender.name,
        sender_company = sender.company,
        category = candidate.category,
        platform = candidate.platform,
    )
}
