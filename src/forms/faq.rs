use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}

fn trimmed_non_empty(field: &str, value: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    Ok(value.to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct FaqForm {
    #[validate(max_length = 500)]
    pub question: String,
    #[validate(max_length = 10000)]
    pub answer: String,
    #[serde(default)]
    pub category: models::FaqCategory,
    #[serde(default)]
    #[validate(max_items = 20)]
    pub tags: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub priority: i32,
}

fn default_active() -> bool {
    true
}

impl TryFrom<FaqForm> for models::Faq {
    type Error = String;

    fn try_from(form: FaqForm) -> Result<Self, Self::Error> {
        let question = trimmed_non_empty("question", &form.question)?;
        let answer = trimmed_non_empty("answer", &form.answer)?;

        let mut faq = models::Faq::new(question, answer);
        faq.category = form.category;
        faq.tags = normalize_tags(form.tags);
        faq.is_active = form.is_active;
        faq.priority = form.priority;

        Ok(faq)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct FaqPatch {
    #[validate(max_length = 500)]
    pub question: Option<String>,
    #[validate(max_length = 10000)]
    pub answer: Option<String>,
    pub category: Option<models::FaqCategory>,
    #[validate(max_items = 20)]
    pub tags: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub priority: Option<i32>,
}

impl FaqPatch {
    pub fn apply(self, faq: &mut models::Faq) -> Result<(), String> {
        if let Some(question) = self.question {
            faq.question = trimmed_non_empty("question", &question)?;
        }
        if let Some(answer) = self.answer {
            faq.answer = trimmed_non_empty("answer", &answer)?;
        }
        if let Some(category) = self.category {
            faq.category = category;
        }
        if let Some(tags) = self.tags {
            faq.tags = normalize_tags(tags);
        }
        if let Some(is_active) = self.is_active {
            faq.is_active = is_active;
        }
        if let Some(priority) = self.priority {
            faq.priority = priority;
        }

        Ok(())
    }
}
