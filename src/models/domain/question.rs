use serde::{Deserialize, Serialize};

pub const MIN_CHOICES: usize = 3;
pub const MAX_CHOICES: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Question {
    pub text: String,
    pub choices: Vec<String>,
    pub correct_index: u8,
}

impl Question {
    pub fn new(text: &str, choices: &[&str], correct_index: u8) -> Self {
        Question {
            text: text.to_string(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            correct_index,
        }
    }

    pub fn correct_choice(&self) -> Option<&str> {
        self.choices
            .get(usize::from(self.correct_index))
            .map(String::as_str)
    }

    /// Returns a description of the first problem found, if any.
    pub fn shape_error(&self) -> Option<String> {
        if self.text.trim().is_empty() {
            return Some("question text is empty".to_string());
        }
        if !(MIN_CHOICES..=MAX_CHOICES).contains(&self.choices.len()) {
            return Some(format!(
                "question '{}' has {} choices, expected {}-{}",
                self.text,
                self.choices.len(),
                MIN_CHOICES,
                MAX_CHOICES
            ));
        }
        if self.choices.iter().any(|c| c.trim().is_empty()) {
            return Some(format!("question '{}' has an empty choice", self.text));
        }
        if usize::from(self.correct_index) >= self.choices.len() {
            return Some(format!(
                "question '{}' has correct_index {} out of range",
                self.text, self.correct_index
            ));
        }
        None
    }

    pub fn is_valid(&self) -> bool {
        self.shape_error().is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionSource {
    Bank,
    Generated,
}
