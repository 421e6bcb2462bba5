use crate::error::{AppError, Result};
use derive_more::Display;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Readers the post is written for. Labels are shown verbatim in the form and
/// substituted verbatim into the prompt.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Audience {
    #[default]
    #[display("Researchers")]
    Researchers,
    #[display("Data Scientist")]
    DataScientist,
    #[display("Common People")]
    CommonPeople,
    #[display("Professionals")]
    Professionals,
}

impl Audience {
    pub const ALL: [Audience; 4] = [
        Audience::Researchers,
        Audience::DataScientist,
        Audience::CommonPeople,
        Audience::Professionals,
    ];

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Audience {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Audience::ALL
            .into_iter()
            .find(|a| a.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                AppError::validation(
                    "audience",
                    t!("validation.unknown_audience", audience = wanted).to_string(),
                )
            })
    }
}

impl Serialize for Audience {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for Audience {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

/// A validated generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogRequest {
    pub topic: String,
    #[serde(default)]
    pub audience: Audience,
    pub word_count: usize,
}

impl BlogRequest {
    pub fn validate(&self) -> Result<()> {
        if self.topic.trim().is_empty() {
            return Err(AppError::validation("topic", t!("validation.topic_required").to_string()));
        }
        if self.word_count == 0 {
            return Err(AppError::validation(
                "word_count",
                t!("validation.word_count_positive").to_string(),
            ));
        }
        Ok(())
    }
}

/// Raw values as submitted by the page form. Every field is text so that a
/// blank or malformed entry can be reported instead of rejected by the extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogForm {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub word_count: String,
    #[serde(default)]
    pub audience: String,
}

impl BlogForm {
    /// True when either required field was left empty.
    pub fn is_incomplete(&self) -> bool {
        self.topic.trim().is_empty() || self.word_count.trim().is_empty()
    }

    pub fn validate(&self) -> Result<BlogRequest> {
        if self.is_incomplete() {
            return Err(AppError::validation("form", t!("form.missing_fields").to_string()));
        }

        let word_count = self
            .word_count
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                AppError::validation("word_count", t!("validation.word_count_positive").to_string())
            })?;

        let audience = if self.audience.trim().is_empty() {
            Audience::default()
        } else {
            self.audience.parse()?
        };

        Ok(BlogRequest { topic: self.topic.trim().to_string(), audience, word_count })
    }
}

/// Post-processed model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedBlog {
    pub content: String,
    /// Words in the stripped output before truncation.
    pub word_count: usize,
}
