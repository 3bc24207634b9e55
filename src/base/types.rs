use serde::{Deserialize, Serialize};

pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

/// Change category carried by a review-request event.
///
/// Controls the framing of the outbound notification. Events without a
/// category get the default (feature-like) framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Feature,
    Release,
    Hotfix,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Feature => "feature",
            Category::Release => "release",
            Category::Hotfix => "hotfix",
        }
    }
}

/// A validated review-assignment event.
///
/// Only exists past the shape validator; all fields are known to be
/// correctly typed. `reviewers` keeps the wire order and may contain
/// duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequestEvent {
    pub reviewers: Vec<String>,
    pub repository: String,
    pub pr_id: i64,
    pub pr_url: String,
    pub pr_title: String,
    pub category: Option<Category>,
}

/// A single attachment in a structured chat notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub color: String,
    pub title: String,
    pub text: String,
}

/// Payload posted to the chat webhook. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatNotification {
    /// Legacy single-text form, used when the event carries no category.
    Text { text: String },
    /// Categorized form with color-coded framing.
    Attachments { attachments: Vec<Attachment> },
}
