use serde::{Deserialize, Serialize};

use crate::video::parse_count;

/// `snippet` of a top-level comment
#[derive(Debug, Default, Deserialize, Clone)]
pub struct CommentSnippet {
    #[serde(rename = "authorDisplayName")]
    pub author_display_name: Option<String>,
    #[serde(rename = "textDisplay")]
    pub text_display: Option<String>,
    #[serde(rename = "likeCount")]
    pub like_count: Option<serde_json::Value>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
}

/// Top-level comment wrapper inside a thread
#[derive(Debug, Default, Deserialize, Clone)]
pub struct TopLevelComment {
    pub snippet: Option<CommentSnippet>,
}

/// `snippet` of a commentThreads item
#[derive(Debug, Default, Deserialize, Clone)]
pub struct CommentThreadSnippet {
    #[serde(rename = "topLevelComment")]
    pub top_level_comment: Option<TopLevelComment>,
}

/// One item of a `commentThreads.list` response
#[derive(Debug, Default, Deserialize, Clone)]
pub struct CommentThread {
    pub snippet: Option<CommentThreadSnippet>,
}

/// Canonical comment record
#[derive(Debug, Serialize, Clone)]
pub struct CommentRecord {
    pub author: String,
    pub text: String,
    pub like_count: u64,
    pub published_at: String,
}

/// Normalize one comment thread into a [`CommentRecord`].
///
/// Comment like counts arrive as JSON numbers, unlike video statistics which
/// are strings; both malformed shapes default to 0.
pub fn normalize_comment(thread: &CommentThread) -> CommentRecord {
    let snippet = thread
        .snippet
        .as_ref()
        .and_then(|s| s.top_level_comment.as_ref())
        .and_then(|c| c.snippet.clone())
        .unwrap_or_default();

    let like_count = match snippet.like_count {
        Some(serde_json::Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(serde_json::Value::String(s)) => parse_count(Some(&s)),
        _ => 0,
    };

    CommentRecord {
        author: snippet.author_display_name.unwrap_or_default(),
        text: snippet.text_display.unwrap_or_default(),
        like_count,
        published_at: snippet.published_at.unwrap_or_default(),
    }
}
