/// Type definitions for the Open WebUI chat export format, plus document
/// loading and normalization.
///
/// The export is a single JSON document, either a top-level array of
/// conversation objects or one conversation object on its own. A conversation
/// looks roughly like:
///
/// ```json
/// {
///   "title": "fallback title",
///   "chat": {
///     "title": "preferred title",
///     "messages": [ { "role": "user", "content": "...", "timestamp": 1700000000 } ],
///     "history": {
///       "messages": { "<id>": { "role": "assistant", "content": "..." } }
///     }
///   }
/// }
/// ```
///
/// Nothing about the schema is guaranteed: every field is optional, `content`
/// can be any JSON value, and `history.messages` is keyed by opaque ids whose
/// map order is not necessarily chronological. The types below default every
/// field so that partial conversations still decode.
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::ExportError;

/// One exported chat session.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Conversation {
    /// Top-level title, used only when `chat.title` is absent or empty.
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub chat: Option<Chat>,
}

/// The nested chat payload of a conversation.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Chat {
    #[serde(default)]
    pub title: Option<Value>,
    /// Ordered message list. Present in newer exports.
    #[serde(default)]
    pub messages: Option<Vec<Message>>,
    /// Message graph keyed by message id. Present in older exports, sometimes
    /// alongside `messages` (duplicates are kept, matching the export's own
    /// redundancy).
    #[serde(default)]
    pub history: Option<History>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct History {
    #[serde(default)]
    pub messages: Option<serde_json::Map<String, Value>>,
}

/// One turn in a conversation.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Message {
    /// Message body. Usually a string, but any JSON value is rendered via its
    /// string form.
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub role: Option<String>,
    /// Seconds or milliseconds since epoch; disambiguated at render time.
    #[serde(default)]
    pub timestamp: Option<Value>,
}

impl Conversation {
    /// Resolve the display title: non-empty `chat.title`, else non-empty
    /// top-level `title`, else `"Untitled"`.
    pub fn resolve_title(&self) -> String {
        self.chat
            .as_ref()
            .and_then(|c| value_to_title(c.title.as_ref()))
            .or_else(|| value_to_title(self.title.as_ref()))
            .unwrap_or_else(|| "Untitled".to_string())
    }

    /// Collect every message in export order: `chat.messages` first, then the
    /// values of `chat.history.messages` in map iteration order.
    ///
    /// Fails if a history entry is not a message-shaped object; that marks the
    /// whole conversation as unconvertible, it does not abort the batch.
    pub fn collect_messages(&self) -> Result<Vec<Message>, serde_json::Error> {
        let mut messages = Vec::new();
        let Some(chat) = &self.chat else {
            return Ok(messages);
        };
        if let Some(listed) = &chat.messages {
            messages.extend(listed.iter().cloned());
        }
        if let Some(history) = &chat.history
            && let Some(map) = &history.messages
        {
            for value in map.values() {
                messages.push(serde_json::from_value(value.clone())?);
            }
        }
        Ok(messages)
    }
}

/// Coerce a JSON value into a usable title. Null and empty strings count as
/// absent; non-string values fall back to their JSON text.
fn value_to_title(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Read and parse the export document.
///
/// An unreadable file and malformed JSON are distinct failures so the shell
/// can surface parser details for the latter. Either aborts the run.
pub fn load_document(path: &Path) -> Result<Value, ExportError> {
    let raw = fs::read_to_string(path).map_err(|source| ExportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ExportError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}

/// Split the document into an ordered list of conversation values.
///
/// A top-level array is a sequence of conversations; anything else is treated
/// as a single conversation on its own.
pub fn normalize_document(document: Value) -> Vec<Value> {
    match document {
        Value::Array(items) => items,
        other => vec![other],
    }
}
