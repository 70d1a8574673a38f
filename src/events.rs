//! Inbound event model.
//!
//! The host runtime delivers raw OneBot v11 events as loosely-typed JSON
//! values. This module provides two typed views over them:
//!
//! - [`GroupMessage`] - a group text message, the input of the command
//!   dispatcher
//! - [`Notice`] - a tagged variant over known notice shapes, the input of the
//!   join notifier
//!
//! Both are decoded defensively: a value that does not match a known shape
//! degrades to "not a group message" / [`Notice::Unrecognized`], never an
//! error.

use serde_json::Value;

/// A group text message received from the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMessage {
    /// Id of the group the message was sent in.
    pub group_id: String,
    /// Plain-text body of the message.
    pub text: String,
    /// The raw event, kept for logging.
    pub raw: Value,
}

impl GroupMessage {
    /// Extracts a group message from a raw event.
    ///
    /// The event must carry `post_type == "message"` and
    /// `message_type == "group"` with a group id. The text body is taken from
    /// the `message` field (string form, or the concatenated `text` segments
    /// of the array form), falling back to the `raw_message` string.
    ///
    /// # Returns
    ///
    /// * `Some(GroupMessage)` - The event is a group text message
    /// * `None` - Any other event shape
    pub fn from_event(event: &Value) -> Option<Self> {
        if event.get("post_type").and_then(Value::as_str) != Some("message")
            || event.get("message_type").and_then(Value::as_str) != Some("group")
        {
            return None;
        }

        let group_id = id_as_string(event.get("group_id")?)?;
        let text = message_text(event);

        Some(GroupMessage {
            group_id,
            text,
            raw: event.clone(),
        })
    }
}

/// A platform notice event, decoded into one of the shapes the plugin knows.
///
/// OneBot notices are pushed as untyped JSON mappings discriminated by
/// `post_type` and `notice_type`. Only the member-joined shape is of interest
/// here; everything else, including malformed mappings, decodes to
/// [`Notice::Unrecognized`].
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// A new member joined a group (`notice_type == "group_increase"`).
    GroupIncrease {
        /// Id of the group that gained a member.
        group_id: String,
        /// Id of the joining member, when the notice carries one.
        user_id: Option<i64>,
    },
    /// Any other event or a malformed notice.
    Unrecognized,
}

impl Notice {
    /// Decodes a raw event into a [`Notice`].
    ///
    /// Decoding never fails: missing or mismatched fields produce
    /// [`Notice::Unrecognized`]. A `group_increase` notice without a group id
    /// is unusable and also decodes to `Unrecognized`.
    ///
    /// Group and user ids are emitted as JSON numbers by most OneBot
    /// implementations but may also arrive as strings; both are accepted and
    /// the group id is normalized to a `String`.
    pub fn decode(event: &Value) -> Self {
        if event.get("post_type").and_then(Value::as_str) != Some("notice")
            || event.get("notice_type").and_then(Value::as_str) != Some("group_increase")
        {
            return Notice::Unrecognized;
        }

        let Some(group_id) = event.get("group_id").and_then(id_as_string) else {
            return Notice::Unrecognized;
        };

        let user_id = event.get("user_id").and_then(id_as_i64);

        Notice::GroupIncrease { group_id, user_id }
    }
}

/// Normalizes a JSON number or string id to a `String`.
fn id_as_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Reads a JSON number or numeric string id as an `i64`.
fn id_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Extracts the plain-text content of a message event.
fn message_text(event: &Value) -> String {
    match event.get("message") {
        Some(Value::String(text)) => return text.clone(),
        Some(Value::Array(segments)) => {
            return segments
                .iter()
                .filter(|segment| segment.get("type").and_then(Value::as_str) == Some("text"))
                .filter_map(|segment| segment.pointer("/data/text").and_then(Value::as_str))
                .collect();
        }
        _ => {}
    }

    event
        .get("raw_message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}
