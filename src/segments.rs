//! Outbound message model.
//!
//! A bot response is an ordered sequence of [`Segment`] values addressed to a
//! group. Segments serialize to the OneBot v11 array format, so an
//! [`OutboundMessage`] can be dropped straight into a `send_group_msg` action:
//!
//! ```json
//! [
//!   { "type": "at", "data": { "qq": "12345" } },
//!   { "type": "text", "data": { "text": " " } },
//!   { "type": "text", "data": { "text": "欢迎新成员加入！" } }
//! ]
//! ```

use serde::Serialize;

/// A single fragment of an outbound message. Order within a message matters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Segment {
    /// Plain text.
    Text {
        /// The text content.
        text: String,
    },
    /// An @-mention of a group member.
    At {
        /// Target user id. OneBot expects the `qq` field as a string.
        #[serde(rename = "qq", with = "id_string")]
        user_id: i64,
    },
}

impl Segment {
    /// Creates a plain-text segment.
    pub fn text(text: impl Into<String>) -> Self {
        Segment::Text { text: text.into() }
    }

    /// Creates a mention segment for the given user id.
    pub fn at(user_id: i64) -> Self {
        Segment::At { user_id }
    }
}

/// An ordered segment sequence addressed to a single group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundMessage {
    /// Id of the group to deliver the message to.
    pub group_id: String,
    /// The message content, in delivery order.
    pub segments: Vec<Segment>,
}

impl OutboundMessage {
    /// Creates a message with a single plain-text segment.
    pub fn plain(group_id: impl Into<String>, text: impl Into<String>) -> Self {
        OutboundMessage {
            group_id: group_id.into(),
            segments: vec![Segment::text(text)],
        }
    }
}

/// Serializes numeric ids as strings, as the OneBot wire format requires.
mod id_string {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(id: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&id.to_string())
    }
}
