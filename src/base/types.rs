use serde::{Deserialize, Serialize};

pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

/// One entry of the workspace roster, as loaded at connect time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub id: String,
}

/// Realtime event as delivered by the chat platform, keyed on its `type`
/// field. Event types the relay does not know about deserialize to `Other`
/// and dispatch as no-ops.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundEvent {
    Message(MessageEvent),
    #[serde(other)]
    Other,
}

/// The `message` event variant. Only the fields the relay inspects are
/// modeled; everything else on the wire is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageEvent {
    pub subtype: Option<String>,
    pub bot_id: Option<String>,
    pub channel: Option<String>,
    pub attachments: Option<Vec<Attachment>>,
}

/// One forwarded message fragment inside a bot-relayed event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Attachment {
    pub text: Option<String>,
    pub pretext: Option<String>,
}

/// A composed post, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub channel: String,
    pub text: String,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_event_deserializes_from_wire_json() {
        let event: InboundEvent = serde_json::from_value(serde_json::json!({
            "type": "message",
            "subtype": "bot_message",
            "bot_id": "B1",
            "channel": "C1",
            "ts": "1234567890.123456",
            "attachments": [{"text": "hi @sam", "pretext": "Posted by Sam Hill", "color": "36a64f"}],
        }))
        .unwrap();

        let InboundEvent::Message(message) = event else {
            panic!("expected a message event");
        };
        assert_eq!(message.subtype.as_deref(), Some("bot_message"));
        assert_eq!(message.bot_id.as_deref(), Some("B1"));
        assert_eq!(message.channel.as_deref(), Some("C1"));

        let attachments = message.attachments.unwrap();
        assert_eq!(attachments.len(), 1);
        assert_eq!(attachments[0].text.as_deref(), Some("hi @sam"));
        assert_eq!(attachments[0].pretext.as_deref(), Some("Posted by Sam Hill"));
    }

    #[test]
    fn unknown_event_type_deserializes_to_other() {
        let event: InboundEvent = serde_json::from_value(serde_json::json!({
            "type": "reaction_added",
            "reaction": "thumbsup",
        }))
        .unwrap();

        assert!(matches!(event, InboundEvent::Other));
    }

    #[test]
    fn bare_message_event_deserializes_with_empty_fields() {
        let event: InboundEvent = serde_json::from_value(serde_json::json!({
            "type": "message",
            "channel": "C1",
            "text": "a plain user message",
        }))
        .unwrap();

        let InboundEvent::Message(message) = event else {
            panic!("expected a message event");
        };
        assert!(message.subtype.is_none());
        assert!(message.bot_id.is_none());
        assert!(message.attachments.is_none());
    }
}
