//! Wire and result types for Kindroid inference calls

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One turn of a conversation transcript.
/// Only `username` is required; every other field, `message` included,
/// is carried through as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage
{   pub username: String
  , #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>
  , #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>
}

impl ConversationMessage
{   pub fn new(
      username: impl Into<String>
    , message: impl Into<String>
    ) -> Self
    {   ConversationMessage
        {   username: username.into()
          , message: Some(message.into())
          , extra: serde_json::Map::new()
        }
    }
}

/// Body POSTed to the inference endpoint
#[derive(Debug, Clone, Serialize)]
pub struct InferenceRequest<'a>
{   pub share_code: &'a str
  , pub conversation: &'a [ConversationMessage]
  , pub enable_filter: bool
}

/// Successful endpoint response; extra fields are ignored
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceResponse
{   pub reply: String
}

/// Outcome of an inference call that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferenceResult
{   /// Endpoint produced a reply
    Success
    {   reply: String
    }
  , /// Endpoint answered 429, try again later
    RateLimited
}

impl InferenceResult
{   pub fn is_success(&self) -> bool
    {   matches!(self, InferenceResult::Success { .. })
    }

    pub fn is_rate_limited(&self) -> bool
    {   matches!(self, InferenceResult::RateLimited)
    }

    pub fn reply(&self) -> Option<&str>
    {   match self
        {   InferenceResult::Success { reply } => Some(reply)
          , InferenceResult::RateLimited => None
        }
    }
}

/// Serializes as `{"success":true,"reply":..}` or
/// `{"success":false,"rateLimited":true}`
impl Serialize for InferenceResult
{   fn serialize<S>(&self, serializer: S)
      -> Result<S::Ok, S::Error>
    where
      S: Serializer
    {   let mut map = serializer.serialize_map(Some(2))?;
        match self
        {   InferenceResult::Success { reply } => {
              map.serialize_entry("success", &true)?;
              map.serialize_entry("reply", reply)?;
            }
          , InferenceResult::RateLimited => {
              map.serialize_entry("success", &false)?;
              map.serialize_entry("rateLimited", &true)?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests
{   use super::*;
    use serde_json::json;

    #[test]
    fn request_body_matches_wire_shape()
    {   let conversation = vec![
          ConversationMessage::new("Ann Q.", "hi")
        ];
        let request = InferenceRequest
        {   share_code: "abc123"
          , conversation: &conversation
          , enable_filter: false
        };

        assert_eq!(
          serde_json::to_value(&request).unwrap(),
          json!({
            "share_code": "abc123",
            "conversation": [{ "username": "Ann Q.", "message": "hi" }],
            "enable_filter": false
          })
        );
    }

    #[test]
    fn message_keeps_unknown_fields()
    {   let raw = json!({
          "username": "bob",
          "message": "yo",
          "timestamp": "2024-05-01T10:00:00Z"
        });
        let message: ConversationMessage
          = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(message.extra.len(), 1);
        assert_eq!(serde_json::to_value(&message).unwrap(), raw);
    }

    #[test]
    fn message_without_message_key_passes_through()
    {   let raw = json!({
          "username": "bob",
          "text": "yo",
          "attachments": []
        });
        let message: ConversationMessage
          = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(message.message, None);
        assert_eq!(message.extra.len(), 2);
        assert_eq!(serde_json::to_value(&message).unwrap(), raw);
    }

    #[test]
    fn result_serializes_to_tagged_shapes()
    {   let ok = InferenceResult::Success
        {   reply: "hello".to_string()
        };
        assert_eq!(
          serde_json::to_value(&ok).unwrap(),
          json!({ "success": true, "reply": "hello" })
        );
        assert_eq!(
          serde_json::to_value(&InferenceResult::RateLimited).unwrap(),
          json!({ "success": false, "rateLimited": true })
        );
        assert_eq!(ok.reply(), Some("hello"));
        assert!(InferenceResult::RateLimited.is_rate_limited());
    }
}
