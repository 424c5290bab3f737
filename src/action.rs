use serde::{Deserialize, Serialize};

/// What the dashboard shows the user after a mutation succeeds.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ActionMessage {
    pub kind: MessageKind,
    pub text: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Info,
}

impl ActionMessage {
    pub fn success(text: impl Into<String>) -> ActionMessage {
        ActionMessage {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> ActionMessage {
        ActionMessage {
            kind: MessageKind::Info,
            text: text.into(),
        }
    }
}

/// A mutated record along with the message to surface for it.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome<R> {
    pub record: R,
    pub message: ActionMessage,
}
