//! Caption show/hide notifications for the render layer.

use bevy_ecs::message::Message;
use serde::Serialize;

#[derive(Message, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CaptionMessage {
    Shown { index: usize, text: String },
    Hidden { index: usize },
}

impl CaptionMessage {
    pub fn index(&self) -> usize {
        match self {
            CaptionMessage::Shown { index, .. } | CaptionMessage::Hidden { index } => *index,
        }
    }
}
