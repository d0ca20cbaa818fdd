//! Output contracts from the core engine.
//!
//! Frame snapshots carry only the channels that have an active state; field
//! presence (not a sentinel) tells the renderer to apply a value. Lifecycle
//! events are emitted by the playback controller and transported by the host.

use serde::{Deserialize, Serialize};

use crate::value::Color;

/// Current values of one element at a given instant.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshotEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
}

impl FrameSnapshotEntry {
    /// True when no channel carries a value.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offset_x.is_none()
            && self.offset_y.is_none()
            && self.rotation.is_none()
            && self.scale_x.is_none()
            && self.scale_y.is_none()
            && self.opacity.is_none()
            && self.value.is_none()
            && self.color.is_none()
            && self.background_color.is_none()
    }
}

/// Playback lifecycle signals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum CoreEvent {
    Started,
    Paused { elapsed_ms: f64 },
    Resumed { elapsed_ms: f64 },
    /// `remaining` is `None` for infinite looping.
    Looped { remaining: Option<u32> },
    Completed,
    Stopped { reset: bool },
}

impl CoreEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Paused { .. } => "paused",
            Self::Resumed { .. } => "resumed",
            Self::Looped { .. } => "looped",
            Self::Completed => "completed",
            Self::Stopped { .. } => "stopped",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_channels_are_not_serialized() {
        let entry = FrameSnapshotEntry {
            id: "e1".into(),
            offset_x: Some(4.0),
            ..Default::default()
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "e1", "offset_x": 4.0 }));
    }

    #[test]
    fn event_names() {
        assert_eq!(CoreEvent::Looped { remaining: Some(1) }.name(), "looped");
        let json = serde_json::to_value(CoreEvent::Completed).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "completed" }));
    }
}
