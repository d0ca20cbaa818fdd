//! Animated elements: addressable entities with per-channel motion state.

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;
use crate::layout::LayoutFrame;
use crate::outputs::FrameSnapshotEntry;
use crate::state::{ColorState, InterpolatedState, Timing};
use crate::time::Timestamp;
use crate::value::{Channel, Color, ColorChannel};

/// Host declaration of an element: its id and initial static values.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ElementDecl {
    pub id: String,
    #[serde(default)]
    pub initial: Vec<(Channel, f64)>,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub background_color: Option<Color>,
    /// Per-element override of the layout's duration and easing.
    #[serde(default)]
    pub timing: Option<Timing>,
}

impl ElementDecl {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with(mut self, channel: Channel, value: f64) -> Self {
        self.initial.push((channel, value));
        self
    }

    pub fn with_color(mut self, channel: ColorChannel, color: Color) -> Self {
        match channel {
            ColorChannel::Color => self.color = Some(color),
            ColorChannel::BackgroundColor => self.background_color = Some(color),
        }
        self
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = Some(timing);
        self
    }
}

#[inline]
fn color_slot(channel: ColorChannel) -> usize {
    match channel {
        ColorChannel::Color => 0,
        ColorChannel::BackgroundColor => 1,
    }
}

/// An element's channels. A channel without a state renders at its static
/// value and is left out of frame snapshots.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimatedElement {
    id: String,
    statics: [f64; Channel::COUNT],
    states: [Option<InterpolatedState>; Channel::COUNT],
    static_colors: [Option<Color>; 2],
    color_states: [Option<ColorState>; 2],
    timing: Option<Timing>,
    /// Channels written by the current layout application, numeric then color.
    written: [bool; Channel::COUNT + 2],
}

impl AnimatedElement {
    pub fn new(id: impl Into<String>) -> Self {
        let mut statics = [0.0; Channel::COUNT];
        for ch in Channel::ALL {
            statics[ch.index()] = ch.identity();
        }
        Self {
            id: id.into(),
            statics,
            states: [None; Channel::COUNT],
            static_colors: [None; 2],
            color_states: [None; 2],
            timing: None,
            written: [false; Channel::COUNT + 2],
        }
    }

    pub fn from_decl(decl: ElementDecl) -> Result<Self, AnimationError> {
        let mut el = Self::new(decl.id);
        for (ch, v) in decl.initial {
            el.set_static(ch, v)?;
        }
        el.static_colors = [decl.color, decl.background_color];
        el.timing = decl.timing;
        Ok(el)
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn timing(&self) -> Option<Timing> {
        self.timing
    }

    pub fn set_timing(&mut self, timing: Option<Timing>) {
        self.timing = timing;
    }

    #[inline]
    pub fn state(&self, channel: Channel) -> Option<&InterpolatedState> {
        self.states[channel.index()].as_ref()
    }

    #[inline]
    pub fn color_state(&self, channel: ColorChannel) -> Option<&ColorState> {
        self.color_states[color_slot(channel)].as_ref()
    }

    /// Replace (not merge) the state of a channel.
    pub fn set_state(&mut self, channel: Channel, state: Option<InterpolatedState>) {
        self.states[channel.index()] = state;
    }

    pub fn set_color_state(&mut self, channel: ColorChannel, state: Option<ColorState>) {
        self.color_states[color_slot(channel)] = state;
    }

    #[inline]
    pub fn static_value(&self, channel: Channel) -> f64 {
        self.statics[channel.index()]
    }

    /// Set the resting value of a channel and drop any motion on it.
    pub fn set_static(&mut self, channel: Channel, value: f64) -> Result<(), AnimationError> {
        if !value.is_finite() {
            return Err(AnimationError::invalid(format!(
                "{} must be finite, got {value}",
                channel.name()
            )));
        }
        self.statics[channel.index()] = value;
        self.states[channel.index()] = None;
        self.written[channel.index()] = false;
        Ok(())
    }

    pub fn set_static_color(&mut self, channel: ColorChannel, color: Option<Color>) {
        self.static_colors[color_slot(channel)] = color;
        self.color_states[color_slot(channel)] = None;
    }

    /// Rendered value of a channel at `now`.
    #[inline]
    pub fn current_value(&self, channel: Channel, now: Timestamp) -> f64 {
        match &self.states[channel.index()] {
            Some(s) => s.current_value(now),
            None => self.statics[channel.index()],
        }
    }

    pub fn current_color(&self, channel: ColorChannel, now: Timestamp) -> Option<Color> {
        let slot = color_slot(channel);
        match &self.color_states[slot] {
            Some(s) => Some(s.current_value(now)),
            None => self.static_colors[slot],
        }
    }

    /// Start a motion on `channel` from its currently rendered value towards
    /// `target`, timed by the element override or the layout frame.
    pub fn animate_to(
        &mut self,
        channel: Channel,
        target: f64,
        frame: &LayoutFrame,
    ) -> Result<(), AnimationError> {
        let timing = frame.timing_for(self.timing);
        let start = self.current_value(channel, frame.now);
        let state = InterpolatedState::new(start, target, frame.now, timing)?;
        self.states[channel.index()] = Some(state);
        self.written[channel.index()] = true;
        Ok(())
    }

    /// Swap a color channel to `color` at the frame time.
    pub fn swap_color(&mut self, channel: ColorChannel, color: Color, frame: &LayoutFrame) {
        let from = self.current_color(channel, frame.now).unwrap_or(color);
        let slot = color_slot(channel);
        self.color_states[slot] = Some(ColorState::swap(from, color, frame.now));
        self.written[Channel::COUNT + slot] = true;
    }

    /// Forget which channels the previous layout application wrote.
    pub(crate) fn begin_application(&mut self) {
        self.written = [false; Channel::COUNT + 2];
    }

    /// True when the current layout application wrote `channel`.
    #[inline]
    pub fn is_written(&self, channel: Channel) -> bool {
        self.written[channel.index()]
    }

    /// Restart at `now` the motions written by the current layout
    /// application. Channels left alone by it keep their timeline.
    pub fn rebase(&mut self, now: Timestamp) {
        for (i, s) in self.states.iter_mut().enumerate() {
            if let (true, Some(s)) = (self.written[i], s.as_mut()) {
                s.rebase(now);
            }
        }
        for (slot, s) in self.color_states.iter_mut().enumerate() {
            if let (true, Some(s)) = (self.written[Channel::COUNT + slot], s.as_mut()) {
                s.rebase(now);
            }
        }
    }

    pub fn has_active_states(&self) -> bool {
        self.states.iter().any(Option::is_some) || self.color_states.iter().any(Option::is_some)
    }

    /// Sparse snapshot: only channels with an active state are present.
    pub fn snapshot(&self, now: Timestamp) -> FrameSnapshotEntry {
        let v = |ch: Channel| self.states[ch.index()].map(|s| s.current_value(now));
        FrameSnapshotEntry {
            id: self.id.clone(),
            offset_x: v(Channel::OffsetX),
            offset_y: v(Channel::OffsetY),
            rotation: v(Channel::Rotation),
            scale_x: v(Channel::ScaleX),
            scale_y: v(Channel::ScaleY),
            opacity: v(Channel::Opacity),
            value: v(Channel::Value),
            color: self.color_states[0].map(|s| s.current_value(now)),
            background_color: self.color_states[1].map(|s| s.current_value(now)),
        }
    }
}
