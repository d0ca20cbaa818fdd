//! Choreo Animation Core (host-agnostic)
//!
//! Computes per-frame visual state (offset, rotation, scale, opacity, color)
//! for a dynamic set of elements. Layout strategies turn `(index, count,
//! container size)` into eased motions; the engine owns elements and groups
//! and answers `update(now)` with sparse frame snapshots; the playback
//! controller tracks elapsed time across pause, speed changes and loops.
//!
//! The host owns the frame loop and the clock and passes `now` explicitly.

pub mod config;
pub mod element;
pub mod engine;
pub mod error;
pub mod group;
pub mod ids;
pub mod inputs;
pub mod interp;
pub mod layout;
pub mod outputs;
pub mod playback;
pub mod state;
pub mod time;
pub mod value;

// Re-exports for consumers (host adapters)
pub use config::{Config, DuplicatePolicy};
pub use element::{AnimatedElement, ElementDecl};
pub use engine::Engine;
pub use error::AnimationError;
pub use group::AnimatedGroup;
pub use ids::{ElementKey, GroupKey};
pub use inputs::{LoopMode, PlaybackCommand};
pub use interp::{ease, Easing, EasingFunction, EasingMode};
pub use layout::{LayoutBase, LayoutFrame, LayoutSpec, LayoutStrategy, MorphingLayout};
pub use outputs::{CoreEvent, FrameSnapshotEntry};
pub use playback::{PlaybackController, PlaybackState};
pub use state::{ColorState, InterpolatedState, Timing};
pub use time::{Clock, ManualClock, SystemClock, Timestamp};
pub use value::{Channel, Color, ColorChannel};

pub type Result<T> = core::result::Result<T, AnimationError>;
