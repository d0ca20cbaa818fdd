//! Declarative layout descriptions.
//!
//! Hosts describe layouts as data (for example from markup attributes or a
//! JSON config) and build the strategy objects from them.

use serde::{Deserialize, Serialize};

use super::*;
use crate::error::AnimationError;
use crate::state::Timing;

/// A named child of a morphing layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamedLayout {
    pub name: String,
    pub layout: LayoutSpec,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutSpec {
    Stack(StackParams),
    Grid(GridParams),
    Snake(GridParams),
    Wave(WaveParams),
    Fan(FanParams),
    Circle(CircleParams),
    Line(LineParams),
    Orbit(OrbitParams),
    Magnet(MagnetParams),
    Pin(PinParams),
    Spiral(SpiralParams),
    GoldenSpiral(GoldenSpiralParams),
    SpiralGalaxy(SpiralGalaxyParams),
    Galaxy(GalaxyParams),
    Heart(HeartParams),
    Flower(FlowerParams),
    Sunburst(SunburstParams),
    Chaos(ChaosParams),
    Float(FloatParams),
    Pulse(PulseParams),
    Morphing {
        children: Vec<NamedLayout>,
        #[serde(default = "default_looping")]
        looping: bool,
    },
}

fn default_looping() -> bool {
    true
}

impl LayoutSpec {
    pub fn from_json_str(json: &str) -> Result<Self, AnimationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the strategy, timed by `timing`.
    pub fn build(&self, timing: Timing) -> Box<dyn LayoutStrategy> {
        match self {
            Self::Stack(p) => Box::new(StackLayout::new(p.clone(), timing)),
            Self::Grid(p) => Box::new(GridLayout::new(p.clone(), timing)),
            Self::Snake(p) => Box::new(SnakeLayout::new(p.clone(), timing)),
            Self::Wave(p) => Box::new(WaveLayout::new(p.clone(), timing)),
            Self::Fan(p) => Box::new(FanLayout::new(p.clone(), timing)),
            Self::Circle(p) => Box::new(CircleLayout::new(p.clone(), timing)),
            Self::Line(p) => Box::new(LineLayout::new(p.clone(), timing)),
            Self::Orbit(p) => Box::new(OrbitLayout::new(p.clone(), timing)),
            Self::Magnet(p) => Box::new(MagnetLayout::new(p.clone(), timing)),
            Self::Pin(p) => Box::new(PinLayout::new(p.clone(), timing)),
            Self::Spiral(p) => Box::new(SpiralLayout::new(p.clone(), timing)),
            Self::GoldenSpiral(p) => Box::new(GoldenSpiralLayout::new(p.clone(), timing)),
            Self::SpiralGalaxy(p) => Box::new(SpiralGalaxyLayout::new(p.clone(), timing)),
            Self::Galaxy(p) => Box::new(GalaxyLayout::new(p.clone(), timing)),
            Self::Heart(p) => Box::new(HeartLayout::new(p.clone(), timing)),
            Self::Flower(p) => Box::new(FlowerLayout::new(p.clone(), timing)),
            Self::Sunburst(p) => Box::new(SunburstLayout::new(p.clone(), timing)),
            Self::Chaos(p) => Box::new(ChaosLayout::new(p.clone(), timing)),
            Self::Float(p) => Box::new(FloatLayout::new(p.clone(), timing)),
            Self::Pulse(p) => Box::new(PulseLayout::new(p.clone(), timing)),
            Self::Morphing { children, looping } => {
                let mut morph = MorphingLayout::new(timing);
                morph.looping = *looping;
                for child in children {
                    morph.add(child.name.clone(), child.layout.build(timing));
                }
                Box::new(morph)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_json_with_defaults() {
        let spec = LayoutSpec::from_json_str(r#"{ "kind": "wave", "amplitude": 12.0 }"#).unwrap();
        match &spec {
            LayoutSpec::Wave(p) => {
                assert_eq!(p.amplitude, 12.0);
                assert_eq!(p.spacing, WaveParams::default().spacing);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(spec.build(Timing::default()).name(), "wave");
    }

    #[test]
    fn builds_morphing_children() {
        let json = r#"{
            "kind": "morphing",
            "children": [
                { "name": "a", "layout": { "kind": "grid", "columns": 2 } },
                { "name": "b", "layout": { "kind": "heart" } },
                { "name": "a", "layout": { "kind": "fan" } }
            ]
        }"#;
        let mut layout = LayoutSpec::from_json_str(json)
            .unwrap()
            .build(Timing::default());
        assert_eq!(layout.name(), "morphing");
        assert!(layout.next_layout());
        assert!(layout.next_layout());
    }

    #[test]
    fn unknown_kind_is_a_serialization_error() {
        let err = LayoutSpec::from_json_str(r#"{ "kind": "teleport" }"#).unwrap_err();
        assert_eq!(err.category(), "serialization");
    }
}
