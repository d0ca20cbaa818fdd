use choreo_animation_core::{
    element::{AnimatedElement, ElementDecl},
    engine::Engine,
    error::AnimationError,
    interp::{Easing, EasingFunction, EasingMode},
    layout::{
        FanLayout, FanParams, LayoutStrategy, MorphingLayout, StackLayout, StackParams,
        WaveLayout, WaveParams,
    },
    state::Timing,
    time::Timestamp,
    value::Channel,
};

fn linear(ms: f64) -> Timing {
    Timing::new(ms, Easing::new(EasingFunction::Linear, EasingMode::In).unwrap()).unwrap()
}

fn stack() -> Box<dyn LayoutStrategy> {
    Box::new(StackLayout::new(
        StackParams {
            spacing_x: 10.0,
            ..Default::default()
        },
        linear(100.0),
    ))
}

fn fan() -> Box<dyn LayoutStrategy> {
    Box::new(FanLayout::new(FanParams::default(), linear(100.0)))
}

fn wave() -> Box<dyn LayoutStrategy> {
    Box::new(WaveLayout::new(WaveParams::default(), linear(100.0)))
}

#[test]
fn fewer_than_two_children_never_transition() {
    let mut morph = MorphingLayout::new(linear(100.0));
    assert!(!morph.next_layout());
    morph.add("stack", stack());
    assert!(!morph.next_layout());
    assert_eq!(morph.active_name(), Some("stack"));
}

#[test]
fn cycles_through_children_and_wraps() {
    let mut morph = MorphingLayout::new(linear(100.0))
        .with("stack", stack())
        .with("fan", fan())
        .with("wave", wave());
    let mut seen = vec![morph.active_name().unwrap().to_string()];
    for _ in 0..3 {
        assert!(morph.next_layout());
        seen.push(morph.active_name().unwrap().to_string());
    }
    assert_eq!(seen, vec!["stack", "fan", "wave", "stack"]);
}

#[test]
fn non_looping_stops_at_last_child() {
    let mut morph = MorphingLayout::new(linear(100.0))
        .with("stack", stack())
        .with("fan", fan());
    morph.looping = false;
    assert!(morph.next_layout());
    assert!(!morph.next_layout());
    assert_eq!(morph.active_name(), Some("fan"));
}

#[test]
fn adding_same_name_is_noop() {
    let mut morph = MorphingLayout::new(linear(100.0));
    assert!(morph.add("a", stack()));
    assert!(!morph.add("a", fan()));
    assert_eq!(morph.len(), 1);
    assert_eq!(morph.active().unwrap().name(), "stack");
}

#[test]
fn remove_keeps_active_child() {
    let mut morph = MorphingLayout::new(linear(100.0))
        .with("stack", stack())
        .with("fan", fan())
        .with("wave", wave());
    morph.next_layout();
    morph.next_layout();
    assert_eq!(morph.active_name(), Some("wave"));
    assert!(morph.remove("stack").is_some());
    assert_eq!(morph.active_name(), Some("wave"));
    assert!(morph.remove("missing").is_none());
    assert!(morph.remove("wave").is_some());
    assert_eq!(morph.active_name(), Some("fan"));
}

#[test]
fn immediate_mode_is_refused() {
    let mut morph = MorphingLayout::new(linear(100.0)).with("stack", stack());
    let err = morph.set_immediate(true).unwrap_err();
    assert!(matches!(err, AnimationError::UnsupportedOperation { .. }));
    assert!(!err.is_recoverable());
    morph.set_immediate(false).unwrap();
}

#[test]
fn applies_only_the_active_child() {
    let mut morph = MorphingLayout::new(linear(100.0))
        .with("stack", stack())
        .with("fan", fan());
    morph.set_dimensions(400.0, 400.0).unwrap();
    let mut els = vec![AnimatedElement::new("a"), AnimatedElement::new("b")];
    morph.apply(&mut els, Timestamp::zero()).unwrap();
    assert!(els[0].state(Channel::Rotation).is_none());
    morph.next_layout();
    morph.apply(&mut els, Timestamp::zero()).unwrap();
    assert!(els[0].state(Channel::Rotation).is_some());
}

#[test]
fn dispose_drops_children() {
    let mut morph = MorphingLayout::new(linear(100.0))
        .with("stack", stack())
        .with("fan", fan());
    morph.dispose();
    assert!(morph.is_empty());
    assert!(!morph.next_layout());
}

#[test]
fn engine_steps_composite_layout() {
    let mut engine = Engine::default();
    engine.set_dimensions(500.0, 500.0).unwrap();
    engine.register(ElementDecl::new("a")).unwrap();
    engine.register(ElementDecl::new("b")).unwrap();
    let morph = MorphingLayout::new(linear(100.0))
        .with("stack", stack())
        .with("fan", fan());
    engine.set_layout(Some(Box::new(morph))).unwrap();
    engine.apply_layout(Timestamp::zero()).unwrap();
    assert!(engine.update(Timestamp::from_millis(100.0))[0]
        .rotation
        .is_none());
    assert!(engine.next_layout());
    engine.apply_layout(Timestamp::from_millis(100.0)).unwrap();
    assert!(engine.update(Timestamp::from_millis(200.0))[0]
        .rotation
        .is_some());
}

#[test]
fn immediate_children_run_timed() {
    let mut child = StackLayout::new(
        StackParams {
            spacing_x: 10.0,
            ..Default::default()
        },
        linear(250.0),
    );
    child.set_immediate(true).unwrap();
    let mut morph = MorphingLayout::new(linear(250.0)).with("stack", Box::new(child));
    assert!(!morph.active().unwrap().base().immediate);
    let mut els = vec![AnimatedElement::new("a"), AnimatedElement::new("b")];
    morph.apply(&mut els, Timestamp::zero()).unwrap();
    assert_eq!(els[1].state(Channel::OffsetX).unwrap().duration_ms, 250.0);
    assert_eq!(els[1].current_value(Channel::OffsetX, Timestamp::zero()), 0.0);
}

#[test]
fn retiming_reaches_every_child() {
    let mut morph = MorphingLayout::new(linear(100.0))
        .with("stack", stack())
        .with("fan", fan());
    morph.set_timing(linear(700.0));
    assert_eq!(morph.base().timing.duration_ms, 700.0);
    let mut els = vec![AnimatedElement::new("a"), AnimatedElement::new("b")];
    morph.apply(&mut els, Timestamp::zero()).unwrap();
    assert_eq!(els[1].state(Channel::OffsetX).unwrap().duration_ms, 700.0);
    morph.next_layout();
    assert_eq!(morph.active().unwrap().base().timing.duration_ms, 700.0);
}

#[test]
fn added_children_take_the_morph_size() {
    let mut morph = MorphingLayout::new(linear(100.0));
    morph.set_dimensions(320.0, 240.0).unwrap();
    assert!(morph.add("stack", stack()));
    let child = morph.active().unwrap().base();
    assert_eq!((child.width(), child.height()), (320.0, 240.0));
}
