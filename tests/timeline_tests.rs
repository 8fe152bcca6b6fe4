// Host-side tests for the wormhole sequencer and uniform authority handoff.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod ease {
    include!("../src/core/ease.rs");
}
mod config {
    include!("../src/core/config.rs");
}
mod blend {
    include!("../src/core/blend.rs");
}
mod scroll {
    include!("../src/core/scroll.rs");
}
mod uniforms {
    include!("../src/core/uniforms.rs");
}
mod timeline {
    include!("../src/core/timeline.rs");
}

use config::*;
use scroll::{ScrollPhase, ScrollTracker};
use timeline::*;
use uniforms::*;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Call {
    UiVisible(bool),
    StopScroll,
    StartScroll,
    ScrollToTop,
    ResetScrollState,
}

#[derive(Default)]
struct RecordingStage {
    calls: Vec<Call>,
    tracker: ScrollTracker,
}

impl Stage for RecordingStage {
    fn set_ui_visible(&mut self, visible: bool) {
        self.calls.push(Call::UiVisible(visible));
    }
    fn stop_scroll(&mut self) {
        self.calls.push(Call::StopScroll);
    }
    fn start_scroll(&mut self) {
        self.calls.push(Call::StartScroll);
    }
    fn scroll_to_top(&mut self) {
        self.calls.push(Call::ScrollToTop);
    }
    fn reset_scroll_state(&mut self) {
        self.tracker.reset();
        self.calls.push(Call::ResetScrollState);
    }
}

fn sink() -> UniformSet {
    UniformSet::new(BASE_CONFIG, GalaxyOptions::default())
}

fn restoration() -> Vec<Call> {
    vec![
        Call::UiVisible(true),
        Call::ResetScrollState,
        Call::ScrollToTop,
    ]
}

#[test]
fn charging_progress_rises_monotonically() {
    let tl = WormholeTimeline::new(0.0, BASE_CONFIG, WARP_CONFIG, TimelineConfig::default());
    let mut prev = tl.sample(0.0).progress;
    assert_eq!(prev, 0.0);
    for i in 1..200 {
        let s = tl.sample(i as f64 * 0.01);
        assert_eq!(s.phase, Some(TimelinePhase::Charging));
        assert!(s.progress >= prev);
        prev = s.progress;
    }
}

#[test]
fn charge_curve_is_cubic_in_out() {
    assert_eq!(ease::power2_in_out(0.0), 0.0);
    assert!((ease::power2_in_out(0.25) - 0.0625).abs() < 1e-6);
    assert!((ease::power2_in_out(0.1) - 0.004).abs() < 1e-6);
    assert!((ease::power2_in_out(0.5) - 0.5).abs() < 1e-6);
    assert!((ease::power2_in_out(0.75) - 0.9375).abs() < 1e-6);
    assert_eq!(ease::power2_in_out(1.0), 1.0);

    // a quarter of the way through the 2 s charge
    let tl = WormholeTimeline::new(0.0, BASE_CONFIG, WARP_CONFIG, TimelineConfig::default());
    let s = tl.sample(0.5);
    assert_eq!(s.phase, Some(TimelinePhase::Charging));
    assert!((s.progress - 0.0625).abs() < 1e-6, "progress {}", s.progress);
    assert!((tl.sample(1.5).progress - 0.9375).abs() < 1e-5);
}

#[test]
fn timeline_phases_follow_durations() {
    let tl = WormholeTimeline::new(10.0, BASE_CONFIG, WARP_CONFIG, TimelineConfig::default());
    assert_eq!(tl.sample(11.0).phase, Some(TimelinePhase::Charging));
    assert!((tl.sample(11.0).progress - 0.5).abs() < 1e-6);

    let hold = tl.sample(12.5);
    assert_eq!(hold.phase, Some(TimelinePhase::Holding));
    assert_eq!(hold.progress, 1.0);
    assert_eq!(hold.exit_progress, 0.0);

    let ret = tl.sample(13.65);
    assert_eq!(ret.phase, Some(TimelinePhase::Returning));
    assert!(ret.progress < 1.0 && ret.progress > 0.0);
    assert!((ret.exit_progress - 0.5).abs() < 1e-3);

    let done = tl.sample(13.8);
    assert_eq!(done.phase, None);
    assert_eq!(done.progress, 0.0);
    assert_eq!(done.exit_progress, 1.0);
}

#[test]
fn hold_fields_match_warp_config() {
    let tl = WormholeTimeline::new(0.0, BASE_CONFIG, WARP_CONFIG, TimelineConfig::default());
    let c = tl.uniforms_at(&tl.sample(3.0));
    assert!((c.density - WARP_CONFIG.density).abs() < 1e-5);
    assert!((c.hue_shift - WARP_CONFIG.hue_shift).abs() < 1e-4);
    assert!((c.speed - WARP_CONFIG.speed).abs() < 1e-5);
}

#[test]
fn start_hides_ui_stops_scroll_and_takes_authority() {
    let mut seq = WormholeSequencer::default();
    let mut stage = RecordingStage::default();
    let mut u = sink();
    seq.start(&BASE_CONFIG, 0.0, &mut stage, &mut u);

    assert_eq!(stage.calls, vec![Call::UiVisible(false), Call::StopScroll]);
    assert_eq!(u.authority(), UniformAuthority::Warp);
    assert_eq!(seq.state(), SequencerState::Charging);
    assert!(seq.is_active());
}

#[test]
fn props_are_suppressed_while_warp_is_authoritative() {
    let mut seq = WormholeSequencer::default();
    let mut stage = RecordingStage::default();
    let mut u = sink();
    seq.start(&BASE_CONFIG, 0.0, &mut stage, &mut u);
    seq.tick(2.5, &mut stage, &mut u);
    let during = *u.slots();

    let mut props = BASE_CONFIG;
    props.density = 0.05;
    props.hue_shift = 300.0;
    assert!(!u.apply_props(&props));
    assert_eq!(*u.slots(), during, "slots untouched by the props path");

    // handback restores the latest props
    assert!(seq.interrupt(2.6, &mut stage, &mut u));
    assert_eq!(u.authority(), UniformAuthority::Props);
    assert_eq!(*u.slots(), props);
    assert!(u.apply_props(&BASE_CONFIG));
}

#[test]
fn completion_runs_restoration_in_order() {
    let mut seq = WormholeSequencer::default();
    let mut stage = RecordingStage::default();
    let mut u = sink();
    seq.start(&BASE_CONFIG, 0.0, &mut stage, &mut u);
    stage.calls.clear();

    let mut t = 0.0;
    let mut outcome = None;
    while outcome.is_none() && t < 10.0 {
        t += 1.0 / 60.0;
        outcome = seq.tick(t, &mut stage, &mut u);
    }
    assert_eq!(outcome, Some(TimelineOutcome::Completed));
    assert!(t >= TimelineConfig::default().total_sec());
    assert_eq!(stage.calls, restoration());
    assert_eq!(seq.state(), SequencerState::Idle);
    assert_eq!(seq.wormhole_progress(), 0.0);
    assert_eq!(u.authority(), UniformAuthority::Props);
    assert_eq!(u.warp_progress(), 0.0);
    assert_eq!(u.exit_progress(), 0.0);
    assert_eq!(*u.slots(), BASE_CONFIG);

    // scroll input comes back after the settle delay, exactly once
    assert!(seq.scroll_restart_pending());
    stage.calls.clear();
    seq.tick(t + 0.01, &mut stage, &mut u);
    assert!(stage.calls.is_empty());
    seq.tick(t + 0.06, &mut stage, &mut u);
    assert_eq!(stage.calls, vec![Call::StartScroll]);
    seq.tick(t + 0.2, &mut stage, &mut u);
    assert_eq!(stage.calls, vec![Call::StartScroll]);
    assert!(!seq.scroll_restart_pending());
}

#[test]
fn interruption_restores_same_state_as_completion() {
    let run = |interrupt_at: Option<f64>| {
        let mut seq = WormholeSequencer::default();
        let mut stage = RecordingStage::default();
        let mut u = sink();
        seq.start(&BASE_CONFIG, 0.0, &mut stage, &mut u);
        stage.calls.clear();
        match interrupt_at {
            Some(at) => {
                seq.tick(at, &mut stage, &mut u);
                assert!(seq.interrupt(at, &mut stage, &mut u));
            }
            None => {
                seq.tick(10.0, &mut stage, &mut u);
            }
        }
        (
            stage.calls,
            seq.state(),
            seq.wormhole_progress(),
            u.authority(),
            *u.slots(),
            u.warp_progress(),
            u.exit_progress(),
        )
    };
    let completed = run(None);
    for at in [0.3, 1.9, 2.5, 3.65] {
        assert_eq!(run(Some(at)), completed, "interrupted at {}", at);
    }
}

#[test]
fn interrupt_when_idle_is_a_no_op() {
    let mut seq = WormholeSequencer::default();
    let mut stage = RecordingStage::default();
    let mut u = sink();
    assert!(!seq.interrupt(0.0, &mut stage, &mut u));
    assert!(stage.calls.is_empty());
    assert_eq!(seq.last_outcome(), None);
}

#[test]
fn leaving_wormhole_phase_interrupts() {
    let mut seq = WormholeSequencer::default();
    let mut stage = RecordingStage::default();
    let mut u = sink();
    seq.start(&BASE_CONFIG, 0.0, &mut stage, &mut u);

    assert!(!seq.sync_phase(ScrollPhase::Wormhole, 0.5, &mut stage, &mut u));
    assert!(seq.is_active());
    assert!(seq.sync_phase(ScrollPhase::Normal, 0.6, &mut stage, &mut u));
    assert!(!seq.is_active());
    assert_eq!(seq.last_outcome(), Some(TimelineOutcome::Interrupted));
}

#[test]
fn restart_discards_running_timeline() {
    let mut seq = WormholeSequencer::default();
    let mut stage = RecordingStage::default();
    let mut u = sink();
    seq.start(&BASE_CONFIG, 0.0, &mut stage, &mut u);
    seq.tick(2.5, &mut stage, &mut u);
    assert_eq!(seq.state(), SequencerState::Holding);

    stage.calls.clear();
    seq.start(&BASE_CONFIG, 2.6, &mut stage, &mut u);
    assert_eq!(seq.last_outcome(), Some(TimelineOutcome::Interrupted));
    // no restoration in between: the page stays hidden and locked
    assert_eq!(stage.calls, vec![Call::UiVisible(false), Call::StopScroll]);
    assert!(!seq.scroll_restart_pending());
    assert_eq!(seq.state(), SequencerState::Charging);
    assert_eq!(u.authority(), UniformAuthority::Warp);
    // the new timeline starts from zero, not from where the old one was
    assert!(seq.wormhole_progress() < 1e-6);

    // and runs its full length from the restart time
    assert_eq!(seq.tick(2.6 + 3.5, &mut stage, &mut u), None);
    assert_eq!(
        seq.tick(2.6 + 3.8, &mut stage, &mut u),
        Some(TimelineOutcome::Completed)
    );
}

#[test]
fn ticks_push_progress_into_the_sink() {
    let mut seq = WormholeSequencer::default();
    let mut stage = RecordingStage::default();
    let mut u = sink();
    seq.start(&BASE_CONFIG, 0.0, &mut stage, &mut u);
    seq.tick(1.0, &mut stage, &mut u);
    assert!((u.warp_progress() - 0.5).abs() < 1e-6);
    assert!((seq.wormhole_progress() - 0.5).abs() < 1e-6);
    assert!(u.slots().hue_shift > BASE_CONFIG.hue_shift);
    assert!(u.slots().hue_shift < WARP_CONFIG.hue_shift);
}

#[test]
fn packed_star_speed_is_compound() {
    let mut u = sink();
    u.update_uniforms(&UniformPatch {
        star_speed: Some(2.0),
        speed: Some(1.5),
        ..Default::default()
    });
    let frame = FrameInputs {
        width: 800,
        height: 400,
        time_sec: 3.0,
        mouse: glam::Vec2::splat(0.5),
        mouse_active: 0.0,
    };
    let packed = u.pack(&frame);
    assert!((packed.star_speed - 0.3).abs() < 1e-6);
    assert_eq!(packed.resolution, [800.0, 400.0, 2.0, 0.0]);
    assert_eq!(packed.time, 3.0);
    assert_eq!(packed.num_layers, 4);
    assert_eq!(packed.transparent, 1.0);

    // only speed changes: the compound value follows
    u.update_uniforms(&UniformPatch {
        speed: Some(0.0),
        ..Default::default()
    });
    assert_eq!(u.pack(&frame).star_speed, 0.0);
}

#[test]
fn imperative_patch_clamps_progress() {
    let mut u = sink();
    u.update_uniforms(&UniformPatch {
        warp_progress: Some(1.7),
        exit_progress: Some(f32::NAN),
        ..Default::default()
    });
    assert_eq!(u.warp_progress(), 1.0);
    assert_eq!(u.exit_progress(), 0.0);
}

#[test]
fn frozen_animation_uploads_zero_time() {
    let options = GalaxyOptions {
        disable_animation: true,
        ..GalaxyOptions::default()
    };
    let u = UniformSet::new(BASE_CONFIG, options);
    let frame = FrameInputs {
        width: 10,
        height: 10,
        time_sec: 42.0,
        mouse: glam::Vec2::ZERO,
        mouse_active: 0.0,
    };
    assert_eq!(u.pack(&frame).time, 0.0);
    // resting config has twinkle, so it still needs frames
    assert!(!u.is_idle(0.0));

    let still = VisualConfig {
        twinkle_intensity: 0.0,
        ..BASE_CONFIG
    };
    let u = UniformSet::new(still, options);
    assert!(u.is_idle(0.0));
    assert!(!u.is_idle(0.5));
}
