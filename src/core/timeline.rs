// Scripted wormhole sequence: charge up, hold, return.
//
// The sequencer owns at most one `WormholeTimeline`. While it is alive the
// timeline's progress drives the uniform blend every tick and the warp path
// holds uniform authority. Completion and interruption run the same
// restoration sequence through the `Stage` seam:
//
// 1. show the UI chrome
// 2. zero progress and hand uniforms back to the props path
// 3. reset the scroll state machine
// 4. jump to the top of the page
// 5. restart scroll input after a short settling delay

use super::blend::{blend, WarpProgress};
use super::config::{VisualConfig, WARP_CONFIG};
use super::constants::{
    CHARGE_DURATION_SEC, HOLD_DURATION_SEC, HOLD_PROGRESS, RETURN_DURATION_SEC,
    SCROLL_RESTART_SETTLE_SEC,
};
use super::ease::{clamp01, power1_out, power2_in_out};
use super::scroll::ScrollPhase;
use super::uniforms::UniformSink;

/// Side effects the sequencer needs from the page.
pub trait Stage {
    fn set_ui_visible(&mut self, visible: bool);
    fn stop_scroll(&mut self);
    fn start_scroll(&mut self);
    fn scroll_to_top(&mut self);
    fn reset_scroll_state(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineConfig {
    pub charge_sec: f64,
    pub hold_sec: f64,
    pub hold_progress: f32,
    pub return_sec: f64,
    pub settle_sec: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            charge_sec: CHARGE_DURATION_SEC,
            hold_sec: HOLD_DURATION_SEC,
            hold_progress: HOLD_PROGRESS,
            return_sec: RETURN_DURATION_SEC,
            settle_sec: SCROLL_RESTART_SETTLE_SEC,
        }
    }
}

impl TimelineConfig {
    pub fn total_sec(&self) -> f64 {
        self.charge_sec + self.hold_sec + self.return_sec
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimelinePhase {
    Charging,
    Holding,
    Returning,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SequencerState {
    #[default]
    Idle,
    Charging,
    Holding,
    Returning,
}

impl From<TimelinePhase> for SequencerState {
    fn from(p: TimelinePhase) -> Self {
        match p {
            TimelinePhase::Charging => SequencerState::Charging,
            TimelinePhase::Holding => SequencerState::Holding,
            TimelinePhase::Returning => SequencerState::Returning,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimelineOutcome {
    Completed,
    Interrupted,
}

/// Timeline position at one instant. `phase` is `None` once the sequence has
/// run to completion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineSample {
    pub phase: Option<TimelinePhase>,
    pub progress: f32,
    pub exit_progress: f32,
}

#[derive(Clone, Debug)]
pub struct WormholeTimeline {
    started_at: f64,
    proxy: VisualConfig,
    warp: VisualConfig,
    config: TimelineConfig,
}

impl WormholeTimeline {
    pub fn new(
        started_at: f64,
        proxy: VisualConfig,
        warp: VisualConfig,
        config: TimelineConfig,
    ) -> Self {
        Self {
            started_at,
            proxy,
            warp,
            config,
        }
    }

    pub fn proxy(&self) -> &VisualConfig {
        &self.proxy
    }

    pub fn sample(&self, now: f64) -> TimelineSample {
        let c = &self.config;
        let hold = clamp01(c.hold_progress);
        let t = now - self.started_at;
        let t = if t.is_finite() { t.max(0.0) } else { 0.0 };

        if t < c.charge_sec {
            let x = (t / c.charge_sec) as f32;
            TimelineSample {
                phase: Some(TimelinePhase::Charging),
                progress: hold * power2_in_out(x),
                exit_progress: 0.0,
            }
        } else if t < c.charge_sec + c.hold_sec {
            TimelineSample {
                phase: Some(TimelinePhase::Holding),
                progress: hold,
                exit_progress: 0.0,
            }
        } else if t < c.total_sec() {
            let x = ((t - c.charge_sec - c.hold_sec) / c.return_sec) as f32;
            TimelineSample {
                phase: Some(TimelinePhase::Returning),
                progress: hold * (1.0 - power1_out(x)),
                exit_progress: clamp01(x),
            }
        } else {
            TimelineSample {
                phase: None,
                progress: 0.0,
                exit_progress: 1.0,
            }
        }
    }

    /// Blended uniform values for a sample.
    pub fn uniforms_at(&self, sample: &TimelineSample) -> VisualConfig {
        blend(
            &self.proxy,
            &self.warp,
            WarpProgress::new(sample.progress, sample.exit_progress),
        )
    }
}

#[derive(Debug)]
pub struct WormholeSequencer {
    timeline: Option<WormholeTimeline>,
    config: TimelineConfig,
    warp: VisualConfig,
    state: SequencerState,
    wormhole_progress: f32,
    restart_scroll_at: Option<f64>,
    last_outcome: Option<TimelineOutcome>,
}

impl Default for WormholeSequencer {
    fn default() -> Self {
        Self::new(WARP_CONFIG, TimelineConfig::default())
    }
}

impl WormholeSequencer {
    pub fn new(warp: VisualConfig, config: TimelineConfig) -> Self {
        Self {
            timeline: None,
            config,
            warp,
            state: SequencerState::Idle,
            wormhole_progress: 0.0,
            restart_scroll_at: None,
            last_outcome: None,
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.timeline.is_some()
    }

    /// Observable 0..1 progress of the running sequence.
    pub fn wormhole_progress(&self) -> f32 {
        self.wormhole_progress
    }

    pub fn last_outcome(&self) -> Option<TimelineOutcome> {
        self.last_outcome
    }

    pub fn scroll_restart_pending(&self) -> bool {
        self.restart_scroll_at.is_some()
    }

    /// Begin a sequence from `base`. A running timeline is dropped first, never paused.
    ///
    /// Dropping skips the restoration sequence. The new timeline hides the UI
    /// and stops scroll again straight away, and resetting the scroll state
    /// here would clear the `Wormhole` phase that requested the restart, so
    /// the next `sync_phase` would interrupt the fresh timeline.
    pub fn start(
        &mut self,
        base: &VisualConfig,
        now: f64,
        stage: &mut impl Stage,
        sink: &mut impl UniformSink,
    ) {
        if self.timeline.take().is_some() {
            log::info!("[wormhole] restart requested, discarding running timeline");
            sink.release_warp();
            self.last_outcome = Some(TimelineOutcome::Interrupted);
        }
        self.restart_scroll_at = None;
        stage.set_ui_visible(false);
        stage.stop_scroll();
        sink.acquire_warp();

        let timeline = WormholeTimeline::new(now, base.transition_proxy(), self.warp, self.config);
        let first = timeline.sample(now);
        sink.update_uniforms(&patch_for(&timeline, &first));
        self.wormhole_progress = first.progress;
        self.state = SequencerState::Charging;
        self.timeline = Some(timeline);
        log::info!("[wormhole] charging");
    }

    /// Advance to `now`. Returns the outcome if the sequence finished on this tick.
    pub fn tick(
        &mut self,
        now: f64,
        stage: &mut impl Stage,
        sink: &mut impl UniformSink,
    ) -> Option<TimelineOutcome> {
        if let Some(at) = self.restart_scroll_at {
            if now >= at {
                self.restart_scroll_at = None;
                stage.start_scroll();
            }
        }
        let sample = self.timeline.as_ref()?.sample(now);
        match sample.phase {
            Some(phase) => {
                if let Some(tl) = &self.timeline {
                    sink.update_uniforms(&patch_for(tl, &sample));
                }
                self.wormhole_progress = sample.progress;
                let next = SequencerState::from(phase);
                if next != self.state {
                    log::info!("[wormhole] {:?} -> {:?}", self.state, next);
                    self.state = next;
                }
                None
            }
            None => {
                self.teardown(TimelineOutcome::Completed, now, stage, sink);
                Some(TimelineOutcome::Completed)
            }
        }
    }

    /// Cancel a running sequence, restoring the same state as completion.
    /// Returns `false` if nothing was running.
    pub fn interrupt(
        &mut self,
        now: f64,
        stage: &mut impl Stage,
        sink: &mut impl UniformSink,
    ) -> bool {
        if self.timeline.is_none() {
            return false;
        }
        self.teardown(TimelineOutcome::Interrupted, now, stage, sink);
        true
    }

    /// Tear down the sequence if the scroll phase no longer says `Wormhole`.
    pub fn sync_phase(
        &mut self,
        phase: ScrollPhase,
        now: f64,
        stage: &mut impl Stage,
        sink: &mut impl UniformSink,
    ) -> bool {
        if phase != ScrollPhase::Wormhole && self.timeline.is_some() {
            log::info!("[wormhole] scroll phase left wormhole ({}), interrupting", phase);
            return self.interrupt(now, stage, sink);
        }
        false
    }

    fn teardown(
        &mut self,
        outcome: TimelineOutcome,
        now: f64,
        stage: &mut impl Stage,
        sink: &mut impl UniformSink,
    ) {
        self.timeline = None;
        stage.set_ui_visible(true);
        self.wormhole_progress = 0.0;
        sink.release_warp();
        stage.reset_scroll_state();
        stage.scroll_to_top();
        self.restart_scroll_at = Some(now + self.config.settle_sec.max(0.0));
        self.state = SequencerState::Idle;
        self.last_outcome = Some(outcome);
        log::info!("[wormhole] {:?}", outcome);
    }
}

fn patch_for(
    timeline: &WormholeTimeline,
    sample: &TimelineSample,
) -> super::config::UniformPatch {
    let mut patch = timeline.uniforms_at(sample).to_patch();
    patch.warp_progress = Some(sample.progress);
    patch.exit_progress = Some(sample.exit_progress);
    patch
}
