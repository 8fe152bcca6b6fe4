// Scroll position → (progress, extra progress, section, phase).
//
// The tracker converts a raw vertical offset into normalized progress using a
// cached `HeightMeasurement`. Crossing the end of the extra section fires a
// one-shot wormhole trigger; the only way back to `Normal` afterwards is
// `reset`.

use smallvec::SmallVec;
use std::fmt;

use super::constants::{SCROLL_THROTTLE_MS, SECTION_IDS, VIEWPORTS_PER_SECTION};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScrollPhase {
    #[default]
    Normal,
    Extra,
    Wormhole,
}

impl ScrollPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrollPhase::Normal => "normal",
            ScrollPhase::Extra => "extra",
            ScrollPhase::Wormhole => "wormhole",
        }
    }
}

impl fmt::Display for ScrollPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the content geometry, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HeightMeasurement {
    pub normal_sections_height: f64,
    pub extra_section_height: f64,
    pub extra_section_start: f64,
    pub viewport_height: f64,
}

impl HeightMeasurement {
    /// A measurement taken before layout reports zero heights.
    pub fn is_valid(&self) -> bool {
        self.normal_sections_height > 0.0 && self.viewport_height > 0.0
    }
}

/// Signals produced by a scroll update, in the order they happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollEvent {
    SectionChanged { from: usize, to: usize },
    PhaseChanged { from: ScrollPhase, to: ScrollPhase },
    WormholeTriggered,
}

pub type ScrollEvents = SmallVec<[ScrollEvent; 3]>;

#[derive(Clone, Debug)]
pub struct ScrollTracker {
    measurement: Option<HeightMeasurement>,
    section_count: usize,
    scroll_progress: f32,
    extra_scroll_progress: f32,
    current_section: usize,
    phase: ScrollPhase,
    triggered: bool,
    last_update_ms: Option<f64>,
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new(SECTION_IDS.len())
    }
}

impl ScrollTracker {
    pub fn new(section_count: usize) -> Self {
        Self {
            measurement: None,
            section_count: section_count.max(1),
            scroll_progress: 0.0,
            extra_scroll_progress: 0.0,
            current_section: 0,
            phase: ScrollPhase::Normal,
            triggered: false,
            last_update_ms: None,
        }
    }

    pub fn scroll_progress(&self) -> f32 {
        self.scroll_progress
    }

    pub fn extra_scroll_progress(&self) -> f32 {
        self.extra_scroll_progress
    }

    pub fn current_section(&self) -> usize {
        self.current_section
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn triggered(&self) -> bool {
        self.triggered
    }

    pub fn measurement(&self) -> Option<&HeightMeasurement> {
        self.measurement.as_ref()
    }

    /// Drop the cached geometry; the next update re-measures.
    pub fn invalidate(&mut self) {
        self.measurement = None;
    }

    /// Handle a scroll offset observed at `now_ms`.
    ///
    /// Updates closer than one frame to the previous accepted update are
    /// dropped. `measure` is only called when no valid measurement is cached;
    /// while layout still reports zero heights the update is a no-op.
    pub fn on_scroll(
        &mut self,
        offset: f64,
        now_ms: f64,
        measure: impl FnOnce() -> HeightMeasurement,
    ) -> ScrollEvents {
        if let Some(last) = self.last_update_ms {
            if now_ms - last < SCROLL_THROTTLE_MS {
                return ScrollEvents::new();
            }
        }
        if !self.measurement.map(|m| m.is_valid()).unwrap_or(false) {
            let m = measure();
            if !m.is_valid() {
                log::debug!("[scroll] layout not ready, skipping update");
                return ScrollEvents::new();
            }
            self.measurement = Some(m);
        }
        self.last_update_ms = Some(now_ms);
        self.apply_offset(offset)
    }

    fn apply_offset(&mut self, offset: f64) -> ScrollEvents {
        let mut events = ScrollEvents::new();
        let Some(m) = self.measurement else {
            return events;
        };
        let offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
        let prev_phase = self.phase;
        let prev_section = self.current_section;

        let in_extra = offset >= m.extra_section_start && m.extra_section_height > 0.0;
        if in_extra {
            self.scroll_progress = 1.0;
            self.extra_scroll_progress =
                ((offset - m.extra_section_start) / m.extra_section_height).min(1.0) as f32;
            if !self.triggered {
                self.phase = ScrollPhase::Extra;
            }
        } else {
            self.scroll_progress = (offset / m.normal_sections_height).min(1.0) as f32;
            self.extra_scroll_progress = 0.0;
            let per_section = m.viewport_height * VIEWPORTS_PER_SECTION;
            self.current_section =
                ((offset / per_section).floor() as usize).min(self.section_count - 1);
            if !self.triggered {
                self.phase = ScrollPhase::Normal;
            }
        }

        if self.current_section != prev_section {
            events.push(ScrollEvent::SectionChanged {
                from: prev_section,
                to: self.current_section,
            });
        }

        if self.extra_scroll_progress >= 1.0 && !self.triggered {
            self.triggered = true;
            self.phase = ScrollPhase::Wormhole;
            log::info!("[scroll] wormhole triggered at offset {:.0}", offset);
        }

        if self.phase != prev_phase {
            log::debug!("[scroll] phase {} -> {}", prev_phase, self.phase);
            events.push(ScrollEvent::PhaseChanged {
                from: prev_phase,
                to: self.phase,
            });
        }
        if self.triggered && prev_phase != ScrollPhase::Wormhole && self.phase == ScrollPhase::Wormhole
        {
            events.push(ScrollEvent::WormholeTriggered);
        }
        events
    }

    /// Return to the top of the page state and re-arm the trigger.
    pub fn reset(&mut self) {
        self.scroll_progress = 0.0;
        self.extra_scroll_progress = 0.0;
        self.current_section = 0;
        self.phase = ScrollPhase::Normal;
        self.triggered = false;
        self.last_update_ms = None;
    }
}

/// Index of the section named by a location hash (with or without `#`).
pub fn section_for_hash(hash: &str) -> Option<usize> {
    let id = hash.trim_start_matches('#');
    SECTION_IDS.iter().position(|s| *s == id)
}

/// Scroll offset at which a section begins.
pub fn section_scroll_target(index: usize, viewport_height: f64) -> f64 {
    index as f64 * viewport_height * VIEWPORTS_PER_SECTION
}
