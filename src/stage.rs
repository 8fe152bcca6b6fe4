use crate::core::scroll::ScrollTracker;
use crate::core::smooth::SmoothScroll;
use crate::core::timeline::Stage;
use crate::overlay;
use std::cell::RefCell;
use web_sys as web;

/// Page-side effects of the wormhole sequence, borrowed for a single frame.
pub struct DomStage<'a> {
    pub document: &'a web::Document,
    pub container: &'a web::Element,
    pub tracker: &'a mut ScrollTracker,
    pub smooth: &'a RefCell<SmoothScroll>,
}

impl Stage for DomStage<'_> {
    fn set_ui_visible(&mut self, visible: bool) {
        if visible {
            overlay::show(self.document);
        } else {
            overlay::hide(self.document);
        }
    }

    fn stop_scroll(&mut self) {
        self.smooth.borrow_mut().stop();
        overlay::set_scroll_locked(self.document, true);
    }

    fn start_scroll(&mut self) {
        self.smooth.borrow_mut().start();
        overlay::set_scroll_locked(self.document, false);
    }

    fn scroll_to_top(&mut self) {
        self.smooth.borrow_mut().scroll_to(0.0, true);
        self.container.set_scroll_top(0);
    }

    fn reset_scroll_state(&mut self) {
        self.tracker.reset();
        overlay::set_venture_visible(self.document, false);
    }
}
