//! The progress-observer seam between the search and a presentation shell.

use gridpath_core::Point;

/// Receives search progress, one notification per step.
///
/// This replaces a direct redraw hook: the shell implements it to color
/// cells as the search runs (frontier vs. visited vs. final route) without
/// the search depending on any rendering or event-loop runtime. All methods
/// default to no-ops; `()` implements the trait for callers that don't
/// trace.
pub trait SearchObserver {
    /// A cell was discovered or its cost improved (it joined the frontier).
    fn cell_discovered(&mut self, _pos: Point) {}

    /// A cell was fully expanded and will never be re-examined.
    fn cell_closed(&mut self, _pos: Point) {}

    /// A cell of the final route, streamed in start→end order.
    fn path_cell(&mut self, _pos: Point) {}
}

impl SearchObserver for () {}

/// An observer that records every notification in order.
///
/// Useful for headless tracing and in tests.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    pub discovered: Vec<Point>,
    pub closed: Vec<Point>,
    pub path: Vec<Point>,
}

impl TraceRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SearchObserver for TraceRecorder {
    fn cell_discovered(&mut self, pos: Point) {
        self.discovered.push(pos);
    }

    fn cell_closed(&mut self, pos: Point) {
        self.closed.push(pos);
    }

    fn path_cell(&mut self, pos: Point) {
        self.path.push(pos);
    }
}
