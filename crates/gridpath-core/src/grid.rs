//! The [`Grid`]: a fixed-size 2D container of [`CellState`] values with the
//! mutation API used by a presentation shell (barriers, endpoints, reset)
//! and on-demand neighbor enumeration used by the search.

use std::fmt;

use crate::cell::CellState;
use crate::geom::{Point, Range};

/// Movement model for neighbor enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Movement {
    /// 4-directional (orthogonal) movement. The default.
    #[default]
    Cardinal,
    /// 8-directional movement including diagonals.
    Diagonal,
}

/// Errors from grid construction and mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A coordinate outside the grid bounds.
    InvalidPosition(Point),
    /// Map notation lines have inconsistent widths.
    InconsistentSize(String),
    /// A character not in the map notation was found.
    InvalidGlyph { ch: char, pos: Point },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPosition(p) => write!(f, "position {p} is out of bounds"),
            Self::InconsistentSize(s) => write!(f, "map has inconsistent line widths:\n{s}"),
            Self::InvalidGlyph { ch, pos } => {
                write!(f, "map contains invalid glyph \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// A 2D grid of [`CellState`] values with fixed dimensions.
///
/// The grid is the sole owner of all cell state. The search reads barriers
/// through [`neighbors`](Grid::neighbors) and paints progress through the
/// `mark_*` methods; predecessor links live in the search, not here.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<CellState>,
    bounds: Range,
    start: Option<Point>,
    end: Option<Point>,
}

impl Grid {
    /// Create a new grid with every cell [`CellState::Unvisited`].
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            cells: vec![CellState::default(); bounds.len()],
            bounds,
            start: None,
            end: None,
        }
    }

    /// Parse a grid from map notation: one line per row, `.` unvisited,
    /// `#` barrier, `S` start, `E` end.
    ///
    /// Repeated `S`/`E` glyphs follow the same last-write-wins rule as
    /// [`set_start`](Grid::set_start) / [`set_end`](Grid::set_end).
    pub fn parse(map: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = map.lines().collect();
        let height = lines.len() as i32;
        let width = lines.first().map_or(0, |l| l.chars().count()) as i32;
        let mut grid = Self::new(width, height);
        for (y, line) in lines.iter().enumerate() {
            if line.chars().count() as i32 != width {
                return Err(GridError::InconsistentSize(map.to_string()));
            }
            for (x, ch) in line.chars().enumerate() {
                let p = Point::new(x as i32, y as i32);
                match ch {
                    '.' => {}
                    '#' => grid.set_barrier(p)?,
                    'S' => grid.set_start(p)?,
                    'E' => grid.set_end(p)?,
                    _ => return Err(GridError::InvalidGlyph { ch, pos: p }),
                }
            }
        }
        Ok(grid)
    }

    /// The bounding range of the grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Grid width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Grid height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// The current start marker, if one is placed.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// The current end marker, if one is placed.
    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// The state at `p`, or `None` if out of bounds.
    pub fn state(&self, p: Point) -> Option<CellState> {
        self.idx(p).map(|i| self.cells[i])
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.y * self.bounds.width() + p.x) as usize)
    }

    fn checked_idx(&self, p: Point) -> Result<usize, GridError> {
        self.idx(p).ok_or(GridError::InvalidPosition(p))
    }

    // -----------------------------------------------------------------------
    // Mutation API (between runs)
    // -----------------------------------------------------------------------

    /// Place a barrier at `p`. Overwrites whatever is there, dropping the
    /// start/end marker if `p` held one (last write wins).
    pub fn set_barrier(&mut self, p: Point) -> Result<(), GridError> {
        let i = self.checked_idx(p)?;
        if self.start == Some(p) {
            self.start = None;
        }
        if self.end == Some(p) {
            self.end = None;
        }
        self.cells[i] = CellState::Barrier;
        Ok(())
    }

    /// Remove a barrier at `p`, returning the cell to `Unvisited`.
    /// Leaves non-barrier cells untouched.
    pub fn clear_barrier(&mut self, p: Point) -> Result<(), GridError> {
        let i = self.checked_idx(p)?;
        if self.cells[i] == CellState::Barrier {
            self.cells[i] = CellState::Unvisited;
        }
        Ok(())
    }

    /// Place the start marker at `p`, clearing any previous start marker
    /// elsewhere. At most one start exists at a time.
    ///
    /// The markers themselves are authoritative for the search; placing the
    /// start on the end cell is allowed (a start-equals-end search returns a
    /// single-cell path) and the cell shows whichever glyph came last.
    pub fn set_start(&mut self, p: Point) -> Result<(), GridError> {
        let i = self.checked_idx(p)?;
        if let Some(old) = self.start.take() {
            if let Some(oi) = self.idx(old) {
                // A coincident end marker keeps its cell.
                self.cells[oi] = if self.end == Some(old) {
                    CellState::End
                } else {
                    CellState::Unvisited
                };
            }
        }
        self.cells[i] = CellState::Start;
        self.start = Some(p);
        Ok(())
    }

    /// Place the end marker at `p`, clearing any previous end marker
    /// elsewhere. At most one end exists at a time. See
    /// [`set_start`](Grid::set_start) for the coincident-marker rule.
    pub fn set_end(&mut self, p: Point) -> Result<(), GridError> {
        let i = self.checked_idx(p)?;
        if let Some(old) = self.end.take() {
            if let Some(oi) = self.idx(old) {
                // A coincident start marker keeps its cell.
                self.cells[oi] = if self.start == Some(old) {
                    CellState::Start
                } else {
                    CellState::Unvisited
                };
            }
        }
        self.cells[i] = CellState::End;
        self.end = Some(p);
        Ok(())
    }

    /// Clear transient search markings (`Open`/`Closed`/`Path`) back to
    /// `Unvisited`. Barriers and the start/end markers persist, so an
    /// identical run can be repeated. [`clear`](Grid::clear) is the full wipe.
    pub fn reset(&mut self) {
        for c in self.cells.iter_mut() {
            if c.is_search_marking() {
                *c = CellState::Unvisited;
            }
        }
    }

    /// Return every cell to `Unvisited` and drop the start/end markers.
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Unvisited);
        self.start = None;
        self.end = None;
    }

    // -----------------------------------------------------------------------
    // Search-facing API
    // -----------------------------------------------------------------------

    /// Append the in-bounds, non-barrier neighbors of `p` to `buf`.
    ///
    /// Recomputed on every call: barrier status may change between runs, so
    /// adjacency is never cached. Appends nothing if `p` itself is out of
    /// bounds.
    pub fn neighbors(&self, p: Point, movement: Movement, buf: &mut Vec<Point>) {
        if !self.bounds.contains(p) {
            return;
        }
        let keep = |n: Point| match self.state(n) {
            Some(s) => !s.is_barrier(),
            None => false,
        };
        match movement {
            Movement::Cardinal => buf.extend(p.neighbors_4().into_iter().filter(|&n| keep(n))),
            Movement::Diagonal => buf.extend(p.neighbors_8().into_iter().filter(|&n| keep(n))),
        }
    }

    /// Mark `p` as discovered (on the frontier). No-op on endpoints and
    /// barriers, so their markers are never repainted.
    pub fn mark_open(&mut self, p: Point) {
        self.mark(p, CellState::Open);
    }

    /// Mark `p` as fully expanded. No-op on endpoints and barriers.
    pub fn mark_closed(&mut self, p: Point) {
        self.mark(p, CellState::Closed);
    }

    /// Mark `p` as part of the final route. No-op on endpoints and barriers.
    pub fn mark_path(&mut self, p: Point) {
        self.mark(p, CellState::Path);
    }

    fn mark(&mut self, p: Point, state: CellState) {
        if let Some(i) = self.idx(p) {
            match self.cells[i] {
                CellState::Start | CellState::End | CellState::Barrier => {}
                _ => self.cells[i] = state,
            }
        }
    }

    /// Iterate over `(Point, CellState)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, CellState)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }
}

impl fmt::Display for Grid {
    /// Renders the grid in map notation, one glyph per cell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in self.bounds.min.y..self.bounds.max.y {
            if y > self.bounds.min.y {
                writeln!(f)?;
            }
            for x in self.bounds.min.x..self.bounds.max.x {
                let s = self.state(Point::new(x, y)).unwrap_or_default();
                write!(f, "{}", s.glyph())?;
            }
        }
        Ok(())
    }
}
