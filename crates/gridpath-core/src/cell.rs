//! The per-cell state tag.

/// The state of a single grid cell.
///
/// A cell starts out [`Unvisited`](CellState::Unvisited) and is repainted by
/// the search as it progresses: `Open` while it sits on the frontier,
/// `Closed` once fully expanded, `Path` when it lies on the reconstructed
/// route. `Start`, `End` and `Barrier` are placed by the caller and are never
/// repainted by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Unvisited,
    /// Discovered but not yet fully expanded (on the frontier).
    Open,
    /// Fully expanded; its best cost is final and it is never re-examined.
    Closed,
    Start,
    End,
    /// An obstacle. Never returned as a neighbor, never expanded.
    Barrier,
    /// Lies on the final reconstructed route.
    Path,
}

impl CellState {
    /// Whether this cell blocks movement.
    #[inline]
    pub fn is_barrier(self) -> bool {
        matches!(self, Self::Barrier)
    }

    /// Whether this is a transient search marking (cleared by a grid reset).
    #[inline]
    pub fn is_search_marking(self) -> bool {
        matches!(self, Self::Open | Self::Closed | Self::Path)
    }

    /// One-character rendering used by the map notation (see `Grid::parse`).
    pub fn glyph(self) -> char {
        match self {
            Self::Unvisited => '.',
            Self::Open => 'o',
            Self::Closed => 'x',
            Self::Start => 'S',
            Self::End => 'E',
            Self::Barrier => '#',
            Self::Path => '*',
        }
    }
}
