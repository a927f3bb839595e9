//! The A* search orchestrator.

use std::fmt;

use gridpath_core::{Grid, Movement, Point};
use log::{debug, warn};

use crate::context::Context;
use crate::frontier::{EmptyFrontier, PriorityFrontier};
use crate::observer::SearchObserver;
use crate::reconstruct;

/// Sentinel parent index marking the start of the predecessor chain.
pub(crate) const NO_PARENT: usize = usize::MAX;

/// Per-cell search record. Predecessors are index-based back-references:
/// they form a tree over the grid without taking ownership of any cell.
#[derive(Clone, Copy)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            parent: NO_PARENT,
            generation: 0,
            closed: false,
        }
    }
}

/// Outcome of a search run. All three variants are normal results;
/// see [`SearchError`] for the failure modes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchResult {
    /// The shortest route from start to end, both inclusive.
    PathFound(Vec<Point>),
    /// The frontier ran dry without reaching the end.
    NoPathExists,
    /// The run was aborted through its [`Context`].
    Cancelled,
}

/// Errors from [`AStarSearch::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The grid has no start or no end marker.
    MissingEndpoint,
    /// The frontier was empty where the loop structure guarantees it is not.
    /// Seeing this is a defect, not a property of the input.
    EmptyFrontier,
    /// The defensive expansion bound was exceeded.
    ExpansionLimit(usize),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEndpoint => {
                f.write_str("search requires both a start and an end marker")
            }
            Self::EmptyFrontier => f.write_str("internal error: empty frontier mid-loop"),
            Self::ExpansionLimit(n) => write!(f, "expansion limit of {n} cells exceeded"),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<EmptyFrontier> for SearchError {
    fn from(_: EmptyFrontier) -> Self {
        Self::EmptyFrontier
    }
}

/// Search configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarConfig {
    /// Movement model; orthogonal-only by default.
    pub movement: Movement,
    /// Defensive bound on the number of expanded cells. `None` (the
    /// default) relies on the finite grid for termination.
    pub max_expansions: Option<usize>,
}

/// The A* search engine.
///
/// Owns reusable per-cell node storage so repeated runs over grids of the
/// same size allocate nothing after warm-up; a generation counter lazily
/// invalidates stale records instead of clearing them.
#[derive(Default)]
pub struct AStarSearch {
    config: AStarConfig,
    nodes: Vec<Node>,
    generation: u32,
    frontier: PriorityFrontier,
    nbuf: Vec<Point>,
}

impl AStarSearch {
    /// Create a search engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a search engine with the given configuration.
    pub fn with_config(config: AStarConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &AStarConfig {
        &self.config
    }

    /// Run A* from the grid's start marker to its end marker.
    ///
    /// `heuristic` must never overestimate the true remaining cost
    /// ([`manhattan`](crate::manhattan) for cardinal movement,
    /// [`chebyshev`](crate::chebyshev) for diagonal). The observer receives
    /// every discovery and closure as it happens, and the final route cell
    /// by cell; the grid is repainted with `Open`/`Closed`/`Path` markings
    /// along the way. Fails fast with [`SearchError::MissingEndpoint`]
    /// before touching any state if either marker is absent.
    ///
    /// Taking the grid by `&mut` for the whole run is deliberate: no other
    /// code can alter barriers or endpoints while the search is active.
    pub fn run<H, O>(
        &mut self,
        grid: &mut Grid,
        heuristic: H,
        observer: &mut O,
        ctx: &Context,
    ) -> Result<SearchResult, SearchError>
    where
        H: Fn(Point, Point) -> i32,
        O: SearchObserver,
    {
        let (start, end) = match (grid.start(), grid.end()) {
            (Some(s), Some(e)) => (s, e),
            _ => return Err(SearchError::MissingEndpoint),
        };
        debug!("astar: {start} -> {end}, movement {:?}", self.config.movement);

        let width = grid.width() as usize;
        let len = grid.bounds().len();
        if self.nodes.len() < len {
            self.nodes.resize(len, Node::default());
        }
        // Bump the generation to lazily invalidate all records.
        self.generation = self.generation.wrapping_add(1);
        let cur_gen = self.generation;
        self.frontier.clear();

        let idx = |p: Point| (p.y as usize) * width + (p.x as usize);

        let si = idx(start);
        self.nodes[si] = Node {
            g: 0,
            parent: NO_PARENT,
            generation: cur_gen,
            closed: false,
        };
        self.frontier.push(start, heuristic(start, end));

        let mut expansions = 0usize;

        loop {
            // Step boundary: honour a cooperative abort before anything else.
            if ctx.is_done() {
                debug!("astar: cancelled after {expansions} expansions");
                return Ok(SearchResult::Cancelled);
            }
            if self.frontier.is_empty() {
                debug!("astar: frontier exhausted after {expansions} expansions");
                return Ok(SearchResult::NoPathExists);
            }
            let (current, _f) = self.frontier.pop_min()?;
            let ci = idx(current);

            // Skip stale duplicates left behind by later, better pushes.
            if self.nodes[ci].closed {
                continue;
            }

            if current == end {
                let path = reconstruct::walk(&self.nodes, width, ci);
                debug!(
                    "astar: path of {} moves after {expansions} expansions",
                    path.len() - 1
                );
                for &p in &path {
                    grid.mark_path(p);
                    observer.path_cell(p);
                }
                return Ok(SearchResult::PathFound(path));
            }

            self.nodes[ci].closed = true;
            grid.mark_closed(current);
            observer.cell_closed(current);

            expansions += 1;
            if let Some(limit) = self.config.max_expansions {
                if expansions > limit {
                    warn!("astar: expansion limit of {limit} exceeded");
                    return Err(SearchError::ExpansionLimit(limit));
                }
            }

            let current_g = self.nodes[ci].g;
            self.nbuf.clear();
            grid.neighbors(current, self.config.movement, &mut self.nbuf);

            for &np in &self.nbuf {
                let ni = idx(np);
                // Uniform step cost.
                let tentative = current_g + 1;

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    if n.closed || tentative >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                    n.closed = false;
                }

                n.g = tentative;
                n.parent = ci;
                self.frontier.push(np, tentative + heuristic(np, end));
                grid.mark_open(np);
                observer.cell_discovered(np);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::manhattan;
    use crate::observer::TraceRecorder;
    use gridpath_core::CellState;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    fn run(grid: &mut Grid) -> Result<SearchResult, SearchError> {
        AStarSearch::new().run(grid, manhattan, &mut (), &Context::new())
    }

    fn path_of(result: SearchResult) -> Vec<Point> {
        match result {
            SearchResult::PathFound(p) => p,
            other => panic!("expected a path, got {other:?}"),
        }
    }

    /// Every consecutive pair is grid-adjacent under cardinal movement and
    /// none of the cells is a barrier.
    fn assert_valid_path(grid: &Grid, path: &[Point]) {
        assert!(!path.is_empty());
        for p in path {
            assert_ne!(grid.state(*p), Some(CellState::Barrier), "{p} is a barrier");
        }
        for w in path.windows(2) {
            assert_eq!(manhattan(w[0], w[1]), 1, "{} and {} not adjacent", w[0], w[1]);
        }
    }

    #[test]
    fn missing_endpoint_fails_fast() {
        let mut g = Grid::new(3, 3);
        g.set_start(Point::new(0, 0)).unwrap();
        assert_eq!(run(&mut g), Err(SearchError::MissingEndpoint));
        // No search markings were painted.
        assert!(g.iter().all(|(_, s)| !s.is_search_marking()));
    }

    #[test]
    fn open_grid_path_length_equals_manhattan_distance() {
        let mut g = Grid::new(7, 5);
        g.set_start(Point::new(1, 4)).unwrap();
        g.set_end(Point::new(6, 0)).unwrap();
        let path = path_of(run(&mut g).unwrap());
        assert_eq!(path.len() - 1, 9);
        assert_eq!(path[0], Point::new(1, 4));
        assert_eq!(*path.last().unwrap(), Point::new(6, 0));
        assert_valid_path(&g, &path);
    }

    #[test]
    fn start_equals_end_is_a_single_cell_path() {
        let mut g = Grid::new(3, 3);
        g.set_start(Point::new(1, 1)).unwrap();
        g.set_end(Point::new(1, 1)).unwrap();
        let path = path_of(run(&mut g).unwrap());
        assert_eq!(path, vec![Point::new(1, 1)]);
    }

    #[test]
    fn adjacent_endpoints_yield_one_move() {
        let mut g = Grid::new(3, 3);
        g.set_start(Point::new(0, 0)).unwrap();
        g.set_end(Point::new(1, 0)).unwrap();
        let path = path_of(run(&mut g).unwrap());
        assert_eq!(path, vec![Point::new(0, 0), Point::new(1, 0)]);
    }

    #[test]
    fn enclosed_end_has_no_path() {
        let mut g = Grid::parse(
            "S....\n\
             .###.\n\
             .#E#.\n\
             .###.\n\
             .....",
        )
        .unwrap();
        assert_eq!(run(&mut g), Ok(SearchResult::NoPathExists));
    }

    #[test]
    fn wall_with_gap_routes_through_the_gap() {
        // Vertical wall at x = 2, rows 0..=3; only row 4 is open.
        let mut g = Grid::parse(
            "S.#..\n\
             ..#..\n\
             ..#..\n\
             ..#..\n\
             ....E",
        )
        .unwrap();
        let path = path_of(run(&mut g).unwrap());
        assert_eq!(path.len() - 1, 8);
        assert!(path.contains(&Point::new(2, 4)));
        assert_valid_path(&g, &path);
    }

    #[test]
    fn center_barrier_detour_costs_nothing_extra() {
        let mut g = Grid::parse(
            "S..\n\
             .#.\n\
             ..E",
        )
        .unwrap();
        let path = path_of(run(&mut g).unwrap());
        assert_eq!(path.len() - 1, 4);
        assert_valid_path(&g, &path);
        assert!(!path.contains(&Point::new(1, 1)));
    }

    #[test]
    fn repeated_runs_return_the_same_path() {
        // An open grid is full of equal-f ties; the insertion-sequence
        // tie-break must make the outcome repeatable.
        let mut search = AStarSearch::new();
        let ctx = Context::new();
        let mut first = None;
        for _ in 0..3 {
            let mut g = Grid::new(6, 6);
            g.set_start(Point::new(0, 5)).unwrap();
            g.set_end(Point::new(5, 0)).unwrap();
            let result = search.run(&mut g, manhattan, &mut (), &ctx).unwrap();
            let path = path_of(result);
            match &first {
                None => first = Some(path),
                Some(p) => assert_eq!(*p, path),
            }
        }
    }

    #[test]
    fn cancelled_context_aborts_promptly() {
        let mut g = Grid::new(10, 10);
        g.set_start(Point::new(0, 0)).unwrap();
        g.set_end(Point::new(9, 9)).unwrap();
        let ctx = Context::new();
        ctx.cancel();
        let mut rec = TraceRecorder::new();
        let result = AStarSearch::new().run(&mut g, manhattan, &mut rec, &ctx);
        assert_eq!(result, Ok(SearchResult::Cancelled));
        assert!(rec.closed.is_empty());
    }

    #[test]
    fn expansion_limit_surfaces_as_an_error() {
        let mut g = Grid::new(10, 10);
        g.set_start(Point::new(0, 0)).unwrap();
        g.set_end(Point::new(9, 9)).unwrap();
        let mut search = AStarSearch::with_config(AStarConfig {
            max_expansions: Some(3),
            ..AStarConfig::default()
        });
        let result = search.run(&mut g, manhattan, &mut (), &Context::new());
        assert_eq!(result, Err(SearchError::ExpansionLimit(3)));
    }

    #[test]
    fn observer_sees_the_route_and_the_closures() {
        let mut g = Grid::parse(
            "S.#..\n\
             ..#..\n\
             ..#..\n\
             ..#..\n\
             ....E",
        )
        .unwrap();
        let mut rec = TraceRecorder::new();
        let result = AStarSearch::new()
            .run(&mut g, manhattan, &mut rec, &Context::new())
            .unwrap();
        let path = path_of(result);
        assert_eq!(rec.path, path);
        assert!(!rec.closed.is_empty());
        assert!(!rec.discovered.is_empty());
        // The start is the first closure reported.
        assert_eq!(rec.closed[0], Point::new(0, 0));
    }

    #[test]
    fn grid_is_painted_and_reset_clears_it() {
        let mut g = Grid::parse(
            "S.#..\n\
             ..#..\n\
             ..#..\n\
             ..#..\n\
             ....E",
        )
        .unwrap();
        let path = path_of(run(&mut g).unwrap());
        // Interior route cells carry the Path marking.
        for &p in &path[1..path.len() - 1] {
            assert_eq!(g.state(p), Some(CellState::Path));
        }
        g.reset();
        for (p, s) in g.iter() {
            match s {
                CellState::Barrier => assert_eq!(p.x, 2),
                CellState::Start => assert_eq!(p, Point::new(0, 0)),
                CellState::End => assert_eq!(p, Point::new(4, 4)),
                other => assert_eq!(other, CellState::Unvisited),
            }
        }
    }

    #[test]
    fn diagonal_movement_shortens_the_route() {
        let mut g = Grid::new(5, 5);
        g.set_start(Point::new(0, 0)).unwrap();
        g.set_end(Point::new(4, 4)).unwrap();
        let mut search = AStarSearch::with_config(AStarConfig {
            movement: Movement::Diagonal,
            ..AStarConfig::default()
        });
        let result = search
            .run(&mut g, crate::distance::chebyshev, &mut (), &Context::new())
            .unwrap();
        let path = path_of(result);
        assert_eq!(path.len() - 1, 4);
    }

    #[test]
    fn random_grids_yield_valid_paths() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut search = AStarSearch::new();
        let ctx = Context::new();
        for _ in 0..50 {
            let mut g = Grid::new(12, 12);
            for p in g.bounds().iter() {
                if rng.random_range(0..100) < 25 {
                    g.set_barrier(p).unwrap();
                }
            }
            let start = Point::new(0, 0);
            let end = Point::new(11, 11);
            g.set_start(start).unwrap();
            g.set_end(end).unwrap();
            match search.run(&mut g, manhattan, &mut (), &ctx).unwrap() {
                SearchResult::PathFound(path) => {
                    assert_eq!(path[0], start);
                    assert_eq!(*path.last().unwrap(), end);
                    assert_valid_path(&g, &path);
                    // Optimality lower bound from the admissible heuristic.
                    assert!(path.len() - 1 >= manhattan(start, end) as usize);
                }
                SearchResult::NoPathExists => {}
                SearchResult::Cancelled => unreachable!(),
            }
            g.reset();
        }
    }
}
