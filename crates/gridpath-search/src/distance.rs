use gridpath_core::Point;

/// Manhattan (L1) distance between two points.
///
/// Admissible and consistent for uniform-cost 4-directional movement, which
/// makes it the default A* heuristic here.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
///
/// The matching admissible heuristic when diagonal movement is enabled.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}
