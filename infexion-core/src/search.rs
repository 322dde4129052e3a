//! Closest-pair selection and A* over the toroidal grid

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use crate::board::Hex;
use crate::error::SearchError;
use crate::game::{Action, Board, Color};

// ============================================================================
// PAIRING
// ============================================================================

/// Find the closest (Red, Blue) pair of tokens
///
/// Ranked by Euclidean distance on the raw `(r, q)` values, not by hex
/// distance. Both sides are scanned in `r`-then-`q` order and only a
/// strictly closer pair replaces the current best, so ties go to the first
/// pair in that order.
pub fn closest_pair(board: &Board) -> Result<(Hex, Hex), SearchError> {
    let own = board.cells_of(Color::Red);
    let opponents = board.cells_of(Color::Blue);

    if own.is_empty() {
        return Err(SearchError::EmptyColorClass(Color::Red));
    }
    if opponents.is_empty() {
        return Err(SearchError::EmptyColorClass(Color::Blue));
    }

    let mut best: Option<(i32, Hex, Hex)> = None;
    for &from in &own {
        for &to in &opponents {
            let d = raw_distance_squared(from, to);
            if best.map_or(true, |(best_d, _, _)| d < best_d) {
                best = Some((d, from, to));
            }
        }
    }

    best.map(|(_, from, to)| (from, to))
        .ok_or(SearchError::EmptyColorClass(Color::Blue))
}

/// Squared Euclidean distance; same ranking as the true distance
fn raw_distance_squared(a: Hex, b: Hex) -> i32 {
    let dr = a.r() as i32 - b.r() as i32;
    let dq = a.q() as i32 - b.q() as i32;
    dr * dr + dq * dq
}

// ============================================================================
// A* SEARCH
// ============================================================================

/// Shortest path from `start` to `goal`, both ends included
///
/// Every cell is a node and every wrapped neighbor an edge of cost 1;
/// tokens do not block. The frontier pops lowest `g + h`, then lowest `h`,
/// then lowest cell, so the result is deterministic.
pub fn shortest_path(start: Hex, goal: Hex) -> Vec<Hex> {
    let mut frontier: BinaryHeap<Reverse<(u8, u8, Hex)>> = BinaryHeap::new();
    let mut cost: FxHashMap<Hex, u8> = FxHashMap::default();
    let mut came_from: FxHashMap<Hex, Hex> = FxHashMap::default();

    let h = start.distance_to(goal);
    frontier.push(Reverse((h, h, start)));
    cost.insert(start, 0);

    while let Some(Reverse((f, h, current))) = frontier.pop() {
        if current == goal {
            break;
        }

        // Skip entries superseded by a cheaper route
        let g = f - h;
        if cost.get(&current).is_some_and(|&best| best < g) {
            continue;
        }

        for next in current.neighbors() {
            let new_cost = g + 1;
            if cost.get(&next).map_or(true, |&c| new_cost < c) {
                cost.insert(next, new_cost);
                came_from.insert(next, current);
                let h = next.distance_to(goal);
                frontier.push(Reverse((new_cost + h, h, next)));
            }
        }
    }

    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from.get(&current) {
            Some(&prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// Pick the next move: first step on the path between the closest pair
pub fn next_action(board: &Board) -> Result<Action, SearchError> {
    let (from, to) = closest_pair(board)?;
    let path = shortest_path(from, to);

    tracing::trace!("Path {} -> {}: {:?}", from, to, path);

    // Pair cells always differ in color, so the path has at least one edge
    let next = path.get(1).copied().unwrap_or(to);
    let direction = from
        .direction_to(next)
        .ok_or(SearchError::NotAdjacent { from, to: next })?;

    Ok(Action::new(from, direction))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Token;

    fn board(cells: &[((i32, i32), Color, u8)]) -> Board {
        Board::from_tokens(
            cells
                .iter()
                .map(|&((r, q), color, power)| (Hex::new(r, q), Token::new(color, power).unwrap())),
        )
        .unwrap()
    }

    fn assert_valid_path(path: &[Hex], start: Hex, goal: Hex) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        for pair in path.windows(2) {
            assert!(
                pair[0].neighbors().contains(&pair[1]),
                "{} and {} are not neighbors",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_closest_pair() {
        let b = board(&[
            ((5, 6), Color::Red, 2),
            ((1, 0), Color::Blue, 2),
            ((1, 1), Color::Blue, 1),
            ((3, 2), Color::Blue, 1),
            ((1, 3), Color::Blue, 3),
        ]);
        assert_eq!(closest_pair(&b).unwrap(), (Hex::new(5, 6), Hex::new(3, 2)));
    }

    #[test]
    fn test_closest_pair_uses_raw_distance() {
        // (0, 6) is one hex step from (0, 0) across the seam but far in raw terms
        let b = board(&[
            ((0, 0), Color::Red, 1),
            ((0, 6), Color::Blue, 1),
            ((2, 2), Color::Blue, 1),
        ]);
        assert_eq!(closest_pair(&b).unwrap().1, Hex::new(2, 2));
    }

    #[test]
    fn test_closest_pair_tie_break() {
        // Both blues are at raw distance 1; the lower (r, q) wins
        let b = board(&[
            ((3, 3), Color::Red, 1),
            ((3, 4), Color::Blue, 1),
            ((2, 3), Color::Blue, 1),
        ]);
        assert_eq!(closest_pair(&b).unwrap(), (Hex::new(3, 3), Hex::new(2, 3)));

        // Equal distances from two reds; the lower red wins
        let b = board(&[
            ((4, 4), Color::Red, 1),
            ((2, 4), Color::Red, 1),
            ((3, 4), Color::Blue, 1),
        ]);
        assert_eq!(closest_pair(&b).unwrap(), (Hex::new(2, 4), Hex::new(3, 4)));
    }

    #[test]
    fn test_closest_pair_empty_color() {
        let b = board(&[((0, 0), Color::Red, 1)]);
        assert!(matches!(
            closest_pair(&b),
            Err(SearchError::EmptyColorClass(Color::Blue))
        ));

        let b = board(&[((0, 0), Color::Blue, 1)]);
        assert!(matches!(
            closest_pair(&b),
            Err(SearchError::EmptyColorClass(Color::Red))
        ));
    }

    #[test]
    fn test_path_length_matches_distance() {
        for start in Hex::all() {
            for goal in Hex::all() {
                let path = shortest_path(start, goal);
                assert_eq!(path.len(), start.distance_to(goal) as usize + 1);
                assert_valid_path(&path, start, goal);
            }
        }
    }

    #[test]
    fn test_path_known_routes() {
        let path = shortest_path(Hex::new(0, 0), Hex::new(3, 1));
        assert_eq!(
            path,
            vec![Hex::new(0, 0), Hex::new(0, 1), Hex::new(1, 1), Hex::new(2, 1), Hex::new(3, 1)]
        );

        // Wraps through the corner
        let path = shortest_path(Hex::new(0, 0), Hex::new(6, 6));
        assert_eq!(path, vec![Hex::new(0, 0), Hex::new(0, 6), Hex::new(6, 6)]);
    }

    #[test]
    fn test_path_to_self() {
        let hex = Hex::new(2, 5);
        assert_eq!(shortest_path(hex, hex), vec![hex]);
    }

    #[test]
    fn test_next_action() {
        let b = board(&[((5, 6), Color::Red, 2), ((3, 2), Color::Blue, 1)]);
        let action = next_action(&b).unwrap();
        assert_eq!(action.to_tuple(), (5, 6, -1, 1));
    }
}
