//! Level layouts and random placement
//!
//! The layout kind is fixed per level; cell choice within a layout comes
//! from the engine's seeded RNG, so a seed reproduces the same levels.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{Board, Position};
use crate::consts::*;

/// Obstacle layout used by a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelLayout {
    /// Open grid
    Open,
    /// Barrier lines around the center
    Barriers,
    /// Barrier lines plus random obstacles
    BarriersAndRandom { count: u32 },
    /// Random obstacles only
    Random { count: u32 },
    /// Lattice maze
    Maze,
}

impl LevelLayout {
    pub fn for_level(level: u32) -> Self {
        match level {
            3 | 4 => LevelLayout::Barriers,
            5 | 6 => LevelLayout::BarriersAndRandom { count: 2 },
            7 | 8 => LevelLayout::Random { count: 4 },
            9 | 10 => LevelLayout::Maze,
            _ => LevelLayout::Open,
        }
    }
}

/// Lay out obstacles for `level` on top of the current board
pub fn setup_level(board: &mut Board, level: u32, rng: &mut impl Rng) {
    match LevelLayout::for_level(level) {
        LevelLayout::Open => {}
        LevelLayout::Barriers => add_static_barriers(board),
        LevelLayout::BarriersAndRandom { count } => {
            add_static_barriers(board);
            add_random_obstacles(board, count, rng);
        }
        LevelLayout::Random { count } => {
            add_random_obstacles(board, count, rng);
        }
        LevelLayout::Maze => add_maze_layout(board, rng),
    }
}

/// Two horizontal and two vertical barrier lines, `BARRIER_OFFSET` cells
/// from the center, broken around the safe zone.
pub fn add_static_barriers(board: &mut Board) {
    let center = board.center();

    for x in MAZE_MARGIN..board.width - MAZE_MARGIN {
        if (x - center.x).abs() <= SAFE_ZONE_RADIUS {
            continue;
        }
        push_barrier(board, Position::new(x, center.y - BARRIER_OFFSET));
        push_barrier(board, Position::new(x, center.y + BARRIER_OFFSET));
    }

    for y in MAZE_MARGIN..board.height - MAZE_MARGIN {
        if (y - center.y).abs() <= SAFE_ZONE_RADIUS {
            continue;
        }
        push_barrier(board, Position::new(center.x - BARRIER_OFFSET, y));
        push_barrier(board, Position::new(center.x + BARRIER_OFFSET, y));
    }
}

// Lines cross at the corners; keep one obstacle per cell
fn push_barrier(board: &mut Board, pos: Position) {
    if board.in_bounds(pos) && !board.obstacles.contains(&pos) {
        board.obstacles.push(pos);
    }
}

/// Best effort: each obstacle gets `OBSTACLE_ATTEMPTS` random cells and is
/// skipped if none is free and outside the safe zone. Returns how many landed.
pub fn add_random_obstacles(board: &mut Board, count: u32, rng: &mut impl Rng) -> u32 {
    let mut placed = 0;

    for _ in 0..count {
        let spot = (0..OBSTACLE_ATTEMPTS)
            .map(|_| random_cell(board, rng))
            .find(|&pos| !board.in_safe_zone(pos) && !board.is_occupied(pos));

        match spot {
            Some(pos) => {
                board.obstacles.push(pos);
                placed += 1;
            }
            None => log::warn!(
                "No free cell for obstacle after {} attempts",
                OBSTACLE_ATTEMPTS
            ),
        }
    }

    placed
}

/// Obstacles on a lattice starting at `MAZE_MARGIN` with `MAZE_PITCH`
/// spacing, each with an optional connector to the right or below.
pub fn add_maze_layout(board: &mut Board, rng: &mut impl Rng) {
    for x in (MAZE_MARGIN..board.width - MAZE_MARGIN).step_by(MAZE_PITCH) {
        for y in (MAZE_MARGIN..board.height - MAZE_MARGIN).step_by(MAZE_PITCH) {
            let pos = Position::new(x, y);
            if board.in_safe_zone(pos) || board.is_occupied(pos) {
                continue;
            }
            board.obstacles.push(pos);

            let connector = if rng.random_bool(0.5) {
                Position::new(x + 1, y)
            } else {
                Position::new(x, y + 1)
            };
            if board.in_bounds(connector)
                && !board.is_occupied(connector)
                && !board.in_safe_zone(connector)
            {
                board.obstacles.push(connector);
            }
        }
    }
}

/// Top the board up to `ALERT_COUNT` alerts on free cells.
///
/// Alerts never share a cell with the commander, trail, obstacles or another
/// alert. Sampling is random; if it keeps missing, a scan of the free cells
/// picks one, and a full grid leaves the alert unspawned.
pub fn spawn_alerts(board: &mut Board, rng: &mut impl Rng) {
    let area = board.width.max(0) as u64 * board.height.max(0) as u64;
    let max_attempts = area.saturating_mul(ALERT_ATTEMPTS_PER_CELL as u64);

    while board.alerts.len() < ALERT_COUNT {
        let sampled = (0..max_attempts)
            .map(|_| random_cell(board, rng))
            .find(|&pos| is_free_for_alert(board, pos));

        let spot = sampled.or_else(|| {
            log::warn!("Alert sampling exhausted, scanning for a free cell");
            let free: Vec<Position> = all_cells(board)
                .filter(|&pos| is_free_for_alert(board, pos))
                .collect();
            free.choose(rng).copied()
        });

        match spot {
            Some(pos) => board.alerts.push(pos),
            None => {
                log::warn!("Grid is full, {} alerts on board", board.alerts.len());
                break;
            }
        }
    }
}

fn is_free_for_alert(board: &Board, pos: Position) -> bool {
    !board.is_occupied(pos) && !board.alerts.contains(&pos)
}

fn random_cell(board: &Board, rng: &mut impl Rng) -> Position {
    Position::new(
        rng.random_range(0..board.width),
        rng.random_range(0..board.height),
    )
}

fn all_cells(board: &Board) -> impl Iterator<Item = Position> + '_ {
    (0..board.height).flat_map(move |y| (0..board.width).map(move |x| Position::new(x, y)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(12345)
    }

    #[test]
    fn test_layout_table() {
        assert_eq!(LevelLayout::for_level(1), LevelLayout::Open);
        assert_eq!(LevelLayout::for_level(2), LevelLayout::Open);
        assert_eq!(LevelLayout::for_level(3), LevelLayout::Barriers);
        assert_eq!(LevelLayout::for_level(4), LevelLayout::Barriers);
        assert_eq!(
            LevelLayout::for_level(6),
            LevelLayout::BarriersAndRandom { count: 2 }
        );
        assert_eq!(LevelLayout::for_level(7), LevelLayout::Random { count: 4 });
        assert_eq!(LevelLayout::for_level(9), LevelLayout::Maze);
        assert_eq!(LevelLayout::for_level(10), LevelLayout::Maze);
    }

    #[test]
    fn test_setup_level_dispatches_layouts() {
        let mut rng = rng();

        let mut open = Board::new(20, 20);
        setup_level(&mut open, 2, &mut rng);
        assert!(open.obstacles.is_empty());

        let mut random = Board::new(20, 20);
        setup_level(&mut random, 7, &mut rng);
        assert_eq!(random.obstacles.len(), 4);

        let mut barriers = Board::new(20, 20);
        add_static_barriers(&mut barriers);
        let mut mixed = Board::new(20, 20);
        setup_level(&mut mixed, 5, &mut rng);
        assert_eq!(mixed.obstacles.len(), barriers.obstacles.len() + 2);
    }

    #[test]
    fn test_static_barriers_shape() {
        let mut board = Board::new(20, 20);
        add_static_barriers(&mut board);

        // Lines at y = 6 and 14, x = 6 and 14
        assert!(board.obstacles.contains(&Position::new(2, 6)));
        assert!(board.obstacles.contains(&Position::new(17, 14)));
        assert!(board.obstacles.contains(&Position::new(6, 2)));
        assert!(board.obstacles.contains(&Position::new(14, 17)));
        // Gap around the center column/row
        assert!(!board.obstacles.contains(&Position::new(10, 6)));
        assert!(!board.obstacles.contains(&Position::new(6, 10)));
        // Margin
        assert!(!board.obstacles.contains(&Position::new(1, 6)));
        assert!(!board.obstacles.contains(&Position::new(18, 6)));

        for obstacle in &board.obstacles {
            assert!(!board.in_safe_zone(*obstacle));
        }

        let mut unique = board.obstacles.clone();
        unique.sort_by_key(|p| (p.x, p.y));
        unique.dedup();
        assert_eq!(unique.len(), board.obstacles.len());
    }

    #[test]
    fn test_random_obstacles_avoid_safe_zone_and_trail() {
        let mut rng = rng();
        for _ in 0..20 {
            let mut board = Board::new(20, 20);
            board.trail.push(Position::new(0, 0));
            let placed = add_random_obstacles(&mut board, 4, &mut rng);

            assert_eq!(placed, 4);
            assert_eq!(board.obstacles.len(), 4);
            for obstacle in &board.obstacles {
                assert!(!board.in_safe_zone(*obstacle));
                assert_ne!(*obstacle, Position::new(0, 0));
            }
        }
    }

    #[test]
    fn test_random_obstacles_give_up_when_no_room() {
        // 5x5 grid is entirely safe zone
        let mut board = Board::new(5, 5);
        let placed = add_random_obstacles(&mut board, 3, &mut rng());
        assert_eq!(placed, 0);
        assert!(board.obstacles.is_empty());
    }

    #[test]
    fn test_maze_lattice() {
        let mut board = Board::new(20, 20);
        add_maze_layout(&mut board, &mut rng());

        // Lattice points outside the safe zone are always placed
        for x in [2, 6, 14] {
            for y in [2, 6, 14] {
                assert!(board.obstacles.contains(&Position::new(x, y)));
            }
        }
        // (10, 10) is the spawn point
        assert!(!board.obstacles.contains(&Position::new(10, 10)));

        for obstacle in &board.obstacles {
            assert!(board.in_bounds(*obstacle));
            assert!(!board.in_safe_zone(*obstacle));
        }
    }

    #[test]
    fn test_spawn_alerts_fills_to_count() {
        let mut board = Board::new(20, 20);
        board.obstacles.push(Position::new(3, 3));
        spawn_alerts(&mut board, &mut rng());

        assert_eq!(board.alerts.len(), ALERT_COUNT);
        for (i, alert) in board.alerts.iter().enumerate() {
            assert!(!board.is_occupied(*alert));
            assert!(!board.alerts[i + 1..].contains(alert));
        }
    }

    #[test]
    fn test_spawn_alerts_on_huge_grid() {
        // width * height does not fit in an i32
        let mut board = Board::new(50_000, 50_000);
        spawn_alerts(&mut board, &mut rng());

        assert_eq!(board.alerts.len(), ALERT_COUNT);
        for alert in &board.alerts {
            assert!(board.in_bounds(*alert));
            assert!(!board.is_occupied(*alert));
        }
    }

    #[test]
    fn test_spawn_alerts_uses_last_free_cells() {
        // Fill everything but two cells
        let mut board = Board::new(3, 3);
        board.commander = Position::new(0, 0);
        for y in 0..3 {
            for x in 0..3 {
                let pos = Position::new(x, y);
                if pos != board.commander && pos != Position::new(2, 2) && pos != Position::new(1, 2) {
                    board.trail.push(pos);
                }
            }
        }

        spawn_alerts(&mut board, &mut rng());
        assert_eq!(board.alerts.len(), 2);
        assert!(board.alerts.contains(&Position::new(2, 2)));
        assert!(board.alerts.contains(&Position::new(1, 2)));
    }
}
