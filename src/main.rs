//! Incident Commander native entry point
//!
//! There is no native renderer; this runs a headless autopilot game at full
//! speed and logs what happens. Set `RUST_LOG=debug` to see every alert.

#[cfg(not(target_arch = "wasm32"))]
use incident_commander::sim::{Direction, Game, GameEvent, GamePhase, Position};
#[cfg(not(target_arch = "wasm32"))]
use incident_commander::{Clock, ManualClock, Settings, tick_interval_for_level};

/// Ticks before the demo gives up
#[cfg(not(target_arch = "wasm32"))]
const MAX_TICKS: u32 = 5_000;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Incident Commander (native) starting...");

    let settings = std::env::args()
        .nth(1)
        .and_then(|json| match Settings::from_json(&json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Ignoring bad settings ({}), using defaults", e);
                None
            }
        })
        .unwrap_or_default();

    // Simulated time: each tick advances the clock by the level's tick interval
    let clock = ManualClock::new();
    let mut game = Game::with_clock(&settings, clock.clone());

    let mut ticks = 0;
    while ticks < MAX_TICKS {
        if let Some(direction) = autopilot(&game) {
            game.set_direction(direction);
        }
        clock.advance(tick_interval_for_level(game.level()));

        for event in game.update() {
            if let GameEvent::LevelStarted { level } = event {
                println!("Reached level {} at {:.1}s", level, clock.now().as_secs_f32());
            }
        }
        ticks += 1;

        if game.phase() == GamePhase::GameOver || game.is_game_complete() {
            break;
        }
    }

    println!(
        "Finished after {} ticks: level {}, score {}, {:?}",
        ticks,
        game.level(),
        game.score(),
        game.phase()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser build drives the library directly; no binary entry point
}

/// Greedy steering: head for the nearest alert along any safe neighbour,
/// otherwise take whichever safe cell is available.
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(game: &Game<ManualClock>) -> Option<Direction> {
    let head = game.commander();
    let trail = game.trail();
    let obstacles = game.obstacles();
    let alerts = game.alerts();

    let is_safe = |pos: Position| {
        pos.x >= 0
            && pos.x < game.width()
            && pos.y >= 0
            && pos.y < game.height()
            && !trail.contains(&pos)
            && !obstacles.contains(&pos)
    };
    let distance = |a: Position, b: Position| (a.x - b.x).abs() + (a.y - b.y).abs();

    Direction::ALL
        .into_iter()
        .filter(|&dir| dir != game.direction().opposite())
        .filter(|&dir| is_safe(head.step(dir)))
        .min_by_key(|&dir| {
            let next = head.step(dir);
            alerts
                .iter()
                .map(|&alert| distance(next, alert))
                .min()
                .unwrap_or(0)
        })
}
