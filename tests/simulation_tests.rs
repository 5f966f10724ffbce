//! End-to-end tests driving `SimulationState` through input events.
//!
//! Everything here runs headless with a seeded RNG.

use particle_box::motion;
use particle_box::particle::{MAX_RANGE, MAX_SPEED, MIN_RANGE, MIN_SPEED};
use particle_box::prelude::*;

// ============================================================================
// Helpers
// ============================================================================

fn config_with_initial(min: usize, spread: usize) -> SimConfig {
    let mut config = SimConfig::default();
    config.spawn.initial = SpawnCount::new(min, spread);
    config
}

/// A running simulation with the instructions dismissed.
fn running(config: SimConfig, seed: u64) -> SimulationState {
    let mut sim = SimulationState::with_seed(config, seed);
    sim.handle_event(InputEvent::ButtonDown(MouseButton::Left));
    sim.handle_event(InputEvent::ButtonUp(MouseButton::Left));
    sim
}

fn press(sim: &mut SimulationState, key: KeyCode) -> Option<Command> {
    let command = sim.handle_event(InputEvent::KeyDown(key));
    sim.handle_event(InputEvent::KeyUp(key));
    command
}

fn close(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() < eps
}

// ============================================================================
// Camera
// ============================================================================

#[test]
fn test_default_camera_looks_down_negative_z() {
    let sim = running(config_with_initial(0, 0), 1);
    let dir = sim.camera().look_direction();
    assert!(close(dir.x(), 0.0, 1e-5));
    assert!(close(dir.y(), 0.0, 1e-5));
    assert!(close(dir.z(), -1.0, 1e-5));
}

#[test]
fn test_one_forward_tick_moves_camera_to_6_9() {
    let mut sim = running(config_with_initial(0, 0), 1);
    sim.handle_event(InputEvent::KeyDown(KeyCode::W));
    sim.tick();

    let pos = sim.camera().position();
    assert!(close(pos.x(), 0.0, 1e-5));
    assert!(close(pos.y(), 0.0, 1e-5));
    assert!(close(pos.z(), 6.9, 1e-5));
}

#[test]
fn test_pitch_stays_clamped_under_extreme_mouse_motion() {
    let mut sim = running(config_with_initial(0, 0), 1);
    for dy in [-10_000.0, 5_000.0, 20_000.0, -3.0] {
        sim.handle_event(InputEvent::PointerMoved { dx: 7.0, dy });
        sim.tick();
        let pitch = sim.camera().pitch();
        assert!((-89.0..=89.0).contains(&pitch), "pitch {pitch}");
    }
}

#[test]
fn test_diagonal_movement_is_not_normalized() {
    let mut sim = running(config_with_initial(0, 0), 1);
    sim.handle_event(InputEvent::KeyDown(KeyCode::W));
    sim.handle_event(InputEvent::KeyDown(KeyCode::D));
    sim.tick();

    let moved = sim.camera().position().distance_to(Point3::new(0.0, 0.0, 7.0));
    assert!(close(moved, 0.1 * std::f32::consts::SQRT_2, 1e-5));
}

#[test]
fn test_camera_stays_inside_confinement_box() {
    let mut sim = running(config_with_initial(0, 0), 1);
    sim.handle_event(InputEvent::KeyDown(KeyCode::W));
    sim.handle_event(InputEvent::KeyDown(KeyCode::A));
    for _ in 0..500 {
        sim.tick();
    }
    let pos = sim.camera().position();
    assert!(pos.x() >= -4.7 && pos.x() <= 4.7);
    assert!(pos.z() >= 0.3 && pos.z() <= 9.7);
}

// ============================================================================
// Motion
// ============================================================================

#[test]
fn test_attract_in_range_highlights_and_accelerates() {
    let mut sim = running(config_with_initial(0, 0), 2);
    let focus = sim.camera().look_at_point();
    let start = Point3::new(focus.x() + 0.5, focus.y(), focus.z());
    sim.particles_mut()
        .push(Particle::new(start).with_range(1.0).with_size(10));

    sim.handle_event(InputEvent::ButtonDown(MouseButton::Left));
    sim.tick();

    let p = &sim.particles().as_slice()[0];
    assert!(p.highlighted);
    // One tick adds `speed`, then friction takes `size * friction`.
    assert!(close(p.velocity, p.speed() - 10.0 * p.friction, 1e-7));
    assert!(p.position.x() < start.x());
}

#[test]
fn test_influence_adds_exactly_speed() {
    let focus = Point3::new(0.0, 0.0, 6.0);
    let mut p = Particle::new(Point3::new(0.5, 0.0, 6.0)).with_range(1.0);
    p.velocity = 0.25;

    motion::apply_influence(&mut p, focus, Some(Force::Attract));

    assert!(p.highlighted);
    assert_eq!(p.velocity, 0.25 + p.speed());
}

#[test]
fn test_repel_pushes_away() {
    let mut sim = running(config_with_initial(0, 0), 3);
    let focus = sim.camera().look_at_point();
    let start = Point3::new(focus.x(), focus.y() + 0.5, focus.z());
    sim.particles_mut().push(Particle::new(start).with_range(1.0));

    sim.handle_event(InputEvent::ButtonDown(MouseButton::Right));
    sim.tick();

    let p = &sim.particles().as_slice()[0];
    assert!(p.highlighted);
    assert!(p.position.y() > start.y());
}

#[test]
fn test_highlight_clears_when_button_released() {
    let mut sim = running(config_with_initial(0, 0), 4);
    let focus = sim.camera().look_at_point();
    sim.particles_mut()
        .push(Particle::new(Point3::new(focus.x(), focus.y(), focus.z() - 0.2)).with_range(1.0));

    sim.handle_event(InputEvent::ButtonDown(MouseButton::Left));
    sim.tick();
    assert!(sim.particles().as_slice()[0].highlighted);

    sim.handle_event(InputEvent::ButtonUp(MouseButton::Left));
    sim.tick();
    assert!(!sim.particles().as_slice()[0].highlighted);
}

#[test]
fn test_particle_at_x5_reflects_next_tick() {
    let mut sim = running(config_with_initial(0, 0), 5);
    sim.particles_mut().push(
        Particle::new(Point3::new(5.0, 0.0, 5.0)).with_motion(Vector3::new(1.0, 0.0, 0.0), 1.0),
    );
    sim.tick();

    let p = &sim.particles().as_slice()[0];
    assert_eq!(p.direction.x(), -1.0);
}

#[test]
fn test_velocity_never_negative() {
    let mut sim = running(config_with_initial(300, 0), 6);
    for tick in 0..400 {
        match tick % 100 {
            0 => sim.handle_event(InputEvent::ButtonDown(MouseButton::Left)),
            30 => sim.handle_event(InputEvent::ButtonUp(MouseButton::Left)),
            50 => sim.handle_event(InputEvent::ButtonDown(MouseButton::Right)),
            80 => sim.handle_event(InputEvent::ButtonUp(MouseButton::Right)),
            _ => None,
        };
        sim.tick();
        assert!(sim.particles().iter().all(|p| p.velocity >= 0.0));
    }
}

// ============================================================================
// Collection commands
// ============================================================================

#[test]
fn test_startup_generates_between_2000_and_3000() {
    let sim = SimulationState::with_seed(SimConfig::default(), 7);
    let n = sim.particles().len();
    assert!((2000..3000).contains(&n), "count {n}");

    let mean_range =
        sim.particles().iter().map(|p| p.range() as f64).sum::<f64>() / n as f64;
    let mean_speed =
        sim.particles().iter().map(|p| p.speed() as f64).sum::<f64>() / n as f64;
    assert!(close(sim.particles().average_range(), mean_range as f32, 1e-4));
    assert!(close(sim.particles().average_speed(), mean_speed as f32, 1e-6));
}

#[test]
fn test_regenerate_replaces_and_batch_appends() {
    let mut config = config_with_initial(100, 0);
    config.spawn.batch = SpawnCount::new(20, 30);
    let mut sim = running(config, 8);
    assert_eq!(sim.particles().len(), 100);

    assert_eq!(press(&mut sim, KeyCode::G), Some(Command::SpawnBatch));
    let after_batch = sim.particles().len();
    assert!((120..150).contains(&after_batch));

    assert_eq!(press(&mut sim, KeyCode::R), Some(Command::Regenerate));
    assert_eq!(sim.particles().len(), 100);
}

#[test]
fn test_burst_particles_start_at_center() {
    let sim = SimulationState::with_seed(config_with_initial(50, 0), 9);
    let center = Point3::new(0.0, 0.0, 5.0);
    for p in sim.particles() {
        assert_eq!(p.position, center);
        assert!(p.velocity >= 0.0 && p.velocity < 2.0);
    }
}

#[test]
fn test_spawn_one_then_despawn_nearest() {
    let mut sim = running(config_with_initial(0, 0), 10);
    let focus = sim.camera().look_at_point();

    assert_eq!(press(&mut sim, KeyCode::N), Some(Command::SpawnOne));
    assert_eq!(sim.particles().len(), 1);
    assert_eq!(sim.particles().as_slice()[0].position, focus);

    assert_eq!(press(&mut sim, KeyCode::M), Some(Command::DespawnNearest));
    assert!(sim.particles().is_empty());
}

#[test]
fn test_spawn_and_despawn_do_not_fall_through() {
    let mut sim = running(config_with_initial(0, 0), 11);
    press(&mut sim, KeyCode::N);
    // Spawning must not also despawn or touch the HUD.
    assert_eq!(sim.particles().len(), 1);
    assert!(!sim.hud().is_visible());

    press(&mut sim, KeyCode::M);
    assert!(!sim.hud().is_visible());
}

#[test]
fn test_despawn_nearest_on_empty_is_noop() {
    let mut sim = running(config_with_initial(0, 0), 12);
    assert!(sim.particles().is_empty());
    assert_eq!(press(&mut sim, KeyCode::M), Some(Command::DespawnNearest));
    assert!(sim.particles().is_empty());
}

#[test]
fn test_despawn_picks_closest_to_look_at_point() {
    let mut sim = running(config_with_initial(0, 0), 13);
    let focus = sim.camera().look_at_point();
    sim.particles_mut()
        .push(Particle::new(Point3::new(focus.x() + 2.0, focus.y(), focus.z())).with_size(11));
    sim.particles_mut()
        .push(Particle::new(Point3::new(focus.x(), focus.y() - 0.3, focus.z())).with_size(12));
    sim.particles_mut()
        .push(Particle::new(Point3::new(focus.x(), focus.y(), focus.z() - 1.0)).with_size(13));

    press(&mut sim, KeyCode::M);

    let sizes: Vec<u32> = sim.particles().iter().map(|p| p.size).collect();
    assert_eq!(sizes, vec![11, 13]);
}

// ============================================================================
// Bulk adjustment
// ============================================================================

#[test]
fn test_range_and_speed_stay_clamped() {
    let mut sim = running(config_with_initial(200, 0), 14);

    for _ in 0..60 {
        press(&mut sim, KeyCode::Equal);
        press(&mut sim, KeyCode::Up);
    }
    assert!(sim.particles().iter().all(|p| p.range() == MAX_RANGE));
    assert!(sim.particles().iter().all(|p| p.speed() == MAX_SPEED));

    for _ in 0..60 {
        press(&mut sim, KeyCode::Minus);
        press(&mut sim, KeyCode::Down);
    }
    assert!(sim.particles().iter().all(|p| p.range() == MIN_RANGE));
    assert!(sim.particles().iter().all(|p| p.speed() == MIN_SPEED));
}

#[test]
fn test_adjustment_shows_summary_for_60_ticks() {
    let mut sim = running(config_with_initial(40, 0), 15);
    press(&mut sim, KeyCode::NumpadAdd);

    let summary = *sim.hud().summary();
    assert_eq!(summary.count, 40);
    assert!(close(summary.average_range, sim.particles().average_range(), 1e-6));

    for _ in 0..59 {
        sim.tick();
    }
    assert!(sim.hud_text().is_some());
    sim.tick();
    assert!(sim.hud_text().is_none());
}

#[test]
fn test_adjust_on_empty_collection_reports_zero() {
    let mut sim = running(config_with_initial(0, 0), 16);
    press(&mut sim, KeyCode::Up);
    let summary = *sim.hud().summary();
    assert_eq!(summary.average_speed, 0.0);
    assert_eq!(summary.count, 0);
}

// ============================================================================
// Pause and instructions
// ============================================================================

#[test]
fn test_pause_freezes_everything_but_the_hud() {
    let mut sim = running(config_with_initial(30, 0), 17);
    press(&mut sim, KeyCode::Up);
    let frames = sim.hud().frames_left();

    press(&mut sim, KeyCode::Space);
    assert!(sim.is_paused());

    let before: Vec<Point3> = sim.particles().iter().map(|p| p.position).collect();
    press(&mut sim, KeyCode::R);
    press(&mut sim, KeyCode::G);
    sim.handle_event(InputEvent::KeyDown(KeyCode::W));
    sim.tick();

    let after: Vec<Point3> = sim.particles().iter().map(|p| p.position).collect();
    assert_eq!(before, after);
    assert_eq!(sim.camera().position(), Point3::new(0.0, 0.0, 7.0));
    assert_eq!(sim.hud().frames_left(), frames - 1);
    assert!(sim.hud_text().unwrap_or_default().starts_with("Animation Paused\n\n"));

    press(&mut sim, KeyCode::Space);
    assert!(!sim.is_paused());
}

#[test]
fn test_instructions_dismissed_by_first_click_only() {
    let mut sim = SimulationState::with_seed(config_with_initial(0, 0), 18);
    assert!(sim.show_instructions());

    sim.handle_event(InputEvent::ButtonDown(MouseButton::Right));
    assert!(!sim.show_instructions());
    assert_eq!(sim.input().force(), None);

    sim.handle_event(InputEvent::ButtonDown(MouseButton::Right));
    assert_eq!(sim.input().force(), Some(Force::Repel));
}

#[test]
fn test_quit_command() {
    let mut sim = running(config_with_initial(0, 0), 19);
    assert!(!sim.quit_requested());
    assert_eq!(press(&mut sim, KeyCode::Q), Some(Command::Quit));
    assert!(sim.quit_requested());
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_same_seed_same_simulation() {
    let run = |seed| {
        let mut sim = running(config_with_initial(200, 100), seed);
        sim.handle_event(InputEvent::ButtonDown(MouseButton::Left));
        for _ in 0..30 {
            sim.tick();
        }
        press(&mut sim, KeyCode::G);
        press(&mut sim, KeyCode::N);
        sim.particles().as_slice().to_vec()
    };

    assert_eq!(run(77), run(77));
    assert_ne!(run(77).len(), 0);
}

#[test]
fn test_config_seed_is_used() {
    let mut config = config_with_initial(50, 50);
    config.seed = Some(123);
    let a = SimulationState::new(config.clone());
    let b = SimulationState::with_seed(config, 123);
    assert_eq!(a.particles().as_slice(), b.particles().as_slice());
}
