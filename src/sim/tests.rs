//! Unit tests for the simulation step.

use std::time::Duration;

use approx::assert_relative_eq;
use rstest::{fixture, rstest};

use super::*;
use crate::world::{ObstacleKind, PowerUpKind};
use crate::{Difficulty, DISTANCE_SCALE, GROUND_Y, PLAYER_X, POWERUP_DURATION, SHAKE_INTENSITY};

const T0: Duration = Duration::from_secs(1);

#[fixture]
fn medium() -> Simulation {
    Simulation::seeded(Difficulty::Medium.settings(), 7)
}

fn idle(sim: &mut Simulation) -> StepReport {
    sim.step(PoseAction::Idle, T0)
}

#[rstest]
fn first_step_advances_distance_and_frames(mut medium: Simulation) {
    let report = idle(&mut medium);
    assert!(report.events.is_empty());
    let state = medium.state();
    assert_eq!(state.frames, 1);
    assert_relative_eq!(state.distance, 7.0 * DISTANCE_SCALE);
    assert!(state.speed > 7.0);
    assert!(state.hue < BASE_HUE);
}

#[rstest]
fn slow_mo_halves_motion_and_freezes_speed(mut medium: Simulation) {
    medium.grant_effect(PowerUpKind::SlowMo, T0 + POWERUP_DURATION);
    let id = medium.insert_obstacle(ObstacleKind::GroundSpike, 1000.0);
    idle(&mut medium);
    assert_relative_eq!(medium.state().distance, 3.5 * DISTANCE_SCALE);
    assert_relative_eq!(medium.state().speed, 7.0);
    let obstacle = medium.obstacles().iter().find(|o| o.id == id);
    assert_relative_eq!(obstacle.map_or(0.0, Obstacle::x), 996.5);
}

#[rstest]
fn expired_effects_are_dropped_before_motion(mut medium: Simulation) {
    medium.grant_effect(PowerUpKind::SlowMo, T0);
    idle(&mut medium);
    assert!(medium.effects().is_empty());
    assert_relative_eq!(medium.state().distance, 7.0 * DISTANCE_SCALE);
}

#[rstest]
fn passing_an_obstacle_scores_and_builds_combo(mut medium: Simulation) {
    let first = medium.insert_obstacle(ObstacleKind::GroundSpike, 95.0);
    let report = idle(&mut medium);
    assert_eq!(
        report.events,
        vec![SimEvent::ObstaclePassed {
            obstacle: first,
            points: 100,
            combo: 1,
        }]
    );

    medium.grant_effect(PowerUpKind::Multiplier, T0 + POWERUP_DURATION);
    medium.insert_obstacle(ObstacleKind::AerialDrone, 90.0);
    idle(&mut medium);
    assert_eq!(medium.state().score, 100 + 220);
    assert_eq!(medium.state().combo, 2);
    assert!(medium.obstacles().iter().all(|o| o.passed));
}

#[rstest]
fn passed_obstacles_are_never_rescored(mut medium: Simulation) {
    medium.insert_obstacle(ObstacleKind::GroundSpike, 95.0);
    idle(&mut medium);
    idle(&mut medium);
    idle(&mut medium);
    assert_eq!(medium.state().score, 100);
    assert_eq!(medium.state().combo, 1);
}

#[rstest]
fn shield_absorbs_one_impact(mut medium: Simulation) {
    medium.grant_effect(PowerUpKind::Shield, T0 + POWERUP_DURATION);
    let id = medium.insert_obstacle(ObstacleKind::GroundSpike, PLAYER_X + 10.0);
    let report = idle(&mut medium);

    assert!(medium.is_playing());
    assert_eq!(report.events, vec![SimEvent::ShieldBroken { obstacle: id }]);
    assert_eq!(report.cues().collect::<Vec<_>>(), vec![crate::audio::SoundCue::Explosion]);
    assert!(!medium.effects().contains(PowerUpKind::Shield));
    assert_eq!(medium.state().score, 0);
    assert_eq!(medium.state().combo, 0);
    assert_eq!(medium.state().shake_timer, SHAKE_INTENSITY - 1);
    assert_eq!(medium.particles().len(), 20);

    // The absorbed obstacle scrolls past without scoring.
    for _ in 0..20 {
        idle(&mut medium);
    }
    assert_eq!(medium.state().score, 0);
    assert!(medium.is_playing());
}

#[rstest]
fn shield_absorbs_every_impact_in_its_frame(mut medium: Simulation) {
    medium.grant_effect(PowerUpKind::Shield, T0 + POWERUP_DURATION);
    medium.insert_obstacle(ObstacleKind::GroundSpike, PLAYER_X + 10.0);
    medium.insert_obstacle(ObstacleKind::GroundSpike, PLAYER_X + 20.0);
    let report = idle(&mut medium);
    let absorbed = report
        .events
        .iter()
        .filter(|e| matches!(e, SimEvent::ShieldBroken { .. }))
        .count();
    assert_eq!(absorbed, 2);
    assert!(report.game_over().is_none());
    assert!(medium.is_playing());
    assert!(!medium.effects().contains(PowerUpKind::Shield));

    // Consumed: the next frame's impact is fatal.
    medium.insert_obstacle(ObstacleKind::GroundSpike, PLAYER_X + 10.0);
    assert!(idle(&mut medium).game_over().is_some());
}

#[rstest]
fn unshielded_hit_ends_the_run_and_freezes_the_world(mut medium: Simulation) {
    for _ in 0..3 {
        idle(&mut medium);
    }
    medium.insert_obstacle(ObstacleKind::GroundSpike, PLAYER_X + 10.0);
    let report = idle(&mut medium);
    let frozen = *medium.state();

    assert_eq!(
        report.game_over(),
        Some((0, crate::numeric::floor_distance(frozen.distance)))
    );
    assert_eq!(report.cues().last(), Some(crate::audio::SoundCue::GameOver));
    assert!(!frozen.is_playing);
    assert_eq!(frozen.shake_timer, SHAKE_INTENSITY);

    assert!(idle(&mut medium).events.is_empty());
    assert_eq!(*medium.state(), frozen);
}

#[rstest]
fn no_scoring_after_a_fatal_hit_in_the_same_frame(mut medium: Simulation) {
    medium.insert_obstacle(ObstacleKind::GroundSpike, PLAYER_X + 10.0);
    medium.insert_obstacle(ObstacleKind::GroundSpike, 95.0);
    let report = idle(&mut medium);
    assert_eq!(report.game_over(), Some((0, 0)));
    assert!(!report.any(|e| matches!(e, SimEvent::ObstaclePassed { .. })));
}

#[rstest]
fn jumping_clears_a_spike(mut medium: Simulation) {
    let report = medium.step(PoseAction::Jump, T0);
    assert!(report.any(|e| *e == SimEvent::Jumped));
    assert!(medium.player().y < 0.0);

    medium.insert_obstacle(ObstacleKind::GroundSpike, PLAYER_X + 200.0);
    let mut landed = false;
    for _ in 0..60 {
        let airborne = medium.step(PoseAction::Jump, T0);
        landed |= airborne.any(|e| *e == SimEvent::Landed);
        assert!(airborne.game_over().is_none());
        if landed {
            break;
        }
    }
    assert!(landed);
    assert_eq!(medium.state().score, 100);
}

#[rstest]
fn jumping_into_a_drone_is_fatal(mut medium: Simulation) {
    medium.step(PoseAction::Jump, T0);
    for _ in 0..8 {
        medium.step(PoseAction::Idle, T0);
    }
    medium.insert_obstacle(ObstacleKind::AerialDrone, PLAYER_X + 10.0);
    let report = idle(&mut medium);
    assert!(report.game_over().is_some());
}

#[rstest]
fn ducking_is_level_triggered_and_blocks_jumps(mut medium: Simulation) {
    let ducked = medium.step(PoseAction::Duck, T0);
    assert_eq!(ducked.events, vec![SimEvent::Ducked]);
    assert_relative_eq!(medium.player().height, crate::PLAYER_DUCK_HEIGHT);
    assert!(medium.step(PoseAction::Duck, T0).events.is_empty());

    // The jump sees the previous frame's duck and is refused.
    let refused = medium.step(PoseAction::Jump, T0);
    assert!(!refused.any(|e| *e == SimEvent::Jumped));
    assert_relative_eq!(medium.player().height, crate::PLAYER_HEIGHT);

    let accepted = medium.step(PoseAction::Jump, T0);
    assert!(accepted.any(|e| *e == SimEvent::Jumped));
}

#[rstest]
fn power_up_is_collected_then_removed(mut medium: Simulation) {
    medium.insert_power_up(PowerUpKind::Multiplier, PLAYER_X + 10.0, GROUND_Y - 50.0);
    let report = idle(&mut medium);
    assert_eq!(
        report.events,
        vec![SimEvent::PowerUpCollected {
            kind: PowerUpKind::Multiplier,
            expires_at: T0 + POWERUP_DURATION,
        }]
    );
    assert_eq!(report.cues().count(), 1);
    assert_eq!(medium.power_ups().len(), 1);
    assert!(!medium.power_ups().iter().any(|p| p.active));

    idle(&mut medium);
    assert!(medium.power_ups().is_empty());
    assert!(medium.effects().contains(PowerUpKind::Multiplier));
}

#[rstest]
fn recollection_keeps_one_entry_with_later_expiry(mut medium: Simulation) {
    medium.grant_effect(PowerUpKind::Shield, T0 + Duration::from_secs(20));
    medium.insert_power_up(PowerUpKind::Shield, PLAYER_X + 10.0, GROUND_Y - 50.0);
    idle(&mut medium);
    assert_eq!(medium.effects().len(), 1);
    assert_eq!(
        medium.effects().expiry(PowerUpKind::Shield),
        Some(T0 + Duration::from_secs(20))
    );
}

#[rstest]
fn entities_despawn_past_the_left_edge(mut medium: Simulation) {
    medium.insert_obstacle(ObstacleKind::GroundSpike, crate::DESPAWN_X + 5.0);
    medium.insert_power_up(PowerUpKind::SlowMo, crate::DESPAWN_X + 5.0, 0.0);
    idle(&mut medium);
    assert!(medium.obstacles().is_empty());
    assert!(medium.power_ups().is_empty());
}

#[rstest]
#[case(Difficulty::Easy)]
#[case(Difficulty::Medium)]
#[case(Difficulty::Hard)]
fn distance_and_score_never_decrease(#[case] tier: Difficulty) {
    let mut sim = Simulation::seeded(tier.settings(), 11);
    let (mut distance, mut score) = (0.0, 0);
    for frame in 0..2_000_u64 {
        let action = if frame % 40 < 20 {
            PoseAction::Jump
        } else {
            PoseAction::Idle
        };
        sim.step(action, Duration::from_millis(frame * 16));
        assert!(sim.state().distance >= distance);
        assert!(sim.state().score >= score);
        assert!(sim.state().speed <= sim.settings().max_speed);
        distance = sim.state().distance;
        score = sim.state().score;
        if !sim.is_playing() {
            break;
        }
    }
}
