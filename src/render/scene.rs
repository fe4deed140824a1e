//! World composition: background, floor, entities and particles.

use glam::Vec2;

use super::{DrawCommand, Frame};
use crate::sim::Simulation;
use crate::world::{
    Aabb, Background, Hsla, Obstacle, ObstacleKind, Paint, PlayerState, PowerUp, PowerUpKind, Rgb,
    MOUNTAIN_PERIOD,
};
use crate::{CANVAS_HEIGHT, CANVAS_WIDTH, GROUND_Y};

const GRID_SPACING: f32 = 100.0;
const GRID_SLANT: f32 = 200.0;
const SHIELD_RADIUS: f32 = 60.0;

/// Composes the draw list for the current world state.
///
/// `offset` is the shake jitter for this frame; pass [`Vec2::ZERO`] for a
/// steady image.
#[must_use]
pub fn compose(sim: &Simulation, background: &Background, offset: Vec2) -> Frame {
    let state = sim.state();
    let mut commands = Vec::new();

    sky(&mut commands, background, state.hue, state.distance);
    floor(&mut commands, state.hue, state.distance);
    player(&mut commands, sim.player());
    if sim.effects().contains(PowerUpKind::Shield) {
        let centre = sim.player().rect().centre();
        commands.push(DrawCommand::Ring {
            centre,
            radius: SHIELD_RADIUS,
            width: 4.0,
            paint: Rgb::NEON_CYAN.into(),
        });
    }
    for obstacle in sim.obstacles() {
        obstacle_shape(&mut commands, obstacle);
    }
    for power_up in sim.power_ups() {
        power_up_shape(&mut commands, power_up);
    }
    commands.extend(sim.particles().iter().map(|p| DrawCommand::Circle {
        centre: p.pos,
        radius: p.size,
        paint: Paint::faded(p.colour, p.life.max(0.0)),
    }));

    Frame { offset, commands }
}

fn sky(commands: &mut Vec<DrawCommand>, background: &Background, hue: f32, distance: f32) {
    commands.push(DrawCommand::Gradient {
        top: Hsla::new(hue, 60.0, 5.0),
        bottom: Hsla::new(hue, 60.0, 15.0),
    });
    commands.extend(background.stars.iter().map(|star| DrawCommand::Circle {
        centre: star.pos,
        radius: star.size,
        paint: Paint::faded(Rgb::WHITE, star.alpha),
    }));
    for (layer, index) in background.layers.iter().zip(0_u8..) {
        let depth = f32::from(index);
        let scroll = Background::scroll(layer, distance);
        let paint: Paint = Hsla::new(hue + depth * 10.0, 60.0, 10.0 + depth * 5.0)
            .with_alpha(0.8)
            .into();
        for copy in [0.0, 1.0] {
            let start = -scroll + copy * MOUNTAIN_PERIOD;
            commands.push(DrawCommand::Polygon {
                points: layer
                    .points
                    .iter()
                    .map(|p| Vec2::new(start + p.x, p.y))
                    .collect(),
                paint,
            });
        }
    }
}

fn floor(commands: &mut Vec<DrawCommand>, hue: f32, distance: f32) {
    let neon = Hsla::new(hue, 100.0, 50.0);
    commands.push(DrawCommand::Line {
        from: Vec2::new(0.0, GROUND_Y),
        to: Vec2::new(CANVAS_WIDTH, GROUND_Y),
        width: 2.0,
        paint: neon.into(),
    });
    let grid = neon.with_alpha(0.3);
    let mut x = -((distance * 40.0) % GRID_SPACING);
    while x < CANVAS_WIDTH {
        commands.push(DrawCommand::Line {
            from: Vec2::new(x, GROUND_Y),
            to: Vec2::new(x - GRID_SLANT, CANVAS_HEIGHT),
            width: 2.0,
            paint: grid.into(),
        });
        x += GRID_SPACING;
    }
}

/// Squash and stretch factors for the player's pose.
fn squash(player: &PlayerState) -> Vec2 {
    let mut scale = Vec2::ONE;
    if player.is_jumping {
        scale *= Vec2::new(0.9, 1.1);
    }
    if player.is_ducking {
        scale *= Vec2::new(1.2, 0.6);
    }
    scale
}

fn player(commands: &mut Vec<DrawCommand>, player: &PlayerState) {
    let centre = player.rect().centre();
    let scale = squash(player);
    let body = Vec2::new(player.width, player.height) * scale;
    commands.push(DrawCommand::Rect {
        rect: Aabb::new(centre.x - body.x / 2.0, centre.y - body.y / 2.0, body.x, body.y),
        paint: player.colour.into(),
    });
    let visor_top = (-player.height / 2.0 + 10.0) * scale.y;
    commands.push(DrawCommand::Rect {
        rect: Aabb::new(centre.x, centre.y + visor_top, 20.0 * scale.x, 10.0 * scale.y),
        paint: Rgb::WHITE.into(),
    });
}

fn obstacle_shape(commands: &mut Vec<DrawCommand>, obstacle: &Obstacle) {
    let Aabb { min, size } = obstacle.rect;
    let paint: Paint = obstacle.colour.into();
    match obstacle.kind {
        ObstacleKind::GroundSpike => commands.push(DrawCommand::Triangle {
            points: [
                Vec2::new(min.x, min.y + size.y),
                Vec2::new(min.x + size.x / 2.0, min.y),
                min + size,
            ],
            paint,
        }),
        ObstacleKind::AerialDrone => {
            commands.push(DrawCommand::Circle {
                centre: obstacle.rect.centre(),
                radius: size.x / 2.0,
                paint,
            });
            commands.push(DrawCommand::Rect {
                rect: Aabb::new(min.x - 10.0, min.y + 10.0, size.x + 20.0, 5.0),
                paint: Rgb::WHITE.into(),
            });
        }
    }
}

fn power_up_shape(commands: &mut Vec<DrawCommand>, power_up: &PowerUp) {
    let min = power_up.rect.min;
    commands.push(DrawCommand::Circle {
        centre: power_up.rect.centre(),
        radius: 20.0,
        paint: power_up.kind.colour().into(),
    });
    commands.push(DrawCommand::Text {
        pos: min + Vec2::new(12.0, 28.0),
        text: "?".to_owned(),
        size: 20.0,
        paint: Rgb::WHITE.into(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::PoseAction;
    use crate::Difficulty;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn scene() -> (Simulation, Background) {
        let mut rng = StdRng::seed_from_u64(4);
        (
            Simulation::seeded(Difficulty::Medium.settings(), 4),
            Background::generate(&mut rng),
        )
    }

    #[test]
    fn frame_starts_with_the_sky_gradient() {
        let (sim, bg) = scene();
        let frame = compose(&sim, &bg, Vec2::ZERO);
        assert!(matches!(
            frame.commands.first(),
            Some(DrawCommand::Gradient { top, .. }) if (top.hue - 180.0).abs() < f32::EPSILON
        ));
        let polygons = frame
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Polygon { .. }))
            .count();
        assert_eq!(polygons, 6, "three layers drawn twice");
    }

    #[test]
    fn shield_ring_follows_the_effect() {
        let (mut sim, bg) = scene();
        let ring = |sim: &Simulation| {
            compose(sim, &bg, Vec2::ZERO)
                .commands
                .iter()
                .any(|c| matches!(c, DrawCommand::Ring { .. }))
        };
        assert!(!ring(&sim));
        sim.grant_effect(PowerUpKind::Shield, Duration::from_secs(60));
        assert!(ring(&sim));
    }

    #[test]
    fn shake_is_left_to_the_host() {
        let (sim, bg) = scene();
        let still = compose(&sim, &bg, Vec2::ZERO);
        let shaken = compose(&sim, &bg, Vec2::new(4.0, -3.0));
        assert_eq!(shaken.offset, Vec2::new(4.0, -3.0));
        assert_eq!(shaken.commands, still.commands);
    }

    #[test]
    fn entities_map_to_their_shapes() {
        let (mut sim, bg) = scene();
        sim.insert_obstacle(ObstacleKind::GroundSpike, 600.0);
        sim.insert_obstacle(ObstacleKind::AerialDrone, 800.0);
        sim.insert_power_up(PowerUpKind::SlowMo, 1000.0, GROUND_Y - 150.0);
        let frame = compose(&sim, &bg, Vec2::new(1.0, -1.0));
        assert_eq!(frame.offset, Vec2::new(1.0, -1.0));
        let triangles = frame
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Triangle { .. }))
            .count();
        let glyphs = frame
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text { text, .. } if text == "?"))
            .count();
        assert_eq!((triangles, glyphs), (1, 1));
    }

    #[test]
    fn ducking_squashes_the_body() {
        let (mut sim, _) = scene();
        sim.step(PoseAction::Duck, Duration::ZERO);
        let scale = squash(sim.player());
        assert_relative_eq!(scale.x, 1.2);
        assert_relative_eq!(scale.y, 0.6);
    }
}
