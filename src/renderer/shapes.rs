//! Shape generation for 2D primitives
//!
//! Everything is built in playfield coordinates (origin top-left, y down);
//! the pipeline maps to NDC at upload time.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::consts::{BIRD_SIZE, BIRD_SPRITE_SIZE};
use crate::sim::{Bird, Obstacle, SimulationState};
use crate::tuning::Tuning;

/// Height of the darker cap at the open end of a pipe
pub const PIPE_LIP_HEIGHT: f32 = 12.0;
/// How far the cap overhangs the pipe on each side
pub const PIPE_LIP_OVERHANG: f32 = 3.0;

/// Screen rectangle for a DOM sprite, in playfield units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteRect {
    pub min: Vec2,
    pub size: Vec2,
}

/// Where the bird image goes. The image is drawn larger than the hitbox and
/// keeps that ratio when the hitbox is tuned.
pub fn bird_sprite(bird: &Bird, tuning: &Tuning) -> SpriteRect {
    let edge = tuning.bird_size * BIRD_SPRITE_SIZE / BIRD_SIZE;
    SpriteRect {
        min: Vec2::new(tuning.bird_x, bird.y),
        size: Vec2::splat(edge),
    }
}

/// Map a playfield point to normalized device coordinates
pub fn playfield_to_ndc(p: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(p.x / size.x * 2.0 - 1.0, 1.0 - p.y / size.y * 2.0)
}

/// Axis-aligned filled rectangle as two triangles
pub fn quad(min: Vec2, max: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Upper and lower pipe with caps facing the gap
pub fn obstacle(obstacle: &Obstacle, tuning: &Tuning) -> Vec<Vertex> {
    let left = obstacle.x;
    let right = obstacle.right(tuning.obstacle_width);
    let lip_left = left - PIPE_LIP_OVERHANG;
    let lip_right = right + PIPE_LIP_OVERHANG;
    let top = obstacle.gap_top;
    let bottom = obstacle.gap_bottom();

    let mut vertices = Vec::with_capacity(24);
    vertices.extend(quad(Vec2::new(left, 0.0), Vec2::new(right, top), colors::PIPE));
    vertices.extend(quad(
        Vec2::new(lip_left, top - PIPE_LIP_HEIGHT),
        Vec2::new(lip_right, top),
        colors::PIPE_LIP,
    ));
    vertices.extend(quad(
        Vec2::new(left, bottom),
        Vec2::new(right, tuning.playfield_height),
        colors::PIPE,
    ));
    vertices.extend(quad(
        Vec2::new(lip_left, bottom),
        Vec2::new(lip_right, bottom + PIPE_LIP_HEIGHT),
        colors::PIPE_LIP,
    ));
    vertices
}

/// Everything drawn on the canvas for one frame (the bird is a DOM sprite)
pub fn scene(state: &SimulationState, tuning: &Tuning) -> Vec<Vertex> {
    let size = tuning.playfield_size();
    let mut vertices = Vec::with_capacity(12 + state.obstacles.len() * 24);

    // Lighter haze band near the horizon
    vertices.extend(quad(
        Vec2::new(0.0, size.y * 0.7),
        size,
        colors::SKY_HAZE,
    ));

    for o in &state.obstacles {
        vertices.extend(obstacle(o, tuning));
    }

    if state.is_over() {
        vertices.extend(quad(Vec2::ZERO, size, colors::GAME_OVER_DIM));
    }

    vertices
}
