//! The floating symbol field: constant-velocity entities bouncing inside an
//! axis-aligned box, plus the all-pairs proximity graph over them.

use glam::Vec3;
use rand::prelude::*;

use crate::constants::{FIELD_BOUND_X, FIELD_BOUND_Y, FIELD_BOUND_Z, SECONDARY_ROTATION_FACTOR};

/// Visual shape of a symbol. Rendering is free to interpret these however it
/// likes; the simulation only carries them through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolKind {
    Dot,
    Bar,
    Ring,
}

/// One floating entity. Created at initialization, never destroyed; mutated
/// every frame by [`SymbolField::step`].
#[derive(Clone, Debug)]
pub struct Symbol {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
    pub color: Vec3,
    pub opacity: f32,
    pub kind: SymbolKind,
    pub rotation_speed: f32,
    pub movement_speed: f32,
    pub direction: Vec3,
}

impl Default for Symbol {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
            color: Vec3::ONE,
            opacity: 1.0,
            kind: SymbolKind::Dot,
            rotation_speed: 0.0,
            movement_speed: 0.0,
            direction: Vec3::ZERO,
        }
    }
}

/// Symmetric per-axis bounds of the box the symbols bounce around in.
#[derive(Clone, Copy, Debug)]
pub struct FieldBounds {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for FieldBounds {
    fn default() -> Self {
        Self {
            x: FIELD_BOUND_X,
            y: FIELD_BOUND_Y,
            z: FIELD_BOUND_Z,
        }
    }
}

/// Fixed-size pool of floating symbols.
pub struct SymbolField {
    pub symbols: Vec<Symbol>,
    pub bounds: FieldBounds,
}

impl SymbolField {
    /// Spawn `count` symbols with randomized fields. The generator is seeded
    /// so a field can be reproduced exactly in tests.
    pub fn new(count: usize, bounds: FieldBounds, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let symbols = (0..count)
            .map(|_| {
                let kind = match rng.gen_range(0..3u8) {
                    0 => SymbolKind::Dot,
                    1 => SymbolKind::Bar,
                    _ => SymbolKind::Ring,
                };
                Symbol {
                    position: Vec3::new(
                        (rng.gen::<f32>() - 0.5) * 30.0,
                        (rng.gen::<f32>() - 0.5) * 15.0,
                        (rng.gen::<f32>() - 0.5) * 10.0,
                    ),
                    rotation: Vec3::new(
                        rng.gen::<f32>() * std::f32::consts::PI,
                        rng.gen::<f32>() * std::f32::consts::PI,
                        0.0,
                    ),
                    scale: 0.5 + rng.gen::<f32>() * 1.5,
                    color: hsl_to_rgb(rng.gen::<f32>(), 0.7, 0.6),
                    opacity: 0.4 + rng.gen::<f32>() * 0.3,
                    kind,
                    rotation_speed: (rng.gen::<f32>() - 0.5) * 0.02,
                    movement_speed: 0.01 + rng.gen::<f32>() * 0.02,
                    direction: Vec3::new(
                        (rng.gen::<f32>() - 0.5) * 0.01,
                        (rng.gen::<f32>() - 0.5) * 0.01,
                        (rng.gen::<f32>() - 0.5) * 0.01,
                    ),
                }
            })
            .collect();
        Self { symbols, bounds }
    }

    /// Advance one frame of free motion: spin each symbol, translate it by
    /// its direction, and reflect the direction component on any axis whose
    /// bound was exceeded. Positions are not clamped back inside the box, so
    /// a symbol can sit outside a wall for a frame or two until its reversed
    /// direction carries it back in.
    pub fn step(&mut self) {
        for s in &mut self.symbols {
            s.rotation.x += s.rotation_speed;
            s.rotation.y += s.rotation_speed * SECONDARY_ROTATION_FACTOR;
            s.position += s.direction;

            if s.position.x.abs() > self.bounds.x {
                s.direction.x = -s.direction.x;
            }
            if s.position.y.abs() > self.bounds.y {
                s.direction.y = -s.direction.y;
            }
            if s.position.z.abs() > self.bounds.z {
                s.direction.z = -s.direction.z;
            }
        }
    }

    /// All unordered index pairs `(i, j), i < j` whose Euclidean distance is
    /// strictly below `threshold`. A plain O(n^2) scan; with the default pool
    /// of 40 that is at most 780 comparisons per rebuild.
    pub fn proximity_edges(&self, threshold: f32) -> Vec<(usize, usize)> {
        let mut edges = Vec::new();
        for i in 0..self.symbols.len() {
            for j in i + 1..self.symbols.len() {
                let dist = self.symbols[i].position.distance(self.symbols[j].position);
                if dist < threshold {
                    edges.push((i, j));
                }
            }
        }
        edges
    }
}

/// HSL to RGB, all components in `[0, 1]`.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec3 {
    let h = h.rem_euclid(1.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h * 6.0;
    let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c * 0.5;
    Vec3::new(r + m, g + m, b + m)
}
