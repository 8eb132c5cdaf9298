//! Forward-Euler integration of the Lorenz system.
//!
//! The trajectory is generated once at startup and treated afterward as a
//! static geometric snapshot; the integrator state is not retained.

use glam::Vec3;

use crate::constants::*;

/// Parameters of the three-variable Lorenz system. The defaults are the
/// classic chaotic regime (sigma=10, rho=28, beta=8/3).
#[derive(Clone, Copy, Debug)]
pub struct LorenzParams {
    pub sigma: f32,
    pub rho: f32,
    pub beta: f32,
    pub dt: f32,
}

impl Default for LorenzParams {
    fn default() -> Self {
        Self {
            sigma: SIGMA,
            rho: RHO,
            beta: BETA,
            dt: DT,
        }
    }
}

/// A dense, ordered sequence of positions with one color per sample.
#[derive(Clone, Debug, Default)]
pub struct Trajectory {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec3>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Integrate `samples` fixed steps from `initial`, recording each post-update
/// state scaled by [`DISPLAY_SCALE`]. Purely deterministic: identical inputs
/// produce bit-identical trajectories.
pub fn generate_trajectory(params: &LorenzParams, initial: Vec3, samples: usize) -> Trajectory {
    let mut positions = Vec::with_capacity(samples);
    let mut colors = Vec::with_capacity(samples);

    let (mut x, mut y, mut z) = (initial.x, initial.y, initial.z);
    for i in 0..samples {
        let dx = params.sigma * (y - x) * params.dt;
        let dy = (x * (params.rho - z) - y) * params.dt;
        let dz = (x * y - params.beta * z) * params.dt;
        x += dx;
        y += dy;
        z += dz;

        positions.push(Vec3::new(x, y, z) * DISPLAY_SCALE);
        colors.push(sample_color(i, samples));
    }

    Trajectory { positions, colors }
}

/// Color for sample `index` of `total`: three phase-shifted sine waves over
/// the index fraction, independent of position, so hue sweeps smoothly along
/// the cloud.
pub fn sample_color(index: usize, total: usize) -> Vec3 {
    let t = if total == 0 {
        0.0
    } else {
        index as f32 / total as f32
    };
    let phase = std::f32::consts::TAU * t;
    Vec3::new(
        COLOR_R_OFFSET + COLOR_R_AMPLITUDE * (phase + COLOR_R_PHASE).sin(),
        COLOR_G_OFFSET + COLOR_G_AMPLITUDE * (phase + COLOR_G_PHASE).sin(),
        COLOR_B_OFFSET + COLOR_B_AMPLITUDE * (phase + COLOR_B_PHASE).sin(),
    )
}
