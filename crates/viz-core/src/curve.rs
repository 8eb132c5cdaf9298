//! Sparse resampling of the trajectory and Catmull-Rom curve fitting.

use glam::Vec3;

use crate::error::VizError;

/// Take every `stride`-th position in order, then append the very first
/// position again to close the loop. The result has `ceil(n / stride) + 1`
/// entries. Fails when fewer than two distinct samples fall out of the
/// stride: with a single sample the closing point would coincide with it,
/// leaving a zero-length loop, so that case is rejected up front rather
/// than counted as a two-point curve.
pub fn control_points(positions: &[Vec3], stride: usize) -> Result<Vec<Vec3>, VizError> {
    let stride = stride.max(1);
    let mut points: Vec<Vec3> = positions.iter().step_by(stride).copied().collect();
    if points.len() < 2 {
        return Err(VizError::DegenerateCurve(points.len()));
    }
    points.push(positions[0]);
    Ok(points)
}

/// An interpolating Catmull-Rom-style curve through an ordered point list.
///
/// Tangents are central differences in the interior and one-sided at the
/// endpoints; segments are evaluated with cubic Hermite polynomials, so the
/// curve passes exactly through every control point.
#[derive(Clone, Debug)]
pub struct CatmullRom {
    points: Vec<Vec3>,
}

impl CatmullRom {
    pub fn new(points: Vec<Vec3>) -> Result<Self, VizError> {
        if points.len() < 2 {
            return Err(VizError::DegenerateCurve(points.len()));
        }
        Ok(Self { points })
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    /// Position at `t` in `[0, 1]`, mapped uniformly over the segments.
    pub fn position(&self, t: f32) -> Vec3 {
        let (i, u) = self.locate(t);
        let p0 = self.points[i];
        let p1 = self.points[i + 1];
        let m0 = self.knot_tangent(i);
        let m1 = self.knot_tangent(i + 1);
        hermite_point(p0, m0, p1, m1, u)
    }

    /// Unnormalized tangent at `t` (derivative of [`Self::position`]).
    pub fn tangent(&self, t: f32) -> Vec3 {
        let (i, u) = self.locate(t);
        let p0 = self.points[i];
        let p1 = self.points[i + 1];
        let m0 = self.knot_tangent(i);
        let m1 = self.knot_tangent(i + 1);
        hermite_tangent(p0, m0, p1, m1, u)
    }

    fn locate(&self, t: f32) -> (usize, f32) {
        let segments = self.points.len() - 1;
        let scaled = t.clamp(0.0, 1.0) * segments as f32;
        let i = (scaled as usize).min(segments - 1);
        (i, scaled - i as f32)
    }

    fn knot_tangent(&self, i: usize) -> Vec3 {
        let n = self.points.len();
        if i == 0 {
            self.points[1] - self.points[0]
        } else if i == n - 1 {
            self.points[n - 1] - self.points[n - 2]
        } else {
            (self.points[i + 1] - self.points[i - 1]) * 0.5
        }
    }
}

fn hermite_point(p0: Vec3, m0: Vec3, p1: Vec3, m1: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;
    p0 * h00 + m0 * h10 + p1 * h01 + m1 * h11
}

fn hermite_tangent(p0: Vec3, m0: Vec3, p1: Vec3, m1: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let dh00 = 6.0 * t2 - 6.0 * t;
    let dh10 = 3.0 * t2 - 4.0 * t + 1.0;
    let dh01 = -6.0 * t2 + 6.0 * t;
    let dh11 = 3.0 * t2 - 2.0 * t;
    p0 * dh00 + m0 * dh10 + p1 * dh01 + m1 * dh11
}
