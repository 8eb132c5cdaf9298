//! Tube surface generation: sweep a circular cross-section along a curve.
//!
//! Frames along the curve are computed with the double reflection method
//! (Wang et al. 2008, "Computation of Rotation Minimizing Frames") so the
//! cross-section does not twist between rings.

use glam::Vec3;

use crate::curve::CatmullRom;

#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TubeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Triangle mesh for the swept tube. Generated once; the surface is rigid
/// afterward (only rotated/scaled as a whole).
#[derive(Clone, Debug, Default)]
pub struct TubeMesh {
    pub vertices: Vec<TubeVertex>,
    pub indices: Vec<u32>,
}

#[derive(Clone, Copy)]
struct Frame {
    pos: Vec3,
    tangent: Vec3,
    normal: Vec3,
    binormal: Vec3,
}

/// Sweep a circle of `radius` with `radial_segments` sides along `curve`,
/// sampling `tubular_segments` spans (so `tubular_segments + 1` rings). The
/// tube is open: the first and last rings are not stitched together.
pub fn sweep_tube(
    curve: &CatmullRom,
    tubular_segments: usize,
    radius: f32,
    radial_segments: usize,
) -> TubeMesh {
    let frames = curve_frames(curve, tubular_segments);
    let rings = frames.len();
    let mut vertices = Vec::with_capacity(rings * radial_segments);
    let mut indices = Vec::with_capacity(tubular_segments * radial_segments * 6);

    for frame in &frames {
        for k in 0..radial_segments {
            let angle = (k as f32 / radial_segments as f32) * std::f32::consts::TAU;
            let offset = frame.normal * angle.cos() + frame.binormal * angle.sin();
            vertices.push(TubeVertex {
                position: (frame.pos + offset * radius).into(),
                normal: offset.into(),
            });
        }
    }

    for i in 0..rings - 1 {
        let ring = i * radial_segments;
        let next_ring = (i + 1) * radial_segments;
        for k in 0..radial_segments {
            let k_next = (k + 1) % radial_segments;
            let v0 = (ring + k) as u32;
            let v1 = (ring + k_next) as u32;
            let v2 = (next_ring + k) as u32;
            let v3 = (next_ring + k_next) as u32;
            indices.extend_from_slice(&[v0, v2, v1]);
            indices.extend_from_slice(&[v1, v2, v3]);
        }
    }

    TubeMesh { vertices, indices }
}

fn curve_frames(curve: &CatmullRom, tubular_segments: usize) -> Vec<Frame> {
    let segments = tubular_segments.max(1);
    let mut frames = Vec::with_capacity(segments + 1);

    let mut prev_tangent = Vec3::X;
    for i in 0..=segments {
        let t = i as f32 / segments as f32;
        let raw = curve.tangent(t);
        // Coincident control points can give a zero tangent; carry the
        // previous direction through rather than emit NaN.
        let tangent = if raw.length_squared() > 1e-12 {
            raw.normalize()
        } else {
            prev_tangent
        };
        prev_tangent = tangent;
        frames.push(Frame {
            pos: curve.position(t),
            tangent,
            normal: Vec3::ZERO,
            binormal: Vec3::ZERO,
        });
    }

    compute_rmf(&mut frames);
    frames
}

fn compute_rmf(frames: &mut [Frame]) {
    if frames.is_empty() {
        return;
    }

    let t0 = frames[0].tangent;
    let arbitrary = if t0.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    let n0 = t0.cross(arbitrary).normalize();
    frames[0].normal = n0;
    frames[0].binormal = t0.cross(n0).normalize();

    for i in 0..frames.len() - 1 {
        let v1 = frames[i + 1].pos - frames[i].pos;
        let c1 = v1.dot(v1);
        if c1 < 1e-10 {
            frames[i + 1].normal = frames[i].normal;
            frames[i + 1].binormal = frames[i].binormal;
            continue;
        }

        // First reflection across the plane perpendicular to v1.
        let r_l = frames[i].normal - (2.0 / c1) * v1.dot(frames[i].normal) * v1;
        let t_l = frames[i].tangent - (2.0 / c1) * v1.dot(frames[i].tangent) * v1;

        // Second reflection aligning the reflected tangent with the next one.
        let v2 = frames[i + 1].tangent - t_l;
        let c2 = v2.dot(v2);
        let r_next = if c2 < 1e-10 {
            r_l
        } else {
            r_l - (2.0 / c2) * v2.dot(r_l) * v2
        };

        let t_next = frames[i + 1].tangent;
        let normal = (r_next - t_next * t_next.dot(r_next)).normalize();
        frames[i + 1].normal = normal;
        frames[i + 1].binormal = t_next.cross(normal).normalize();
    }
}
