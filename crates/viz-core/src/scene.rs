//! Per-frame scene state for both visualizations, plus the cancellation
//! token that lets a frame loop be halted deterministically.

use std::cell::Cell;
use std::rc::Rc;

use crate::constants::BACKGROUND_SPIN;
use crate::gesture::TransformState;
use crate::symbols::SymbolField;

/// Index of the point cloud in [`AttractorScene::targets`].
pub const CLOUD: usize = 0;
/// Index of the tube mesh in [`AttractorScene::targets`].
pub const TUBE: usize = 1;

/// Transform state for the attractor view: the point cloud and the tube,
/// rotated/zoomed together by gestures and spun slowly by the frame loop.
#[derive(Clone, Debug, Default)]
pub struct AttractorScene {
    pub targets: [TransformState; 2],
}

impl AttractorScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constant background rotation, applied after any gesture deltas the
    /// host dispatched since the previous frame.
    pub fn advance_frame(&mut self) {
        for target in &mut self.targets {
            target.rotation.y += BACKGROUND_SPIN;
        }
    }
}

/// The symbol field together with its current proximity-edge set.
///
/// Free motion advances every frame; the edge set is rebuilt from scratch
/// only every `refresh_interval`-th frame, so edges may lag entity motion by
/// at most that many frames.
pub struct SymbolScene {
    pub field: SymbolField,
    pub edges: Vec<(usize, usize)>,
    link_distance: f32,
    refresh_interval: u32,
    frames_since_refresh: u32,
}

impl SymbolScene {
    pub fn new(field: SymbolField, link_distance: f32, refresh_interval: u32) -> Self {
        let edges = field.proximity_edges(link_distance);
        Self {
            field,
            edges,
            link_distance,
            refresh_interval: refresh_interval.max(1),
            frames_since_refresh: 0,
        }
    }

    /// Advance one frame. Returns `true` when the edge set was rebuilt, so
    /// the caller knows to refresh line geometry.
    pub fn advance_frame(&mut self) -> bool {
        self.field.step();
        self.frames_since_refresh += 1;
        if self.frames_since_refresh < self.refresh_interval {
            return false;
        }
        self.frames_since_refresh = 0;
        self.edges = self.field.proximity_edges(self.link_distance);
        log::debug!("rebuilt proximity graph: {} edges", self.edges.len());
        true
    }
}

/// Cooperative stop flag shared between the frame loop and whoever tears the
/// visualization down. Single-threaded by design (the host dispatches events
/// and frames on one logical thread), hence `Rc<Cell>` rather than atomics.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Run `frame` until the token is cancelled or `max_frames` have elapsed,
/// returning how many frames actually ran. This is the headless counterpart
/// of the browser's animation-frame loop, used by tests.
pub fn drive_frames<F: FnMut()>(token: &CancelToken, max_frames: usize, mut frame: F) -> usize {
    let mut ran = 0;
    while ran < max_frames && !token.is_cancelled() {
        frame();
        ran += 1;
    }
    ran
}
