//! The Lorenz attractor header: a 5000-particle point cloud plus a smooth
//! tube swept along a closed curve through the trajectory, slowly spinning
//! and responsive to drag/zoom gestures.

use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

use viz_core::constants::{
    ATTRACTOR_CAMERA_Z, CURVE_STRIDE, SAMPLE_COUNT, TUBE_RADIAL_SEGMENTS, TUBE_RADIUS,
    TUBE_SEGMENTS,
};
use viz_core::{
    control_points, generate_trajectory, initial_state_vec3, sweep_tube, AttractorScene,
    CancelToken, CatmullRom, GestureController, LorenzParams, CLOUD, TUBE,
};

use crate::constants::{POINT_SPRITE_OPACITY, POINT_SPRITE_SIZE};
use crate::render::{Draw, GpuState, SpriteInstance};
use crate::{dom, events, frame};

pub async fn run(container: web::HtmlElement, token: CancelToken) -> anyhow::Result<()> {
    let canvas = dom::create_canvas(&container)?;
    dom::sync_canvas_backing_size(&canvas);
    dom::wire_resize(&canvas);

    let trajectory = generate_trajectory(
        &LorenzParams::default(),
        initial_state_vec3(),
        SAMPLE_COUNT,
    );
    let knots = control_points(&trajectory.positions, CURVE_STRIDE)?;
    let curve = CatmullRom::new(knots)?;
    let tube = sweep_tube(&curve, TUBE_SEGMENTS, TUBE_RADIUS, TUBE_RADIAL_SEGMENTS);
    log::info!(
        "attractor geometry: {} particles, {} tube vertices",
        trajectory.len(),
        tube.vertices.len()
    );

    // Leak a canvas clone to satisfy the 'static surface lifetime.
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    let mut gpu = GpuState::new(leaked_canvas, ATTRACTOR_CAMERA_Z).await?;

    let cloud: Vec<SpriteInstance> = trajectory
        .positions
        .iter()
        .zip(&trajectory.colors)
        .map(|(p, c)| SpriteInstance {
            position: p.to_array(),
            scale: POINT_SPRITE_SIZE,
            color: [c.x, c.y, c.z, POINT_SPRITE_OPACITY],
            angle: 0.0,
            kind: 0.0,
        })
        .collect();
    let cloud_set = gpu.create_sprite_set(&cloud, cloud.len());
    let tube_set = gpu.create_tube_mesh(&tube);

    let scene = Rc::new(RefCell::new(AttractorScene::new()));
    let controller = Rc::new(RefCell::new(GestureController::new()));
    events::wire_transform_gestures(&canvas, controller, scene.clone())?;

    let canvas_tick = canvas.clone();
    frame::start_loop(token, move || {
        scene.borrow_mut().advance_frame();
        gpu.resize_if_needed(canvas_tick.width(), canvas_tick.height());

        let targets = scene.borrow().targets;
        let draws = [
            Draw::Sprites(&cloud_set, targets[CLOUD].model_matrix()),
            Draw::Mesh(&tube_set, targets[TUBE].model_matrix()),
        ];
        if let Err(e) = gpu.render(&draws) {
            log::error!("render error: {:?}", e);
        }
    });
    Ok(())
}
