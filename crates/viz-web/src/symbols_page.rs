//! The floating symbol header: 40 drifting glyph sprites linked by faint
//! lines whenever two of them come close. Symbol motion advances every
//! frame; the link lines are recaptured only when the proximity graph is
//! rebuilt, so they trail the symbols slightly between rebuilds.

use glam::{Mat4, Vec3};
use web_sys as web;

use viz_core::constants::{EDGE_REFRESH_INTERVAL, LINK_DISTANCE, SYMBOL_CAMERA_Z, SYMBOL_COUNT};
use viz_core::{CancelToken, FieldBounds, SymbolField, SymbolKind, SymbolScene};

use crate::constants::{BAR_BASE_SIZE, DOT_BASE_SIZE, RING_BASE_SIZE};
use crate::render::{Draw, GpuState, SpriteInstance};
use crate::{dom, frame};

fn symbol_instances(field: &SymbolField) -> Vec<SpriteInstance> {
    field
        .symbols
        .iter()
        .map(|s| {
            let (kind, base) = match s.kind {
                SymbolKind::Dot => (0.0, DOT_BASE_SIZE),
                SymbolKind::Bar => (1.0, BAR_BASE_SIZE),
                SymbolKind::Ring => (2.0, RING_BASE_SIZE),
            };
            SpriteInstance {
                position: s.position.to_array(),
                scale: s.scale * base,
                color: [s.color.x, s.color.y, s.color.z, s.opacity],
                angle: s.rotation.x,
                kind,
            }
        })
        .collect()
}

fn edge_segments(scene: &SymbolScene) -> Vec<(Vec3, Vec3)> {
    scene
        .edges
        .iter()
        .map(|&(i, j)| {
            (
                scene.field.symbols[i].position,
                scene.field.symbols[j].position,
            )
        })
        .collect()
}

pub async fn run(container: web::HtmlElement, token: CancelToken) -> anyhow::Result<()> {
    let canvas = dom::create_canvas(&container)?;
    dom::sync_canvas_backing_size(&canvas);
    dom::wire_resize(&canvas);

    let seed = js_sys::Date::now() as u64;
    let field = SymbolField::new(SYMBOL_COUNT, FieldBounds::default(), seed);
    let mut scene = SymbolScene::new(field, LINK_DISTANCE, EDGE_REFRESH_INTERVAL);
    log::info!(
        "symbol field: {} symbols, {} initial edges (seed {})",
        scene.field.symbols.len(),
        scene.edges.len(),
        seed
    );

    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    let mut gpu = GpuState::new(leaked_canvas, SYMBOL_CAMERA_Z).await?;

    let mut sprite_set = gpu.create_sprite_set(&symbol_instances(&scene.field), SYMBOL_COUNT);
    let max_edges = SYMBOL_COUNT * (SYMBOL_COUNT - 1) / 2;
    let mut line_set = gpu.create_line_set(max_edges);
    gpu.update_line_set(&mut line_set, &edge_segments(&scene));

    let canvas_tick = canvas.clone();
    frame::start_loop(token, move || {
        let rebuilt = scene.advance_frame();
        gpu.update_sprite_set(&mut sprite_set, &symbol_instances(&scene.field));
        if rebuilt {
            gpu.update_line_set(&mut line_set, &edge_segments(&scene));
        }
        gpu.resize_if_needed(canvas_tick.width(), canvas_tick.height());

        let draws = [
            Draw::Lines(&line_set, Mat4::IDENTITY),
            Draw::Sprites(&sprite_set, Mat4::IDENTITY),
        ];
        if let Err(e) = gpu.render(&draws) {
            log::error!("render error: {:?}", e);
        }
    });
    Ok(())
}
