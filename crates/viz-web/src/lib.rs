//! Browser frontend for the header visualizations. Exposes two JS entry
//! points, one per page header; each appends a canvas to the named container,
//! builds its scene from viz-core, and drives a requestAnimationFrame loop
//! until the returned handle is stopped.

#![cfg(target_arch = "wasm32")]

mod attractor_page;
mod constants;
mod dom;
mod events;
mod frame;
mod render;
mod symbols_page;

use std::sync::Once;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use viz_core::CancelToken;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("viz-web starting");
    });
}

/// Handle to a running visualization. `stop()` cancels its render loop; the
/// canvas stays in the DOM for the caller to remove.
#[wasm_bindgen]
pub struct VisualizationHandle {
    token: CancelToken,
}

#[wasm_bindgen]
impl VisualizationHandle {
    pub fn stop(&self) {
        self.token.cancel();
    }
}

/// Start the Lorenz attractor header inside the element with the given id.
/// Fails synchronously when the container is missing; GPU setup and the
/// render loop run asynchronously after return.
#[wasm_bindgen(js_name = startAttractorVisualization)]
pub fn start_attractor_visualization(container_id: String) -> Result<VisualizationHandle, JsValue> {
    init_logging();
    let container = dom::container_by_id(&container_id)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let token = CancelToken::new();
    let loop_token = token.clone();
    spawn_local(async move {
        if let Err(e) = attractor_page::run(container, loop_token).await {
            log::error!("attractor visualization failed: {:?}", e);
        }
    });
    Ok(VisualizationHandle { token })
}

/// Start the floating symbol header inside the element with the given id.
#[wasm_bindgen(js_name = startFloatingSymbolVisualization)]
pub fn start_floating_symbol_visualization(
    container_id: String,
) -> Result<VisualizationHandle, JsValue> {
    init_logging();
    let container = dom::container_by_id(&container_id)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let token = CancelToken::new();
    let loop_token = token.clone();
    spawn_local(async move {
        if let Err(e) = symbols_page::run(container, loop_token).await {
            log::error!("symbol visualization failed: {:?}", e);
        }
    });
    Ok(VisualizationHandle { token })
}
