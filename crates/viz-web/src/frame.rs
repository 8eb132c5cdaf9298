use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

use viz_core::CancelToken;

use crate::constants::SLOW_FRAME_MILLIS;

/// Drive `frame_fn` from requestAnimationFrame until the token is cancelled.
///
/// The closure reschedules itself each frame; on cancellation it simply stops
/// rescheduling. The closure cell is leaked rather than dropped because the
/// final invocation is still executing when cancellation is observed.
pub fn start_loop(token: CancelToken, mut frame_fn: impl FnMut() + 'static) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let mut last_instant = Instant::now();

    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if token.is_cancelled() {
            log::info!("render loop stopped");
            return;
        }

        let now = Instant::now();
        let dt = now - last_instant;
        last_instant = now;
        if dt.as_millis() > SLOW_FRAME_MILLIS {
            log::debug!("slow frame: {}ms", dt.as_millis());
        }

        frame_fn();

        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));

    if let Some(w) = web::window() {
        let _ =
            w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
