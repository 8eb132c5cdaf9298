//! Gesture wiring for the attractor view. Press and wheel events attach to
//! the canvas; move and release events attach to the document so a drag keeps
//! tracking when the pointer leaves the canvas.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

use viz_core::{AttractorScene, GestureController};

use crate::dom::canvas_point;

pub fn wire_transform_gestures(
    canvas: &web::HtmlCanvasElement,
    controller: Rc<RefCell<GestureController>>,
    scene: Rc<RefCell<AttractorScene>>,
) -> anyhow::Result<()> {
    let document = web::window()
        .and_then(|w| w.document())
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    // Mouse down: arm the drag. The previous position is left unseeded so the
    // first move only records where the pointer is.
    {
        let controller = controller.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
            controller.borrow_mut().pointer_down();
        }) as Box<dyn FnMut(_)>);
        canvas
            .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    {
        let controller = controller.clone();
        let scene = scene.clone();
        let canvas_move = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            let at = canvas_point(&canvas_move, ev.client_x() as f32, ev.client_y() as f32);
            controller
                .borrow_mut()
                .pointer_move(at, &mut scene.borrow_mut().targets);
        }) as Box<dyn FnMut(_)>);
        document
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    {
        let controller = controller.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
            controller.borrow_mut().release();
        }) as Box<dyn FnMut(_)>);
        document
            .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    // Touch start seeds the previous position so the first move rotates
    // instead of jumping.
    {
        let controller = controller.clone();
        let canvas_touch = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
            if let Some(touch) = ev.touches().get(0) {
                let at = canvas_point(
                    &canvas_touch,
                    touch.client_x() as f32,
                    touch.client_y() as f32,
                );
                controller.borrow_mut().touch_start(at);
            }
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        canvas
            .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    {
        let controller = controller.clone();
        let scene = scene.clone();
        let canvas_touch = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
            if let Some(touch) = ev.touches().get(0) {
                let at = canvas_point(
                    &canvas_touch,
                    touch.client_x() as f32,
                    touch.client_y() as f32,
                );
                controller
                    .borrow_mut()
                    .pointer_move(at, &mut scene.borrow_mut().targets);
            }
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        document
            .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    {
        let controller = controller.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
            controller.borrow_mut().release();
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        document
            .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    {
        let controller = controller.clone();
        let scene = scene.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            controller
                .borrow()
                .wheel(ev.delta_y() as f32, &mut scene.borrow_mut().targets);
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        canvas
            .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    Ok(())
}
