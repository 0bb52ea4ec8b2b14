//! Mouse-driven vertical sorting of a container's child rows.
//!
//! A press on a handle arms the row; the drag only starts once the pointer
//! has moved past a small threshold, so plain clicks on the handle do nothing.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::error;
use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent};

use crate::{dom, events};

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;
pub const DRAGGING_CLASS: &str = "dragging";

#[derive(Default)]
struct DragState {
    /// Row under a pressed handle.
    pending: Option<Element>,
    dragging: bool,
    start_y: i32,
}

/// `on_start` runs before the first row moves; `on_drop` after release.
pub fn make_sortable<S, D>(container: Element, handle: &'static str, on_start: S, on_drop: D)
where
    S: Fn() + 'static,
    D: Fn() + 'static,
{
    let state = Rc::new(RefCell::new(DragState::default()));

    {
        let state = state.clone();
        let rows = container.clone();
        events::on_mouse(&container, "mousedown", move |ev: MouseEvent| {
            if ev.button() != 0 {
                return;
            }
            let Some(target) = ev.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let Some(grip) = target.closest(handle).ok().flatten() else {
                return;
            };
            let Some(row) = row_of(&rows, &grip) else {
                return;
            };
            ev.prevent_default();
            let mut s = state.borrow_mut();
            s.pending = Some(row);
            s.dragging = false;
            s.start_y = ev.client_y();
        });
    }

    {
        let state = state.clone();
        let rows = container.clone();
        events::on_mouse(&dom::document(), "mousemove", move |ev: MouseEvent| {
            let mut s = state.borrow_mut();
            let Some(row) = s.pending.clone() else {
                return;
            };
            if !s.dragging {
                if (ev.client_y() - s.start_y).abs() <= DRAG_THRESHOLD_PX {
                    return;
                }
                s.dragging = true;
                dom::add_class(&row, DRAGGING_CLASS);
                on_start();
            }
            ev.prevent_default();
            move_row(&rows, &row, ev.client_y());
        });
    }

    events::on_mouse(&dom::document(), "mouseup", move |_: MouseEvent| {
        let (row, was_dragging) = {
            let mut s = state.borrow_mut();
            (s.pending.take(), std::mem::take(&mut s.dragging))
        };
        if let (Some(row), true) = (row, was_dragging) {
            dom::remove_class(&row, DRAGGING_CLASS);
            on_drop();
        }
    });
}

/// The direct child of `container` that holds `el`.
fn row_of(container: &Element, el: &Element) -> Option<Element> {
    let mut current = el.clone();
    loop {
        let parent = current.parent_element()?;
        if parent == *container {
            return Some(current);
        }
        current = parent;
    }
}

/// Place `dragged` before or after the row under the pointer.
fn move_row(container: &Element, dragged: &Element, client_y: i32) {
    let y = f64::from(client_y);
    for row in dom::children(container) {
        if row == *dragged {
            continue;
        }
        let rect = row.get_bounding_client_rect();
        if y < rect.top() || y >= rect.bottom() {
            continue;
        }
        let moved = if y < rect.top() + rect.height() / 2.0 {
            row.before_with_node_1(dragged)
        } else {
            row.after_with_node_1(dragged)
        };
        if let Err(err) = moved {
            error!(err = %dom::js_error_text(&err), "could not move row");
        }
        return;
    }
}
