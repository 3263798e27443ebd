//! Leptos DragDrop Utilities
//!
//! Mouse-event drag-and-drop for a vertical sortable list.
//! Uses a movement threshold to distinguish click from drag, and reduces
//! every drop to a single (from, to) index pair.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Where the pointer is during a drag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropTarget {
    /// Over the row at this index (take its place)
    Item(usize),
    /// Over the gap before this index; `len` is the gap after the last row
    Slot(usize),
}

impl DropTarget {
    /// Same target in a list where the rendered rows start at `by`
    pub fn offset(self, by: usize) -> Self {
        match self {
            DropTarget::Item(index) => DropTarget::Item(index + by),
            DropTarget::Slot(gap) => DropTarget::Slot(gap + by),
        }
    }
}

/// Final index for the row dragged from `from`, or `None` when the drop
/// leaves the list unchanged.
pub fn resolve_drop(from: usize, target: DropTarget, len: usize) -> Option<usize> {
    if from >= len {
        return None;
    }
    let to = match target {
        DropTarget::Item(index) => index,
        // removing `from` first shifts later gaps up by one
        DropTarget::Slot(gap) if gap > from => gap - 1,
        DropTarget::Slot(gap) => gap,
    };
    let to = to.min(len - 1);
    (to != from).then_some(to)
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_read: ReadSignal<Option<usize>>,
    pub dragging_write: WriteSignal<Option<usize>>,
    pub drop_target_read: ReadSignal<Option<DropTarget>>,
    pub drop_target_write: WriteSignal<Option<DropTarget>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Row pressed but not yet moved past the threshold
    pub pending_read: ReadSignal<Option<usize>>,
    pub pending_write: WriteSignal<Option<usize>>,
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_read, dragging_write) = signal(None::<usize>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_read, pending_write) = signal(None::<usize>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        dragging_read,
        dragging_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_read,
        pending_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

impl DndSignals {
    pub fn is_dragging(&self, index: usize) -> bool {
        self.dragging_read.get() == Some(index)
    }

    /// Highlight check for a row or gap
    pub fn is_target(&self, target: DropTarget) -> bool {
        self.drop_target_read.get() == Some(target)
    }
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_write.set(None);
    dnd.drag_just_ended_write.set(true);

    // swallow the click that follows mouseup
    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            100,
        );
        cb.forget();
    }
}

/// Mousedown on a row: record a pending drag and its start position
pub fn make_on_mousedown(
    dnd: DndSignals,
    index: usize,
) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some()
                || target.dyn_ref::<web_sys::HtmlButtonElement>().is_some()
            {
                return;
            }
        }
        dnd.pending_write.set(Some(index));
        dnd.start_x_write.set(ev.client_x());
        dnd.start_y_write.set(ev.client_y());
    }
}

fn bind_global_mousemove(dnd: DndSignals) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove =
        Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
            let pending = dnd.pending_read.get_untracked();
            if pending.is_none() || dnd.dragging_read.get_untracked().is_some() {
                return;
            }
            let dx = (ev.client_x() - dnd.start_x_read.get_untracked()).abs();
            let dy = (ev.client_y() - dnd.start_y_read.get_untracked()).abs();
            if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
                dnd.dragging_write.set(pending);
            }
        });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc
            .add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
}

/// Mouseenter on a row or gap
pub fn make_on_mouseenter(
    dnd: DndSignals,
    target: DropTarget,
) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        match (dnd.dragging_read.get_untracked(), target) {
            (None, _) => {}
            // hovering the dragged row itself is not a target
            (Some(dragging), DropTarget::Item(index)) if dragging == index => {
                dnd.drop_target_write.set(None);
            }
            (Some(_), target) => dnd.drop_target_write.set(Some(target)),
        }
    }
}

pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_read.get_untracked().is_some() {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Bind the document-level mouseup (drop) and mousemove (threshold)
/// handlers. `on_drop` receives the dragged index and where it was let go.
pub fn bind_global_mouseup<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(usize, DropTarget) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup =
        Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
            let dragging = dnd.dragging_read.get_untracked();
            let drop_target = dnd.drop_target_read.get_untracked();
            dnd.pending_write.set(None);

            // a plain click ends with no target and falls through to on:click
            if dragging.is_none() {
                return;
            }
            end_drag(&dnd);
            if let (Some(from), Some(target)) = (dragging, drop_target) {
                on_drop(from, target);
            }
        });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }
    on_mouseup.forget();

    bind_global_mousemove(dnd);
}
