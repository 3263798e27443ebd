//! Drop Zone Component
//!
//! A horizontal gap between rows of a sortable list; hovering it while
//! dragging targets the slot before `slot`.

use leptos::prelude::*;
use leptos_dragdrop::*;

#[component]
pub fn DropZone(dnd: DndSignals, slot: usize) -> impl IntoView {
    let target = DropTarget::Slot(slot);
    let on_mouseenter = make_on_mouseenter(dnd, target);
    let on_mouseleave = make_on_mouseleave(dnd);

    let zone_class = move || {
        let mut c = String::from("drop-zone");
        if dnd.dragging_read.get().is_none() {
            c.push_str(" hidden");
        }
        if dnd.is_target(target) {
            c.push_str(" active");
        }
        c
    };

    view! {
        <div
            class=zone_class
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        />
    }
}
