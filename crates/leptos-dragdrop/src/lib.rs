//! Leptos DragDrop Utilities
//!
//! Native HTML5 drag-and-drop for Leptos.
//! The dragged entity id travels in the platform drag payload under a
//! caller-chosen format; drop zones are identified by a caller-chosen key.

use leptos::prelude::*;
use web_sys::DragEvent;

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals<Z: Copy + PartialEq + Send + Sync + 'static> {
    /// `DataTransfer` format the dragged id is written under
    pub format: &'static str,
    /// Id currently being dragged (set on dragstart)
    pub dragging_id_read: ReadSignal<Option<u32>>,
    pub dragging_id_write: WriteSignal<Option<u32>>,
    /// Zone currently hovered by a drag
    pub over_zone_read: ReadSignal<Option<Z>>,
    pub over_zone_write: WriteSignal<Option<Z>>,
}

impl<Z: Copy + PartialEq + Send + Sync + 'static> DndSignals<Z> {
    /// Whether `zone` is the current hover target
    pub fn is_over(&self, zone: Z) -> bool {
        self.over_zone_read.get() == Some(zone)
    }

    pub fn is_dragging(&self, id: u32) -> bool {
        self.dragging_id_read.get() == Some(id)
    }
}

pub fn create_dnd_signals<Z: Copy + PartialEq + Send + Sync + 'static>(format: &'static str) -> DndSignals<Z> {
    let (dragging_id_read, dragging_id_write) = signal(None::<u32>);
    let (over_zone_read, over_zone_write) = signal(None::<Z>);
    DndSignals {
        format,
        dragging_id_read,
        dragging_id_write,
        over_zone_read,
        over_zone_write,
    }
}

/// Parse a drag payload back into an id
pub fn parse_payload(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

/// Store `id` in the event's drag payload. Returns false when the browser
/// gave us no `DataTransfer` to write into.
pub fn write_payload(ev: &DragEvent, format: &str, id: u32) -> bool {
    match ev.data_transfer() {
        Some(dt) => dt.set_data(format, &id.to_string()).is_ok(),
        None => false,
    }
}

/// Read the dragged id from the event's drag payload
pub fn read_payload(ev: &DragEvent, format: &str) -> Option<u32> {
    let dt = ev.data_transfer()?;
    let raw = dt.get_data(format).ok()?;
    parse_payload(&raw)
}

/// End drag operation
pub fn end_drag<Z: Copy + PartialEq + Send + Sync + 'static>(dnd: &DndSignals<Z>) {
    dnd.dragging_id_write.set(None);
    dnd.over_zone_write.set(None);
}

/// dragstart handler for a draggable element
pub fn make_on_dragstart<Z: Copy + PartialEq + Send + Sync + 'static>(
    dnd: DndSignals<Z>,
    id: u32,
) -> impl Fn(DragEvent) + Copy + 'static {
    move |ev: DragEvent| {
        write_payload(&ev, dnd.format, id);
        dnd.dragging_id_write.set(Some(id));
    }
}

/// dragend handler; fires on the source element whether or not a drop happened
pub fn make_on_dragend<Z: Copy + PartialEq + Send + Sync + 'static>(
    dnd: DndSignals<Z>,
) -> impl Fn(DragEvent) + Copy + 'static {
    move |_ev: DragEvent| end_drag(&dnd)
}

/// dragover handler for a drop zone. Cancelling the event is what marks the
/// element as a valid drop target.
pub fn make_on_dragover<Z: Copy + PartialEq + Send + Sync + 'static>(
    dnd: DndSignals<Z>,
    zone: Z,
) -> impl Fn(DragEvent) + Copy + 'static {
    move |ev: DragEvent| {
        ev.prevent_default();
        if dnd.over_zone_read.get_untracked() != Some(zone) {
            dnd.over_zone_write.set(Some(zone));
        }
    }
}

/// dragleave handler for a drop zone
pub fn make_on_dragleave<Z: Copy + PartialEq + Send + Sync + 'static>(
    dnd: DndSignals<Z>,
    zone: Z,
) -> impl Fn(DragEvent) + Copy + 'static {
    move |_ev: DragEvent| {
        if dnd.over_zone_read.get_untracked() == Some(zone) {
            dnd.over_zone_write.set(None);
        }
    }
}

/// drop handler for a drop zone.
/// Prefers the platform payload, falls back to the tracked dragging id.
pub fn make_on_drop<Z, F>(dnd: DndSignals<Z>, on_drop: F) -> impl Fn(DragEvent) + Clone + 'static
where
    Z: Copy + PartialEq + Send + Sync + 'static,
    F: Fn(u32) + Clone + 'static,
{
    move |ev: DragEvent| {
        ev.prevent_default();
        let dropped = read_payload(&ev, dnd.format).or_else(|| dnd.dragging_id_read.get_untracked());
        end_drag(&dnd);
        if let Some(id) = dropped {
            on_drop(id);
        }
    }
}
