//! Keyboard stand-in for drag and drop of header cells.
//!
//! A gesture starts on a source column, the hovered destination is moved
//! around, and it ends in a [`ReorderEvent`]. A cancelled gesture reports no
//! destination, the same way a pointer drop outside the header would.

use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderEvent {
    pub source: usize,
    pub destination: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Drag {
    source: usize,
    hover: usize,
    columns: usize,
}

#[derive(Debug, Default)]
pub struct DragGesture {
    drag: Option<Drag>,
}

impl DragGesture {
    /// Starts dragging the column at `source`. Returns false for an out of range source.
    pub fn pick(&mut self, source: usize, columns: usize) -> bool {
        if source >= columns {
            return false;
        }
        self.drag = Some(Drag {
            source,
            hover: source,
            columns,
        });
        trace!("Picked column {source}");
        true
    }

    pub fn is_active(&self) -> bool {
        self.drag.is_some()
    }

    pub fn source(&self) -> Option<usize> {
        self.drag.map(|d| d.source)
    }

    pub fn hover(&self) -> Option<usize> {
        self.drag.map(|d| d.hover)
    }

    pub fn move_left(&mut self) {
        if let Some(drag) = self.drag.as_mut() {
            drag.hover = drag.hover.saturating_sub(1);
        }
    }

    pub fn move_right(&mut self) {
        if let Some(drag) = self.drag.as_mut()
            && drag.hover + 1 < drag.columns
        {
            drag.hover += 1;
        }
    }

    pub fn drop(&mut self) -> Option<ReorderEvent> {
        self.drag.take().map(|d| ReorderEvent {
            source: d.source,
            destination: Some(d.hover),
        })
    }

    pub fn cancel(&mut self) -> Option<ReorderEvent> {
        self.drag.take().map(|d| ReorderEvent {
            source: d.source,
            destination: None,
        })
    }
}
