//! A renderer that records what the chart asked it to draw.

use parking_lot::Mutex;
use xychart::{ChartRenderer, DVec2, Entry, Highlight, Rect};

/// Records a draw call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    BeginFrame {
        content_rect: Rect,
    },
    Entry {
        dataset_index: usize,
        entry_index: usize,
        value: DVec2,
        center: DVec2,
        extent: f64,
    },
    Highlight {
        highlight: Highlight,
        center: DVec2,
        extent: f64,
    },
    EndFrame,
}

/// [`ChartRenderer`] that records every call.
///
/// Calls are kept behind a `Mutex` so assertions can run through `&self`
/// while the renderer is shared, e.g. across a test thread boundary.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    calls: Mutex<Vec<DrawCall>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of all recorded calls.
    pub fn calls(&self) -> Vec<DrawCall> {
        self.calls.lock().clone()
    }

    /// Entry draw calls of the most recent frame.
    pub fn last_frame_entries(&self) -> Vec<DrawCall> {
        let calls = self.calls.lock();
        let start = calls
            .iter()
            .rposition(|call| matches!(call, DrawCall::BeginFrame { .. }))
            .unwrap_or(0);
        calls[start..]
            .iter()
            .filter(|call| matches!(call, DrawCall::Entry { .. }))
            .cloned()
            .collect()
    }

    /// Number of entries drawn across all frames.
    pub fn entry_count(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, DrawCall::Entry { .. }))
            .count()
    }

    /// Pixel center an entry was last drawn at.
    pub fn center_of(&self, dataset_index: usize, entry_index: usize) -> Option<DVec2> {
        self.calls.lock().iter().rev().find_map(|call| match call {
            DrawCall::Entry {
                dataset_index: d,
                entry_index: e,
                center,
                ..
            } if *d == dataset_index && *e == entry_index => Some(*center),
            _ => None,
        })
    }

    /// The highlight drawn in the most recent frame, if any.
    pub fn last_highlight(&self) -> Option<Highlight> {
        let calls = self.calls.lock();
        let start = calls
            .iter()
            .rposition(|call| matches!(call, DrawCall::BeginFrame { .. }))
            .unwrap_or(0);
        calls[start..].iter().find_map(|call| match call {
            DrawCall::Highlight { highlight, .. } => Some(*highlight),
            _ => None,
        })
    }

    /// Number of completed frames.
    pub fn frame_count(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, DrawCall::EndFrame))
            .count()
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }
}

impl<E: Entry> ChartRenderer<E> for RecordingRenderer {
    fn begin_frame(&mut self, content_rect: Rect) {
        self.calls.lock().push(DrawCall::BeginFrame { content_rect });
    }

    fn draw_entry(&mut self, dataset_index: usize, entry_index: usize, entry: &E, center: DVec2, extent: f64) {
        self.calls.lock().push(DrawCall::Entry {
            dataset_index,
            entry_index,
            value: entry.position(),
            center,
            extent,
        });
    }

    fn draw_highlight(&mut self, highlight: Highlight, _entry: &E, center: DVec2, extent: f64) {
        self.calls.lock().push(DrawCall::Highlight {
            highlight,
            center,
            extent,
        });
    }

    fn end_frame(&mut self) {
        self.calls.lock().push(DrawCall::EndFrame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xychart::XyEntry;

    #[test]
    fn test_records_frames() {
        let mut renderer = RecordingRenderer::new();
        let entry = XyEntry::new(1.0, 2.0);

        ChartRenderer::<XyEntry>::begin_frame(&mut renderer, Rect::new(0.0, 0.0, 10.0, 10.0));
        renderer.draw_entry(0, 0, &entry, DVec2::new(3.0, 4.0), 6.0);
        ChartRenderer::<XyEntry>::end_frame(&mut renderer);

        assert_eq!(renderer.frame_count(), 1);
        assert_eq!(renderer.entry_count(), 1);
        assert_eq!(renderer.center_of(0, 0), Some(DVec2::new(3.0, 4.0)));
        assert_eq!(renderer.last_frame_entries().len(), 1);

        renderer.clear_calls();
        assert!(renderer.calls().is_empty());
    }
}
