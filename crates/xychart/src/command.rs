//! Commands queued from other threads and applied on the next tick.

use std::sync::mpsc::Sender;

use glam::DVec2;
use xychart_core::geometry::Size;

use crate::data::Entry;
use crate::easing::EasingFunction;
use crate::error::{ChartError, ChartResult};
use crate::highlight::Highlight;

/// A request executed by [`ChartCore::tick`](crate::chart::ChartCore::tick)
/// on the thread that owns the chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartCommand<E> {
    SetChartSize(Size),
    ZoomIn,
    ZoomOut,
    /// Zoom by a factor about a chart pixel.
    Zoom { scale: DVec2, pivot: DVec2 },
    FitScreen,
    /// Left edge at `x`, centered on `y`.
    MoveViewTo(DVec2),
    CenterViewTo(DVec2),
    /// Absolute scale, centered on a value.
    ZoomTo { scale: DVec2, center: DVec2 },
    CenterViewToAnimated {
        target: DVec2,
        duration: f64,
        easing: Option<EasingFunction>,
    },
    ZoomAndCenterAnimated {
        scale: DVec2,
        target: DVec2,
        duration: f64,
        easing: Option<EasingFunction>,
    },
    StopDeceleration,
    Highlight(Option<Highlight>),
    AddEntry { dataset_index: usize, entry: E },
    NotifyDataSetChanged,
}

/// Cloneable, sendable handle that enqueues [`ChartCommand`]s.
#[derive(Debug)]
pub struct ChartHandle<E> {
    sender: Sender<ChartCommand<E>>,
}

impl<E> Clone for ChartHandle<E> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<E: Entry + Send> ChartHandle<E> {
    pub(crate) fn new(sender: Sender<ChartCommand<E>>) -> Self {
        Self { sender }
    }

    /// Enqueue a command. Fails once the chart has been dropped.
    pub fn send(&self, command: ChartCommand<E>) -> ChartResult<()> {
        self.sender
            .send(command)
            .map_err(|_| ChartError::ChannelDisconnected)
    }

    pub fn set_chart_size(&self, size: Size) -> ChartResult<()> {
        self.send(ChartCommand::SetChartSize(size))
    }

    pub fn zoom_in(&self) -> ChartResult<()> {
        self.send(ChartCommand::ZoomIn)
    }

    pub fn zoom_out(&self) -> ChartResult<()> {
        self.send(ChartCommand::ZoomOut)
    }

    pub fn center_view_to(&self, x: f64, y: f64) -> ChartResult<()> {
        self.send(ChartCommand::CenterViewTo(DVec2::new(x, y)))
    }

    /// Append an entry; ranges widen on the next tick.
    pub fn add_entry(&self, dataset_index: usize, entry: E) -> ChartResult<()> {
        self.send(ChartCommand::AddEntry { dataset_index, entry })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::XyEntry;

    #[test]
    fn test_send_after_receiver_dropped() {
        let (sender, receiver) = std::sync::mpsc::channel();
        let handle = ChartHandle::<XyEntry>::new(sender);
        assert!(handle.zoom_in().is_ok());
        assert_eq!(receiver.try_recv(), Ok(ChartCommand::ZoomIn));

        drop(receiver);
        assert_eq!(handle.zoom_out(), Err(ChartError::ChannelDisconnected));
    }

    #[test]
    fn test_handle_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<ChartHandle<XyEntry>>();
    }
}
