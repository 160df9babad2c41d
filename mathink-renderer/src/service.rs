//! Single-flight asynchronous export.
//!
//! Each request snapshots the drawing, rasterizes it on the blocking pool and
//! resolves exactly once. Only one export may be in flight per service; a
//! second request is rejected rather than racing two encodes. There is no
//! cancellation: dropping the ticket leaves the export running to completion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use mathink_core::Drawing;
use tokio::sync::oneshot;

use crate::backend::{RasterBackend, SkiaBackend};
use crate::error::{RenderError, RenderResult};
use crate::export::{DrawingExporter, ExportConfig, ExportedImage};

/// Runs exports off the caller's thread, one at a time.
pub struct ExportService<B = SkiaBackend> {
    exporter: Arc<DrawingExporter<B>>,
    in_flight: Arc<AtomicBool>,
}

impl ExportService<SkiaBackend> {
    /// Create a service using the tiny-skia backend.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self::with_exporter(DrawingExporter::new(config))
    }
}

impl<B: RasterBackend + 'static> ExportService<B> {
    /// Create a service around an existing exporter.
    #[must_use]
    pub fn with_exporter(exporter: DrawingExporter<B>) -> Self {
        Self {
            exporter: Arc::new(exporter),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether an export is currently running.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Start exporting a snapshot of `drawing`.
    ///
    /// Later changes to `drawing` do not affect the exported image.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::EmptyInput`] for a drawing without strokes,
    /// [`RenderError::Busy`] while another export is in flight, or
    /// [`RenderError::NoBackend`] when called outside a tokio runtime.
    pub fn request(&self, drawing: &Drawing) -> RenderResult<ExportTicket> {
        if drawing.is_empty() {
            return Err(RenderError::EmptyInput);
        }
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| RenderError::NoBackend(format!("no async runtime: {e}")))?;

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("Rejecting export request: another export is in flight");
            return Err(RenderError::Busy);
        }

        let slot = InFlightSlot(Arc::clone(&self.in_flight));
        let snapshot = drawing.clone();
        let exporter = Arc::clone(&self.exporter);
        let (tx, rx) = oneshot::channel();

        tracing::debug!("Export requested for {} strokes", snapshot.len());
        runtime.spawn_blocking(move || {
            let result = exporter.export(&snapshot);
            // Free the slot before resolving so the caller can export again
            // as soon as it sees the result.
            drop(slot);
            if tx.send(result).is_err() {
                tracing::debug!("Export finished after its ticket was dropped");
            }
        });

        Ok(ExportTicket { rx })
    }
}

/// Pending result of an export request.
#[derive(Debug)]
pub struct ExportTicket {
    rx: oneshot::Receiver<RenderResult<ExportedImage>>,
}

impl ExportTicket {
    /// Wait for the export to finish.
    ///
    /// # Errors
    ///
    /// Returns the export's error, or [`RenderError::NoBackend`] if the export
    /// task died without producing a result.
    pub async fn wait(self) -> RenderResult<ExportedImage> {
        self.rx
            .await
            .map_err(|_| RenderError::NoBackend("export task ended without a result".to_string()))?
    }
}

/// Clears the in-flight flag when dropped, including on panic.
struct InFlightSlot(Arc<AtomicBool>);

impl Drop for InFlightSlot {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
