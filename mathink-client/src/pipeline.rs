//! Drawing → image → equation → solution.

use mathink_core::Drawing;
use mathink_renderer::{ExportService, ExportedImage};
use serde::Serialize;

use crate::client::{MathApiClient, Recognition};
use crate::error::ClientResult;
use crate::solution::Solution;

/// Everything produced by one capture-and-solve round.
#[derive(Debug, Clone, Serialize)]
pub struct DrawingSolution {
    /// What the recognizer read from the drawing.
    pub recognition: Recognition,
    /// The solver's answer for the recognized equation.
    pub solution: Solution,
}

/// Chains the export service with the remote services.
pub struct CapturePipeline {
    exports: ExportService,
    api: MathApiClient,
}

impl CapturePipeline {
    /// Create a pipeline from its parts.
    #[must_use]
    pub fn new(exports: ExportService, api: MathApiClient) -> Self {
        Self { exports, api }
    }

    /// The underlying API client.
    #[must_use]
    pub fn api(&self) -> &MathApiClient {
        &self.api
    }

    /// Export a snapshot of `drawing`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ClientError::Export`] if the drawing is empty, another
    /// export is in flight, or rasterization fails.
    pub async fn export(&self, drawing: &Drawing) -> ClientResult<ExportedImage> {
        let ticket = self.exports.request(drawing)?;
        let exported = ticket.wait().await?;
        for warning in &exported.warnings {
            tracing::warn!("{warning}");
        }
        Ok(exported)
    }

    /// Export `drawing` and send it for recognition.
    ///
    /// # Errors
    ///
    /// Returns an error if the export or the recognition request fails.
    pub async fn recognize_drawing(&self, drawing: &Drawing) -> ClientResult<Recognition> {
        let exported = self.export(drawing).await?;
        self.api.recognize(&exported.image).await
    }

    /// Export, recognize and solve `drawing`.
    ///
    /// # Errors
    ///
    /// Returns the first failure among export, recognition and solving.
    pub async fn solve_drawing(
        &self,
        drawing: &Drawing,
        query: &str,
    ) -> ClientResult<DrawingSolution> {
        let recognition = self.recognize_drawing(drawing).await?;
        tracing::info!("Recognized {:?}, solving", recognition.equation);
        let solution = self.api.solve(&recognition.equation, query).await?;
        Ok(DrawingSolution {
            recognition,
            solution,
        })
    }
}
