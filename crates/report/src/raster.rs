// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rasterization boundary for report blocks.
//!
//! Turning a visual block into a bitmap is an external collaborator
//! capability; the compositor only needs the measured pixel size to lay
//! a block out. Pixel data stays with the rasterizer.

use thiserror::Error;

/// Measured size of one rasterized block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitmap {
    /// Width in source pixels.
    pub width_px: u32,
    /// Height in source pixels.
    pub height_px: u32,
}

/// One renderable region of the dashboard, identified for rasterization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    /// Stable identifier the rasterizer resolves to a visual region.
    pub id: String,
    /// Section heading, used in diagnostics and error reporting.
    pub title: String,
}

/// A single rasterization failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Rasterization failed: {reason}")]
pub struct RasterError {
    /// What went wrong while rendering the block.
    pub reason: String,
}

/// External capability: render one visual block to a bitmap.
pub trait BlockRasterizer {
    /// Rasterizes one section and reports its measured size.
    ///
    /// # Errors
    ///
    /// Returns a [`RasterError`] when the block cannot be rendered; the
    /// compositor aborts the whole document in response.
    fn rasterize(
        &self,
        section: &ReportSection,
    ) -> impl Future<Output = Result<Bitmap, RasterError>> + Send;
}
