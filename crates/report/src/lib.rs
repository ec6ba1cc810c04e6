// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod compose;
mod raster;

pub use compose::{
    ComposeError, PageLayout, Placement, ReportDocument, ReportPage, compose, report_file_name,
};
pub use raster::{Bitmap, BlockRasterizer, RasterError, ReportSection};
