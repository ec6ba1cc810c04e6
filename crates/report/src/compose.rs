// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Deterministic multi-page report composition.
//!
//! Blocks rasterize independently, scale to the fixed content width, and
//! stack down each page in input order. A block that would cross the
//! bottom margin starts a new page instead; a block taller than a whole
//! page is placed anyway and overflows past the margin, which is an
//! accepted limitation. Nothing is reordered and no block splits across
//! pages. The compositor holds no state between calls.

use crate::raster::{BlockRasterizer, RasterError, ReportSection};
use thiserror::Error;
use time::Date;
use time::macros::format_description;
use tracing::debug;

/// Fixed page geometry, in display units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    /// Full page width.
    pub page_width: f64,
    /// Full page height.
    pub page_height: f64,
    /// Margin on all four sides.
    pub margin: f64,
    /// Height reserved for the directly rendered title on page one.
    pub title_height: f64,
}

impl PageLayout {
    /// The production layout: 210x297 display units with a 10-unit
    /// margin.
    #[must_use]
    pub const fn a4() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin: 10.0,
            title_height: 12.0,
        }
    }

    /// Width available to scaled blocks.
    #[must_use]
    pub const fn content_width(&self) -> f64 {
        self.page_width - 2.0 * self.margin
    }

    /// Lowest cursor position a block may extend to.
    #[must_use]
    pub const fn bottom_limit(&self) -> f64 {
        self.page_height - self.margin
    }
}

/// One block placed on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Index of the section in the input order.
    pub section_index: usize,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Scaled width (always the content width).
    pub width: f64,
    /// Scaled height, preserving the bitmap aspect ratio.
    pub height: f64,
}

/// One fixed-size page of the composed document.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPage {
    /// 1-indexed page number.
    pub number: usize,
    /// Blocks on this page, top to bottom.
    pub placements: Vec<Placement>,
}

/// A fully composed, paginated document.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    /// Title rendered directly at the top of the first page.
    pub title: String,
    /// Geometry every page shares.
    pub layout: PageLayout,
    /// Pages in order.
    pub pages: Vec<ReportPage>,
}

/// Errors that abort a composition.
///
/// One failed block fails the whole document; partial reports are never
/// produced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ComposeError {
    /// A block could not be rasterized.
    #[error("Failed to rasterize report block '{block}'")]
    Raster {
        /// Title of the failing section.
        block: String,
        /// The underlying rasterization failure.
        #[source]
        source: RasterError,
    },
    /// A block rasterized to a zero-width bitmap, which cannot be
    /// scaled.
    #[error("Report block '{block}' rasterized to an empty bitmap")]
    EmptyBitmap {
        /// Title of the failing section.
        block: String,
    },
}

/// Composes the sections into a paginated document.
///
/// Every section is rasterized first; the layout pass is pure and
/// cannot fail, so a rasterization error aborts before any page exists.
///
/// # Errors
///
/// Returns a [`ComposeError`] if any block fails to rasterize or
/// measures zero width.
pub async fn compose<R: BlockRasterizer>(
    title: &str,
    sections: &[ReportSection],
    rasterizer: &R,
    layout: PageLayout,
) -> Result<ReportDocument, ComposeError> {
    let mut bitmaps = Vec::with_capacity(sections.len());
    for section in sections {
        let bitmap =
            rasterizer
                .rasterize(section)
                .await
                .map_err(|source| ComposeError::Raster {
                    block: section.title.clone(),
                    source,
                })?;
        if bitmap.width_px == 0 {
            return Err(ComposeError::EmptyBitmap {
                block: section.title.clone(),
            });
        }
        bitmaps.push(bitmap);
    }

    let mut pages = Vec::new();
    let mut placements: Vec<Placement> = Vec::new();
    // The title band occupies the top of page one only.
    let mut cursor = layout.margin + layout.title_height;

    for (section_index, bitmap) in bitmaps.iter().enumerate() {
        let width = layout.content_width();
        let height = f64::from(bitmap.height_px) * width / f64::from(bitmap.width_px);

        if cursor + height > layout.bottom_limit() && !placements.is_empty() {
            pages.push(ReportPage {
                number: pages.len() + 1,
                placements: std::mem::take(&mut placements),
            });
            cursor = layout.margin;
        }

        placements.push(Placement {
            section_index,
            x: layout.margin,
            y: cursor,
            width,
            height,
        });
        cursor += height;
    }

    if !placements.is_empty() || pages.is_empty() {
        pages.push(ReportPage {
            number: pages.len() + 1,
            placements,
        });
    }

    debug!(
        sections = sections.len(),
        pages = pages.len(),
        "Composed report document"
    );

    Ok(ReportDocument {
        title: title.to_string(),
        layout,
        pages,
    })
}

/// Builds the dated download name for a composed document.
#[must_use]
pub fn report_file_name(prefix: &str, date: Date) -> String {
    let format = format_description!("[year]-[month]-[day]");
    date.format(&format).map_or_else(
        |_| format!("{prefix}.pdf"),
        |formatted| format!("{prefix}-{formatted}.pdf"),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::raster::Bitmap;
    use time::macros::date;

    /// Returns fixed sizes per section id; fails on a designated id.
    struct StubRasterizer {
        sizes: Vec<(u32, u32)>,
        fail_index: Option<usize>,
    }

    impl BlockRasterizer for StubRasterizer {
        fn rasterize(
            &self,
            section: &ReportSection,
        ) -> impl Future<Output = Result<Bitmap, RasterError>> + Send {
            let index: usize = section.id.parse().unwrap();
            let fail = self.fail_index == Some(index);
            let (width_px, height_px) = self.sizes[index];
            async move {
                if fail {
                    return Err(RasterError {
                        reason: String::from("canvas unavailable"),
                    });
                }
                Ok(Bitmap {
                    width_px,
                    height_px,
                })
            }
        }
    }

    fn sections(n: usize) -> Vec<ReportSection> {
        (0..n)
            .map(|i| ReportSection {
                id: i.to_string(),
                title: format!("Section {i}"),
            })
            .collect()
    }

    /// 200 wide with 10 margins: content width 180, so a 180-wide bitmap
    /// keeps its pixel height in display units.
    const fn test_layout() -> PageLayout {
        PageLayout {
            page_width: 200.0,
            page_height: 260.0,
            margin: 10.0,
            title_height: 0.0,
        }
    }

    #[tokio::test]
    async fn test_blocks_paginate_when_they_would_cross_the_bottom_margin() {
        let rasterizer = StubRasterizer {
            sizes: vec![(180, 100), (180, 150), (180, 80)],
            fail_index: None,
        };
        let doc = compose("Ops Report", &sections(3), &rasterizer, test_layout())
            .await
            .unwrap();

        // Page 1 holds the first block; the second would cross the
        // bottom margin (10 + 100 + 150 > 250) and starts page 2; the
        // third fits below it (10 + 150 + 80 = 240 <= 250).
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.pages[0].placements.len(), 1);
        assert_eq!(doc.pages[1].placements.len(), 2);

        assert_eq!(doc.pages[1].placements[0].y, 10.0);
        assert_eq!(doc.pages[1].placements[0].height, 150.0);
        assert_eq!(doc.pages[1].placements[1].y, 160.0);
        assert_eq!(doc.pages[1].placements[1].height, 80.0);
    }

    #[tokio::test]
    async fn test_blocks_keep_input_order_and_never_split() {
        let rasterizer = StubRasterizer {
            sizes: vec![(180, 120), (180, 120), (180, 120), (180, 120)],
            fail_index: None,
        };
        let doc = compose("Ops Report", &sections(4), &rasterizer, test_layout())
            .await
            .unwrap();

        let order: Vec<usize> = doc
            .pages
            .iter()
            .flat_map(|p| p.placements.iter().map(|pl| pl.section_index))
            .collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
        // Each placement is whole; heights never shrink to fit.
        for page in &doc.pages {
            for placement in &page.placements {
                assert_eq!(placement.height, 120.0);
            }
        }
    }

    #[tokio::test]
    async fn test_oversized_block_overflows_its_own_page() {
        let rasterizer = StubRasterizer {
            sizes: vec![(180, 400), (180, 50)],
            fail_index: None,
        };
        let doc = compose("Ops Report", &sections(2), &rasterizer, test_layout())
            .await
            .unwrap();

        // The oversized block stays alone on page 1, extending past the
        // bottom margin; the next block starts page 2.
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.pages[0].placements[0].height, 400.0);
        assert_eq!(doc.pages[1].placements[0].section_index, 1);
    }

    #[tokio::test]
    async fn test_scaling_preserves_aspect_ratio() {
        let rasterizer = StubRasterizer {
            sizes: vec![(360, 120)],
            fail_index: None,
        };
        let doc = compose("Ops Report", &sections(1), &rasterizer, test_layout())
            .await
            .unwrap();

        let placement = &doc.pages[0].placements[0];
        assert_eq!(placement.width, 180.0);
        assert_eq!(placement.height, 60.0);
    }

    #[tokio::test]
    async fn test_title_band_offsets_the_first_page_only() {
        let layout = PageLayout {
            title_height: 20.0,
            ..test_layout()
        };
        let rasterizer = StubRasterizer {
            sizes: vec![(180, 200), (180, 100)],
            fail_index: None,
        };
        let doc = compose("Ops Report", &sections(2), &rasterizer, layout)
            .await
            .unwrap();

        assert_eq!(doc.pages[0].placements[0].y, 30.0);
        assert_eq!(doc.pages[1].placements[0].y, 10.0);
    }

    #[tokio::test]
    async fn test_one_failed_block_aborts_the_whole_document() {
        let rasterizer = StubRasterizer {
            sizes: vec![(180, 100), (180, 100), (180, 100)],
            fail_index: Some(1),
        };
        let result = compose("Ops Report", &sections(3), &rasterizer, test_layout()).await;

        match result {
            Err(ComposeError::Raster { block, .. }) => assert_eq!(block, "Section 1"),
            other => panic!("Expected raster failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_section_list_still_produces_the_title_page() {
        let rasterizer = StubRasterizer {
            sizes: Vec::new(),
            fail_index: None,
        };
        let doc = compose("Ops Report", &[], &rasterizer, PageLayout::a4())
            .await
            .unwrap();
        assert_eq!(doc.pages.len(), 1);
        assert!(doc.pages[0].placements.is_empty());
    }

    #[test]
    fn test_file_name_carries_the_date() {
        let name = report_file_name("operations-report", date!(2026 - 08 - 29));
        assert_eq!(name, "operations-report-2026-08-29.pdf");
    }

    #[tokio::test]
    async fn test_zero_width_bitmap_is_rejected() {
        let rasterizer = StubRasterizer {
            sizes: vec![(0, 100)],
            fail_index: None,
        };
        let result = compose("Ops Report", &sections(1), &rasterizer, test_layout()).await;
        assert!(matches!(result, Err(ComposeError::EmptyBitmap { .. })));
    }
}
