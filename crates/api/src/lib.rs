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

mod adapter;
mod dto;
mod error;
mod source;

pub use adapter::{normalize_branches, normalize_dashboard, normalize_shipment, normalize_shipments};
pub use dto::{BranchInfo, ChartBundle, DashboardData, SeriesPoint, SummaryStats};
pub use error::FetchError;
pub use source::{AggregateSource, BranchDirectorySource, ShipmentSource, TimePeriod};
