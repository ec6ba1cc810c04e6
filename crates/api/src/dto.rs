// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Typed DTOs for the dashboard's read collaborators.
//!
//! `DashboardData` is the unit of publication: one fetch response writes
//! stats and charts together as a single value, so a reader can never
//! observe a partial update.

use serde::{Deserialize, Serialize};

/// Summary aggregates for the stat cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Shipments currently in the pickup phase.
    pub pickup_count: u64,
    /// Shipments currently in transit.
    pub in_transit_count: u64,
    /// Delivered shipments.
    pub delivered_count: u64,
    /// Shipments in the return flow.
    pub return_count: u64,
    /// Shipments with an issue state.
    pub issue_count: u64,
    /// All shipments in scope for the selected period.
    pub total_count: u64,
    /// Revenue for the period, in integer minor units.
    pub total_revenue_minor_units: i64,
}

/// One labelled point in a chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Axis label; "N/A" when the source omitted one.
    pub label: String,
    /// Point value.
    pub value: f64,
}

/// The four chart series the dashboard renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartBundle {
    /// Revenue per week.
    pub weekly_revenue: Vec<SeriesPoint>,
    /// Successful-delivery trend per week.
    pub weekly_delivery_trend: Vec<SeriesPoint>,
    /// Shipment volume per service category.
    pub category_flows: Vec<SeriesPoint>,
    /// Product mix per branch.
    pub branch_product_mix: Vec<SeriesPoint>,
}

/// The full aggregate payload for one dashboard fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    /// Stat card aggregates.
    pub stats: SummaryStats,
    /// Chart series.
    pub charts: ChartBundle,
}

/// One entry in the branch directory (admin scope only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchInfo {
    /// Stable branch code.
    pub code: String,
    /// Display name; "N/A" when the source omitted one.
    pub name: String,
}
