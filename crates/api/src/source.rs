// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fetch seams for the external read collaborators.
//!
//! The dashboard never talks to a transport directly; it consumes these
//! traits. Implementations own retries, interceptors, and protocol
//! details. All fetches are idempotent reads.

use crate::dto::{BranchInfo, DashboardData};
use crate::error::FetchError;
use parcel_ops_core::ViewerScope;
use parcel_ops_domain::ShipmentRecord;
use serde::{Deserialize, Serialize};

/// Time period the summary aggregates are scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePeriod {
    /// The current week.
    Week,
    /// The current month.
    Month,
    /// The current quarter.
    Quarter,
    /// The current year.
    Year,
}

impl TimePeriod {
    /// Returns the string representation of the period.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }
}

impl std::fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Source of summary aggregates and chart series.
pub trait AggregateSource: Send + Sync + 'static {
    /// Fetches the aggregate payload for a period and viewer scope.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] when the collaborator cannot produce a
    /// usable response; the caller keeps its previous snapshot.
    fn fetch_dashboard(
        &self,
        period: TimePeriod,
        scope: &ViewerScope,
    ) -> impl Future<Output = Result<DashboardData, FetchError>> + Send;
}

/// Source of the full shipment collection for a viewer scope.
pub trait ShipmentSource: Send + Sync + 'static {
    /// Fetches the ordered shipment collection.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] when the collaborator cannot produce a
    /// usable response.
    fn fetch_shipments(
        &self,
        scope: &ViewerScope,
    ) -> impl Future<Output = Result<Vec<ShipmentRecord>, FetchError>> + Send;
}

/// Source of the branch directory. Admin scope only.
pub trait BranchDirectorySource: Send + Sync + 'static {
    /// Fetches the branch directory.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] when the collaborator cannot produce a
    /// usable response.
    fn fetch_branches(&self) -> impl Future<Output = Result<Vec<BranchInfo>, FetchError>> + Send;
}
