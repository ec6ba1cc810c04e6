// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dashboard view state.
//!
//! One `DashboardView` exists per active dashboard and exclusively owns
//! the in-memory shipment snapshot plus the current phase, criteria, and
//! page selection. Changing the active phase or any criterion resets the
//! page to 1 so stale page numbers never carry into a smaller result set.

use crate::filter::{FilterCriteria, apply_filters};
use crate::page::{PageView, paginate};
use crate::scope::ViewerScope;
use parcel_ops_domain::{Phase, ShipmentRecord};
use std::num::NonZeroUsize;
use tracing::debug;

/// Per-phase record counts for the summary strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseCounts {
    /// Records in the pickup phase.
    pub pickup: usize,
    /// Records in transit.
    pub in_transit: usize,
    /// Delivered records.
    pub delivered: usize,
    /// Records in the return flow.
    pub returns: usize,
    /// Records with an issue state.
    pub issues: usize,
    /// Records whose state falls outside the taxonomy. Counted in the
    /// feed total but shown in no phase view.
    pub unclassified: usize,
    /// All records in the feed, unclassified included.
    pub total: usize,
}

/// View state for one active dashboard.
#[derive(Debug, Clone)]
pub struct DashboardView {
    scope: ViewerScope,
    snapshot: Vec<ShipmentRecord>,
    active_phase: Option<Phase>,
    criteria: FilterCriteria,
    page: usize,
    page_size: NonZeroUsize,
}

impl DashboardView {
    /// Creates an empty view for a viewer scope.
    #[must_use]
    pub const fn new(scope: ViewerScope, page_size: NonZeroUsize) -> Self {
        Self {
            scope,
            snapshot: Vec::new(),
            active_phase: None,
            criteria: FilterCriteria {
                query: None,
                branch: None,
                service_type: None,
                phone: None,
            },
            page: 1,
            page_size,
        }
    }

    /// Returns the viewer scope this view was built for.
    #[must_use]
    pub const fn scope(&self) -> &ViewerScope {
        &self.scope
    }

    /// Returns the currently selected phase, `None` meaning "all".
    #[must_use]
    pub const fn active_phase(&self) -> Option<Phase> {
        self.active_phase
    }

    /// Returns the current filter criteria.
    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Replaces the in-memory snapshot with a freshly fetched feed.
    ///
    /// The page selection is kept; pagination clamps it against the new
    /// result set when the page is next read.
    pub fn replace_snapshot(&mut self, records: Vec<ShipmentRecord>) {
        debug!(records = records.len(), "Replacing shipment snapshot");
        self.snapshot = records;
    }

    /// Selects the active phase and resets the page to 1.
    pub fn set_phase(&mut self, phase: Option<Phase>) {
        if self.active_phase != phase {
            debug!(?phase, "Switching active phase");
            self.active_phase = phase;
            self.page = 1;
        }
    }

    /// Replaces the filter criteria and resets the page to 1.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        if self.criteria != criteria {
            debug!("Filter criteria changed");
            self.criteria = criteria;
            self.page = 1;
        }
    }

    /// Requests a page; stored as-is and clamped when the page is read.
    pub const fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Returns the 1-indexed page currently requested.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Computes the current page of the phase-scoped, filtered feed.
    #[must_use]
    pub fn current_page(&self) -> PageView<ShipmentRecord> {
        let filtered: Vec<&ShipmentRecord> =
            apply_filters(&self.snapshot, &self.criteria, &self.scope)
                .into_iter()
                .filter(|record| {
                    self.active_phase
                        .is_none_or(|phase| record.state.phase() == Some(phase))
                })
                .collect();

        let page = paginate(&filtered, self.page, self.page_size);
        PageView {
            items: page.items.into_iter().cloned().collect(),
            page: page.page,
            total_pages: page.total_pages,
            total_records: page.total_records,
        }
    }

    /// Counts visible records per phase for the summary strip.
    ///
    /// Counts respect viewer visibility but ignore filter criteria, the
    /// way the summary cards stay stable while a search is typed.
    #[must_use]
    pub fn phase_counts(&self) -> PhaseCounts {
        let mut counts = PhaseCounts::default();
        for record in self.snapshot.iter().filter(|r| self.scope.visible(r)) {
            counts.total += 1;
            match record.state.phase() {
                Some(Phase::Pickup) => counts.pickup += 1,
                Some(Phase::InTransit) => counts.in_transit += 1,
                Some(Phase::Delivered) => counts.delivered += 1,
                Some(Phase::Return) => counts.returns += 1,
                Some(Phase::Issue) => counts.issues += 1,
                None => counts.unclassified += 1,
            }
        }
        counts
    }
}
