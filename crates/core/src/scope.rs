// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Viewer scope computation for role-aware filtering and visibility.
//!
//! A scope is built once per role by a single factory and consumed
//! uniformly by the filter engine, instead of scattering role checks
//! through filter and display logic. Scopes are advisory for UI gating
//! and authoritative for the predicate layer: a criterion a scope does
//! not grant is never evaluated, so supplying a value directly cannot
//! bypass the gate.

use parcel_ops_domain::ShipmentRecord;
use serde::{Deserialize, Serialize};

/// Roles a dashboard viewer can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerRole {
    /// Back-office administrator; sees everything, filters on everything.
    Admin,
    /// Branch staff; sees the full feed but cannot filter by branch.
    BranchAgent,
    /// End customer; sees only their own shipments.
    Customer,
}

impl ViewerRole {
    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::BranchAgent => "branch_agent",
            Self::Customer => "customer",
        }
    }
}

impl std::fmt::Display for ViewerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Capability-scoped view of the shipment feed for one viewer.
///
/// Carries which filter fields are honored and which records are visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerScope {
    role: ViewerRole,
    can_filter_phone: bool,
    can_filter_branch: bool,
    /// For customer scopes, the phone number identifying their records.
    customer_phone: Option<String>,
}

impl ViewerScope {
    /// Builds the scope for a role.
    ///
    /// `customer_phone` identifies the viewer's own records and is only
    /// meaningful for [`ViewerRole::Customer`]; other roles ignore it.
    ///
    /// Capability table:
    /// - Admin: phone and branch filters honored, full feed visible.
    /// - `BranchAgent`: phone filter honored, branch filter ignored,
    ///   full feed visible.
    /// - Customer: phone and branch filters ignored, visibility limited
    ///   to records where either party's phone matches the viewer's.
    #[must_use]
    pub fn for_role(role: ViewerRole, customer_phone: Option<String>) -> Self {
        match role {
            ViewerRole::Admin => Self {
                role,
                can_filter_phone: true,
                can_filter_branch: true,
                customer_phone: None,
            },
            ViewerRole::BranchAgent => Self {
                role,
                can_filter_phone: true,
                can_filter_branch: false,
                customer_phone: None,
            },
            ViewerRole::Customer => Self {
                role,
                can_filter_phone: false,
                can_filter_branch: false,
                customer_phone,
            },
        }
    }

    /// Returns the role this scope was built for.
    #[must_use]
    pub const fn role(&self) -> ViewerRole {
        self.role
    }

    /// Whether a phone criterion is honored for this viewer.
    #[must_use]
    pub const fn can_filter_phone(&self) -> bool {
        self.can_filter_phone
    }

    /// Whether a branch criterion is honored for this viewer.
    #[must_use]
    pub const fn can_filter_branch(&self) -> bool {
        self.can_filter_branch
    }

    /// Whether a record is visible to this viewer at all.
    ///
    /// Customer scopes see only records carrying their own phone number
    /// on either party; every other scope sees the full feed.
    #[must_use]
    pub fn visible(&self, record: &ShipmentRecord) -> bool {
        match (&self.role, &self.customer_phone) {
            (ViewerRole::Customer, Some(phone)) => {
                record.origin.phone == *phone || record.destination.phone == *phone
            }
            // A customer scope without an identity sees nothing rather
            // than everything.
            (ViewerRole::Customer, None) => false,
            _ => true,
        }
    }
}
