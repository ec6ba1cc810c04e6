// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Multi-field filter engine over the shipment feed.
//!
//! Present criteria are AND-combined; an absent criterion is vacuously
//! true. Text criteria match case-insensitive substrings, categorical
//! criteria match case-insensitive exact values. Role gating happens at
//! the predicate level via [`ViewerScope`], so an unauthorized criterion
//! value simply never reaches the records.

use crate::scope::ViewerScope;
use parcel_ops_domain::ShipmentRecord;
use serde::{Deserialize, Serialize};

/// Optional filter criteria supplied by the viewer.
///
/// Every field is optional; an empty criteria set passes everything the
/// viewer is allowed to see.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free-text search over tracking id and party names/addresses.
    pub query: Option<String>,
    /// Exact branch match. Honored for Admin scopes only.
    pub branch: Option<String>,
    /// Exact service type match.
    pub service_type: Option<String>,
    /// Substring search over party phone numbers. Never honored for
    /// customer scopes.
    pub phone: Option<String>,
}

impl FilterCriteria {
    /// Returns true when no criterion is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.query.is_none()
            && self.branch.is_none()
            && self.service_type.is_none()
            && self.phone.is_none()
    }
}

/// Case-insensitive substring test.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Whether the free-text query matches anywhere a viewer would look.
fn matches_query(record: &ShipmentRecord, query: &str) -> bool {
    contains_ignore_case(record.id.as_str(), query)
        || contains_ignore_case(&record.origin.name, query)
        || contains_ignore_case(&record.destination.name, query)
        || contains_ignore_case(&record.origin.address, query)
        || contains_ignore_case(&record.destination.address, query)
}

/// Whether one record passes every criterion the scope honors.
fn matches(record: &ShipmentRecord, criteria: &FilterCriteria, scope: &ViewerScope) -> bool {
    if !scope.visible(record) {
        return false;
    }

    if let Some(query) = criteria.query.as_deref()
        && !query.trim().is_empty()
        && !matches_query(record, query.trim())
    {
        return false;
    }

    // Branch filtering is an Admin capability; for every other scope the
    // criterion passes regardless of its value.
    if scope.can_filter_branch()
        && let Some(branch) = criteria.branch.as_deref()
        && !branch.trim().is_empty()
        && !record.branch.matches(branch)
    {
        return false;
    }

    if let Some(service) = criteria.service_type.as_deref()
        && !service.trim().is_empty()
        && !record.service_type.matches(service)
    {
        return false;
    }

    // Phone search is never evaluated for scopes that do not expose it.
    if scope.can_filter_phone()
        && let Some(phone) = criteria.phone.as_deref()
        && !phone.trim().is_empty()
        && !contains_ignore_case(&record.origin.phone, phone.trim())
        && !contains_ignore_case(&record.destination.phone, phone.trim())
    {
        return false;
    }

    true
}

/// Applies role-scoped filter criteria to a record collection.
///
/// Criteria are AND-combined and the operation is idempotent: filtering
/// an already-filtered result with the same criteria changes nothing.
#[must_use]
pub fn apply_filters<'a>(
    records: &'a [ShipmentRecord],
    criteria: &FilterCriteria,
    scope: &ViewerScope,
) -> Vec<&'a ShipmentRecord> {
    records
        .iter()
        .filter(|record| matches(record, criteria, scope))
        .collect()
}
