// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Response-shape normalization at the collaborator boundary.
//!
//! The upstream feed is duck-typed: the same logical field arrives under
//! several spellings depending on which backend produced the response.
//! This module folds every alternate spelling into the typed DTO schema
//! in one place, with a documented precedence order per field, so the
//! rest of the system never sees the raw shapes.
//!
//! Fallback policy (field level): absent counts normalize to zero, absent
//! labels to "N/A", absent states to an unrecognized passthrough value.
//! Only a response that is not even the promised container shape raises
//! [`FetchError::Malformed`].

use crate::dto::{BranchInfo, ChartBundle, DashboardData, SeriesPoint, SummaryStats};
use crate::error::FetchError;
use parcel_ops_domain::{
    Branch, Dimensions, Party, ServiceType, ShipmentRecord, StateCode, TrackingId,
};
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;
use tracing::warn;

/// Label used when the source omitted one.
const MISSING_LABEL: &str = "N/A";

/// Returns the first present string field among `keys`.
fn str_field<'a>(obj: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| obj.get(*key).and_then(Value::as_str))
}

/// Returns the first present numeric field among `keys`, accepting both
/// JSON numbers and numeric strings.
fn i64_field(obj: &Value, keys: &[&str]) -> Option<i64> {
    keys.iter().find_map(|key| {
        let value = obj.get(*key)?;
        value
            .as_i64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
    })
}

fn u64_field(obj: &Value, keys: &[&str]) -> Option<u64> {
    i64_field(obj, keys).and_then(|n| u64::try_from(n).ok())
}

fn f64_field(obj: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| {
        let value = obj.get(*key)?;
        value
            .as_f64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
    })
}

/// Reads one dimension in centimetres, saturating at `u32::MAX`.
fn dim_field(obj: &Value, keys: &[&str]) -> u32 {
    u64_field(obj, keys).map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX))
}

/// Returns the first present object field among `keys`.
fn object_field<'a>(obj: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .map(|key| obj.get(*key))
        .find(|v| matches!(v, Some(Value::Object(_))))
        .flatten()
}

/// Normalizes one party object.
///
/// Precedence: name `name` > `full_name` > `contact_name`; address
/// `address` > `addr` > `street`; phone `phone` > `phone_number` > `tel`
/// > `mobile`.
fn normalize_party(raw: Option<&Value>) -> Party {
    raw.map_or_else(
        || Party {
            name: String::from(MISSING_LABEL),
            address: String::from(MISSING_LABEL),
            phone: String::new(),
        },
        |obj| Party {
            name: str_field(obj, &["name", "full_name", "contact_name"])
                .unwrap_or(MISSING_LABEL)
                .to_string(),
            address: str_field(obj, &["address", "addr", "street"])
                .unwrap_or(MISSING_LABEL)
                .to_string(),
            phone: str_field(obj, &["phone", "phone_number", "tel", "mobile"])
                .unwrap_or_default()
                .to_string(),
        },
    )
}

/// Parses an ISO-8601 timestamp field, logging and falling back on
/// failure rather than rejecting the record.
fn timestamp_field(obj: &Value, keys: &[&str]) -> Option<OffsetDateTime> {
    let raw = str_field(obj, keys)?;
    match OffsetDateTime::parse(raw, &Iso8601::DEFAULT) {
        Ok(ts) => Some(ts),
        Err(e) => {
            warn!(raw, ?e, "Unparseable timestamp in shipment row");
            None
        }
    }
}

/// Normalizes one raw shipment row into a typed record.
///
/// Field precedence:
/// - id: `tracking_id` > `trackingId` > `id` > `code` (required)
/// - origin party: `origin` > `sender` > `from`
/// - destination party: `destination` > `recipient` > `to`
/// - service type: `service_type` > `serviceType` > `service`
/// - branch: `branch` > `branch_code` > `branchCode`
/// - fee: `fee_minor_units` > `feeMinorUnits` > `fee` > `price`
/// - weight: `weight_grams` > `weightGrams` > `weight`
/// - state: `state` > `status` > `lifecycle_state`
/// - booked: `booked_at` > `bookedAt` > `created_at` > `createdAt`
/// - eta: `estimated_arrival` > `estimatedArrival` > `eta`
///
/// # Errors
///
/// Returns `FetchError::Malformed` if the row is not an object or has no
/// usable tracking identifier. Every other field falls back per policy.
pub fn normalize_shipment(raw: &Value) -> Result<ShipmentRecord, FetchError> {
    if !raw.is_object() {
        return Err(FetchError::Malformed {
            reason: String::from("shipment row is not an object"),
        });
    }

    let id = str_field(raw, &["tracking_id", "trackingId", "id", "code"])
        .ok_or_else(|| FetchError::Malformed {
            reason: String::from("shipment row has no tracking identifier"),
        })
        .and_then(|s| {
            TrackingId::new(s).map_err(|e| FetchError::Malformed {
                reason: e.to_string(),
            })
        })?;

    let service_type = str_field(raw, &["service_type", "serviceType", "service"])
        .and_then(|s| ServiceType::new(s).ok())
        .unwrap_or_else(ServiceType::unspecified);

    let branch = str_field(raw, &["branch", "branch_code", "branchCode"])
        .and_then(|s| Branch::new(s).ok())
        .unwrap_or_else(Branch::unassigned);

    let state = str_field(raw, &["state", "status", "lifecycle_state"])
        .map_or_else(|| StateCode::parse_lossy("unknown"), StateCode::parse_lossy);

    let dimensions = object_field(raw, &["dimensions", "dims"]).map_or(
        Dimensions {
            length_cm: 0,
            width_cm: 0,
            height_cm: 0,
        },
        |dims| Dimensions {
            length_cm: dim_field(dims, &["length_cm", "length"]),
            width_cm: dim_field(dims, &["width_cm", "width"]),
            height_cm: dim_field(dims, &["height_cm", "height"]),
        },
    );

    Ok(ShipmentRecord {
        id,
        origin: normalize_party(object_field(raw, &["origin", "sender", "from"])),
        destination: normalize_party(object_field(raw, &["destination", "recipient", "to"])),
        service_type,
        weight_grams: u64_field(raw, &["weight_grams", "weightGrams", "weight"])
            .map_or(0, |w| u32::try_from(w).unwrap_or(u32::MAX)),
        dimensions,
        fee_minor_units: i64_field(raw, &["fee_minor_units", "feeMinorUnits", "fee", "price"])
            .unwrap_or(0),
        state,
        branch,
        booked_at: timestamp_field(raw, &["booked_at", "bookedAt", "created_at", "createdAt"])
            .unwrap_or(OffsetDateTime::UNIX_EPOCH),
        estimated_arrival: timestamp_field(raw, &["estimated_arrival", "estimatedArrival", "eta"]),
    })
}

/// Normalizes a raw shipment collection.
///
/// Unusable rows are skipped with a warning; one bad row never discards
/// the feed.
///
/// # Errors
///
/// Returns `FetchError::Malformed` if the payload is not an array (the
/// collection may also arrive wrapped under `shipments` or `data`).
pub fn normalize_shipments(raw: &Value) -> Result<Vec<ShipmentRecord>, FetchError> {
    let rows = raw
        .as_array()
        .or_else(|| raw.get("shipments").and_then(Value::as_array))
        .or_else(|| raw.get("data").and_then(Value::as_array))
        .ok_or_else(|| FetchError::Malformed {
            reason: String::from("shipment payload is not an array"),
        })?;

    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        match normalize_shipment(row) {
            Ok(record) => records.push(record),
            Err(e) => warn!(index, %e, "Skipping unusable shipment row"),
        }
    }
    Ok(records)
}

/// Normalizes one chart series; entries get "N/A" labels and zero values
/// where the source omitted them.
fn normalize_series(raw: Option<&Value>) -> Vec<SeriesPoint> {
    raw.and_then(Value::as_array).map_or_else(Vec::new, |rows| {
        rows.iter()
            .map(|row| SeriesPoint {
                label: str_field(row, &["label", "name", "week", "category"])
                    .unwrap_or(MISSING_LABEL)
                    .to_string(),
                value: f64_field(row, &["value", "count", "total", "amount"]).unwrap_or(0.0),
            })
            .collect()
    })
}

/// Normalizes a dashboard aggregate response.
///
/// Stats live under `stats` > `summary`; charts under `charts` >
/// `graphs`. Absent sections and counts normalize to zero; this function
/// never fails, matching the tolerate-and-default error policy for
/// malformed aggregate responses.
#[must_use]
pub fn normalize_dashboard(raw: &Value) -> DashboardData {
    let stats_obj = object_field(raw, &["stats", "summary"]);
    let stats = stats_obj.map_or_else(SummaryStats::default, |obj| SummaryStats {
        pickup_count: u64_field(obj, &["pickup_count", "pickupCount", "pickup"]).unwrap_or(0),
        in_transit_count: u64_field(obj, &["in_transit_count", "inTransitCount", "in_transit"])
            .unwrap_or(0),
        delivered_count: u64_field(obj, &["delivered_count", "deliveredCount", "delivered"])
            .unwrap_or(0),
        return_count: u64_field(obj, &["return_count", "returnCount", "returns"]).unwrap_or(0),
        issue_count: u64_field(obj, &["issue_count", "issueCount", "issues"]).unwrap_or(0),
        total_count: u64_field(obj, &["total_count", "totalCount", "total"]).unwrap_or(0),
        total_revenue_minor_units: i64_field(
            obj,
            &["total_revenue_minor_units", "totalRevenue", "revenue"],
        )
        .unwrap_or(0),
    });

    let charts_obj = object_field(raw, &["charts", "graphs"]);
    let charts = charts_obj.map_or_else(ChartBundle::default, |obj| ChartBundle {
        weekly_revenue: normalize_series(
            obj.get("weekly_revenue").or_else(|| obj.get("weeklyRevenue")),
        ),
        weekly_delivery_trend: normalize_series(
            obj.get("weekly_delivery_trend")
                .or_else(|| obj.get("weeklyDeliveryTrend")),
        ),
        category_flows: normalize_series(
            obj.get("category_flows").or_else(|| obj.get("categoryFlows")),
        ),
        branch_product_mix: normalize_series(
            obj.get("branch_product_mix")
                .or_else(|| obj.get("branchProductMix")),
        ),
    });

    DashboardData { stats, charts }
}

/// Normalizes the branch directory payload (admin scope only).
///
/// # Errors
///
/// Returns `FetchError::Malformed` if the payload is not an array,
/// directly or under `branches` / `data`.
pub fn normalize_branches(raw: &Value) -> Result<Vec<BranchInfo>, FetchError> {
    let rows = raw
        .as_array()
        .or_else(|| raw.get("branches").and_then(Value::as_array))
        .or_else(|| raw.get("data").and_then(Value::as_array))
        .ok_or_else(|| FetchError::Malformed {
            reason: String::from("branch payload is not an array"),
        })?;

    Ok(rows
        .iter()
        .filter_map(|row| {
            let code = str_field(row, &["code", "branch_code", "id"])?;
            Some(BranchInfo {
                code: code.to_string(),
                name: str_field(row, &["name", "display_name"])
                    .unwrap_or(MISSING_LABEL)
                    .to_string(),
            })
        })
        .collect())
}
