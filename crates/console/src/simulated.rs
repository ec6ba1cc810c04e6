// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Simulated read collaborators for the console demo.
//!
//! Feed rows are generated once at startup as raw JSON, deliberately
//! mixing the alternate field spellings a real backend mix produces, and
//! every fetch runs them through the same normalization the production
//! sources use. A couple of rows carry states outside the taxonomy to
//! exercise the fail-soft path.

use parcel_ops_api::{
    AggregateSource, BranchDirectorySource, BranchInfo, DashboardData, FetchError, ShipmentSource,
    TimePeriod, normalize_branches, normalize_dashboard, normalize_shipments,
};
use parcel_ops_core::ViewerScope;
use parcel_ops_domain::{LifecycleState, Phase, ShipmentRecord};
use parcel_ops_report::{Bitmap, BlockRasterizer, RasterError, ReportSection};
use rand::{Rng, RngExt};
use serde_json::{Value, json};
use tracing::debug;

const BRANCHES: &[&str] = &["Hanoi", "Danang", "Saigon", "Cantho"];
const SERVICES: &[&str] = &["express", "standard", "economy"];
const NAMES: &[&str] = &["Linh Tran", "Minh Pham", "An Nguyen", "Hoa Le", "Quang Vo"];

/// In-memory stand-in for the aggregate, shipment, and branch backends.
pub struct SimulatedFeed {
    dashboard: Value,
    shipments: Value,
    branches: Value,
}

impl SimulatedFeed {
    /// Generates a feed of `count` shipments plus matching aggregates.
    #[must_use]
    pub fn new(count: usize) -> Self {
        let mut rng = rand::rng();
        let states = LifecycleState::all();
        let mut rows = Vec::with_capacity(count);

        for i in 0..count {
            // One row in sixteen reports a state this build has never
            // heard of, the way a feed ahead of the dashboard would.
            let state = if i % 16 == 15 {
                "customs_review"
            } else {
                states[rng.random_range(0..states.len())].as_str()
            };
            let branch = BRANCHES[rng.random_range(0..BRANCHES.len())];
            let service = SERVICES[rng.random_range(0..SERVICES.len())];
            let day = rng.random_range(1..=28u32);

            // Alternate spellings on every other row; the adapter folds
            // both shapes into the same record.
            let row = if i % 2 == 0 {
                json!({
                    "tracking_id": format!("PK-{i:04}"),
                    "origin": party(&mut rng),
                    "destination": party(&mut rng),
                    "service_type": service,
                    "weight_grams": rng.random_range(200..30_000u32),
                    "dimensions": {"length_cm": 40, "width_cm": 30, "height_cm": 20},
                    "fee_minor_units": rng.random_range(25_000..2_500_000i64),
                    "state": state,
                    "branch": branch,
                    "booked_at": format!("2026-08-{day:02}T08:00:00Z"),
                })
            } else {
                json!({
                    "trackingId": format!("PK-{i:04}"),
                    "sender": party(&mut rng),
                    "recipient": party(&mut rng),
                    "serviceType": service,
                    "weight": rng.random_range(200..30_000u32),
                    "dims": {"length": 40, "width": 30, "height": 20},
                    "fee": rng.random_range(25_000..2_500_000i64).to_string(),
                    "status": state,
                    "branchCode": branch,
                    "bookedAt": format!("2026-08-{day:02}T08:00:00Z"),
                    "eta": format!("2026-09-{:02}T17:00:00Z", rng.random_range(1..=28u32)),
                })
            };
            rows.push(row);
        }

        let dashboard = aggregate_for(&rows);
        let branches = json!({"branches": [
            {"code": "Hanoi", "name": "Hanoi Central"},
            {"code": "Danang", "name": "Danang Coastal"},
            {"code": "Saigon", "name": "Saigon South"},
            {"code": "Cantho"},
        ]});

        Self {
            dashboard,
            shipments: json!({ "shipments": rows }),
            branches,
        }
    }
}

fn party(rng: &mut impl Rng) -> Value {
    json!({
        "name": NAMES[rng.random_range(0..NAMES.len())],
        "address": format!("{} Lang Ha", rng.random_range(1..400u32)),
        "phone": format!("09{:08}", rng.random_range(0..100_000_000u64)),
    })
}

/// Builds an aggregate payload consistent with the generated rows.
fn aggregate_for(rows: &[Value]) -> Value {
    let mut pickup = 0u64;
    let mut in_transit = 0u64;
    let mut delivered = 0u64;
    let mut returns = 0u64;
    let mut issues = 0u64;
    let mut revenue = 0i64;

    for row in rows {
        let state = row
            .get("state")
            .or_else(|| row.get("status"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        match state.parse::<LifecycleState>().ok().map(|s| s.phase()) {
            Some(Phase::Pickup) => pickup += 1,
            Some(Phase::InTransit) => in_transit += 1,
            Some(Phase::Delivered) => delivered += 1,
            Some(Phase::Return) => returns += 1,
            Some(Phase::Issue) => issues += 1,
            None => {}
        }
        revenue += row
            .get("fee_minor_units")
            .and_then(Value::as_i64)
            .or_else(|| {
                row.get("fee")
                    .and_then(Value::as_str)
                    .and_then(|s| s.parse().ok())
            })
            .unwrap_or(0);
    }

    json!({
        "summary": {
            "pickupCount": pickup,
            "inTransitCount": in_transit,
            "deliveredCount": delivered,
            "returnCount": returns,
            "issueCount": issues,
            "totalCount": rows.len(),
            "totalRevenue": revenue,
        },
        "charts": {
            "weekly_revenue": [
                {"label": "W31", "value": 812.5},
                {"label": "W32", "value": 977.0},
                {"label": "W33", "value": 1041.25},
                {"label": "W34", "value": 899.75},
            ],
            "weekly_delivery_trend": [
                {"label": "W31", "value": 42.0},
                {"label": "W32", "value": 51.0},
                {"label": "W33", "value": 48.0},
                {"label": "W34", "value": 56.0},
            ],
            "category_flows": [
                {"category": "express", "count": 31},
                {"category": "standard", "count": 58},
                {"category": "economy", "count": 22},
            ],
            "branch_product_mix": [
                {"name": "Hanoi", "total": 36},
                {"name": "Danang", "total": 24},
                {"name": "Saigon", "total": 41},
                {"name": "Cantho", "total": 10},
            ],
        },
    })
}

impl AggregateSource for SimulatedFeed {
    fn fetch_dashboard(
        &self,
        period: TimePeriod,
        scope: &ViewerScope,
    ) -> impl Future<Output = Result<DashboardData, FetchError>> + Send {
        debug!(%period, role = %scope.role(), "Simulated aggregate fetch");
        let data = normalize_dashboard(&self.dashboard);
        async move { Ok(data) }
    }
}

impl ShipmentSource for SimulatedFeed {
    fn fetch_shipments(
        &self,
        scope: &ViewerScope,
    ) -> impl Future<Output = Result<Vec<ShipmentRecord>, FetchError>> + Send {
        debug!(role = %scope.role(), "Simulated shipment fetch");
        let result = normalize_shipments(&self.shipments);
        async move { result }
    }
}

impl BranchDirectorySource for SimulatedFeed {
    fn fetch_branches(&self) -> impl Future<Output = Result<Vec<BranchInfo>, FetchError>> + Send {
        let result = normalize_branches(&self.branches);
        async move { result }
    }
}

/// Rasterizer reporting a plausible fixed size per block; no pixels are
/// produced in the demo.
pub struct FixedRasterizer;

impl BlockRasterizer for FixedRasterizer {
    fn rasterize(
        &self,
        section: &ReportSection,
    ) -> impl Future<Output = Result<Bitmap, RasterError>> + Send {
        let bitmap = match section.id.as_str() {
            "summary" => Bitmap {
                width_px: 1140,
                height_px: 260,
            },
            _ => Bitmap {
                width_px: 1140,
                height_px: 620,
            },
        };
        async move { Ok(bitmap) }
    }
}
