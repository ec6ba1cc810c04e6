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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

//! Terminal front-end for the Parcel Ops dashboard.
//!
//! Runs the full pipeline against a simulated feed: the sync coordinator
//! fetches through the normalization adapter, the view state filters and
//! paginates, and a sample report is composed at the end. Useful for
//! demos and for eyeballing log output; the real deployment swaps the
//! simulated sources for transport-backed ones.

mod simulated;

use clap::Parser;
use parcel_ops_api::{BranchDirectorySource, TimePeriod};
use parcel_ops_core::{DashboardView, FilterCriteria, ViewerRole, ViewerScope};
use parcel_ops_report::{PageLayout, ReportSection, compose, report_file_name};
use parcel_ops_sync::{ShipmentEvent, ShipmentEventBus, SyncConfig, SyncCoordinator};
use simulated::{FixedRasterizer, SimulatedFeed};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use time::OffsetDateTime;
use tracing::{error, info};

/// Parcel Ops Console - dashboard pipeline demo for the courier service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Viewer role: admin, branch_agent, or customer
    #[arg(short, long, default_value = "admin")]
    role: String,

    /// Phone number identifying a customer viewer's own records
    #[arg(long)]
    phone: Option<String>,

    /// Polling backstop period in seconds
    #[arg(long, default_value_t = 30)]
    poll_secs: u64,

    /// Number of simulated change notifications to raise
    #[arg(long, default_value_t = 3)]
    notifications: u32,

    /// Page size for the shipment list
    #[arg(long, default_value_t = 10)]
    page_size: usize,
}

fn parse_role(raw: &str) -> Option<ViewerRole> {
    match raw {
        "admin" => Some(ViewerRole::Admin),
        "branch_agent" => Some(ViewerRole::BranchAgent),
        "customer" => Some(ViewerRole::Customer),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let Some(role) = parse_role(&args.role) else {
        error!(role = %args.role, "Unknown role; expected admin, branch_agent, or customer");
        return Err(format!("unknown role: {}", args.role).into());
    };
    let Some(page_size) = NonZeroUsize::new(args.page_size) else {
        error!("Page size must be at least 1");
        return Err("page size must be at least 1".into());
    };

    let scope = ViewerScope::for_role(role, args.phone);
    info!(%role, "Starting dashboard pipeline");

    let source = Arc::new(SimulatedFeed::new(64));
    let bus = ShipmentEventBus::new();
    let config = SyncConfig {
        period: TimePeriod::Month,
        poll_interval: Duration::from_secs(args.poll_secs),
        ..SyncConfig::default()
    };
    let handle = SyncCoordinator::start(
        Arc::clone(&source),
        scope.clone(),
        bus.subscribe(),
        config,
    );

    // Simulate upstream producers raising change notifications; the
    // debounce collapses the burst into one extra fetch.
    for _ in 0..args.notifications {
        bus.notify(&ShipmentEvent { tracking_id: None });
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    tokio::time::sleep(Duration::from_millis(700)).await;

    let feed = handle.feed().borrow().clone();
    info!(
        refreshes = feed.refreshes,
        shipments = feed.shipments.len(),
        revenue = %parcel_ops_domain::display_minor_units(feed.data.stats.total_revenue_minor_units),
        "Feed converged"
    );
    if let Some(reason) = &feed.last_error {
        error!(reason, "Last fetch failed; showing previous snapshot");
    }

    if role == ViewerRole::Admin {
        match source.fetch_branches().await {
            Ok(branches) => {
                println!("Branch directory:");
                for branch in branches {
                    println!("  {:<8} {}", branch.code, branch.name);
                }
            }
            Err(e) => error!(%e, "Branch directory unavailable"),
        }
    }

    let mut view = DashboardView::new(scope, page_size);
    view.replace_snapshot(feed.shipments);

    let counts = view.phase_counts();
    println!("Shipments by phase (total {}):", counts.total);
    println!("  pickup       {}", counts.pickup);
    println!("  in transit   {}", counts.in_transit);
    println!("  delivered    {}", counts.delivered);
    println!("  returns      {}", counts.returns);
    println!("  issues       {}", counts.issues);
    println!("  unclassified {}", counts.unclassified);

    view.set_criteria(FilterCriteria {
        service_type: Some(String::from("express")),
        ..FilterCriteria::default()
    });
    let page = view.current_page();
    println!(
        "\nExpress shipments, page {}/{} ({} total):",
        page.page, page.total_pages, page.total_records
    );
    for record in &page.items {
        println!(
            "  {:<10} {:<22} {:<12} {:>8}",
            record.id,
            record.state.display_label(),
            record.branch,
            record.display_fee()
        );
    }

    let sections = vec![
        ReportSection {
            id: String::from("summary"),
            title: String::from("Summary"),
        },
        ReportSection {
            id: String::from("weekly_revenue"),
            title: String::from("Weekly Revenue"),
        },
        ReportSection {
            id: String::from("weekly_delivery_trend"),
            title: String::from("Weekly Delivery Trend"),
        },
        ReportSection {
            id: String::from("category_flows"),
            title: String::from("Category Flows"),
        },
        ReportSection {
            id: String::from("branch_product_mix"),
            title: String::from("Branch Product Mix"),
        },
    ];

    match compose(
        "Operations Report",
        &sections,
        &FixedRasterizer,
        PageLayout::a4(),
    )
    .await
    {
        Ok(document) => {
            let name = report_file_name("operations-report", OffsetDateTime::now_utc().date());
            println!("\nComposed '{}' as {name}:", document.title);
            for page in &document.pages {
                println!("  page {}: {} block(s)", page.number, page.placements.len());
            }
        }
        Err(e) => error!(%e, "Report generation aborted; no partial document produced"),
    }

    handle.stop();
    Ok(())
}
