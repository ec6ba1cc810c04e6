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

mod currency;
mod error;
mod lifecycle;
mod phase;
mod shipment;

pub use currency::{FEE_DISPLAY_DIVISOR, display_minor_units};
pub use error::DomainError;
pub use lifecycle::{LifecycleState, StateCode, StatusStyle};
pub use phase::{Phase, partition_by_phase};
pub use shipment::{Branch, Dimensions, Party, ServiceType, ShipmentRecord, TrackingId};
