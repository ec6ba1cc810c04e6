// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared builders for core crate tests.

use parcel_ops_domain::{
    Branch, Dimensions, LifecycleState, Party, ServiceType, ShipmentRecord, StateCode, TrackingId,
};
use time::OffsetDateTime;

/// Builds a shipment record with the given identity fields; everything
/// else takes a fixed, unremarkable value.
pub fn shipment(
    id: &str,
    state: LifecycleState,
    branch: &str,
    service: &str,
    destination_phone: &str,
) -> ShipmentRecord {
    ShipmentRecord {
        id: TrackingId::new(id).unwrap(),
        origin: Party {
            name: String::from("Acme Warehouse"),
            address: String::from("14 Dispatch Lane"),
            phone: String::from("0281234567"),
        },
        destination: Party {
            name: String::from("Pat Nguyen"),
            address: String::from("88 Harbour View"),
            phone: String::from(destination_phone),
        },
        service_type: ServiceType::new(service).unwrap(),
        weight_grams: 1_200,
        dimensions: Dimensions {
            length_cm: 40,
            width_cm: 30,
            height_cm: 20,
        },
        fee_minor_units: 75_000,
        state: StateCode::Known(state),
        branch: Branch::new(branch).unwrap(),
        booked_at: OffsetDateTime::UNIX_EPOCH,
        estimated_arrival: None,
    }
}

/// A small mixed feed covering every phase plus one unclassifiable state.
pub fn mixed_feed() -> Vec<ShipmentRecord> {
    let mut feed = vec![
        shipment("PK-001", LifecycleState::Booked, "Hanoi", "standard", "0911111111"),
        shipment("PK-002", LifecycleState::PickedUp, "Hanoi", "express", "0922222222"),
        shipment("TR-001", LifecycleState::InTransit, "Danang", "express", "0933333333"),
        shipment("TR-002", LifecycleState::OutForDelivery, "Saigon", "standard", "0911111111"),
        shipment("DL-001", LifecycleState::DeliveredSuccess, "Saigon", "economy", "0944444444"),
        shipment("RT-001", LifecycleState::ReturnCreated, "Hanoi", "standard", "0955555555"),
        shipment("IS-001", LifecycleState::DeliveryFailed, "Danang", "express", "0911111111"),
    ];

    let mut odd = shipment("XX-001", LifecycleState::Booked, "Hanoi", "standard", "0966666666");
    odd.state = StateCode::Unrecognized(String::from("quantum_flux"));
    feed.push(odd);
    feed
}
