// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shipment lifecycle taxonomy.
//!
//! This module defines the closed set of lifecycle states a shipment can
//! occupy. State transitions happen only in the external system of record;
//! this crate only reads and classifies the current value. Raw values that
//! fall outside the taxonomy fail soft: they keep their raw string,
//! render with a generic label, and never crash classification.

use crate::error::DomainError;
use crate::phase::Phase;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Presentation style token attached to each lifecycle state.
///
/// Consumers map these to whatever visual treatment they use; the core
/// only guarantees a stable token per state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusStyle {
    /// Booked / scheduled, nothing moving yet.
    Info,
    /// Actively moving through the network.
    Progress,
    /// Terminal success.
    Success,
    /// Needs attention but recoverable.
    Warning,
    /// Failed, lost, or damaged.
    Danger,
    /// Cancelled, closed, or unrecognized.
    Muted,
}

/// Lifecycle states a shipment can occupy.
///
/// This is the complete taxonomy. Every state belongs to exactly one
/// [`Phase`]; the mapping lives in [`LifecycleState::phase`] and is kept
/// total by the exhaustive match there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// Shipment booked, no pickup scheduled yet.
    Booked,
    /// Pickup window agreed with the sender.
    PickupScheduled,
    /// A courier has been assigned to collect.
    PickupAssigned,
    /// Courier has the parcel.
    PickedUp,
    /// Received at the origin branch.
    AtOriginBranch,
    /// Left the origin branch on a linehaul leg.
    LinehaulDeparted,
    /// Moving between branches.
    InTransit,
    /// Received at the destination branch.
    AtDestinationBranch,
    /// On a vehicle for final delivery.
    OutForDelivery,
    /// Delivered in full.
    DeliveredSuccess,
    /// Delivered with a partial refusal or shortage.
    DeliveredPartial,
    /// Recipient asked for a new delivery attempt.
    DeliveryRescheduled,
    /// Delivery attempt failed.
    DeliveryFailed,
    /// Recipient could not be contacted.
    RecipientUnreachable,
    /// Destination address could not be resolved.
    AddressInvalid,
    /// Held at a branch pending instruction.
    OnHold,
    /// Return requested by sender or recipient.
    ReturnCreated,
    /// Return pickup scheduled.
    ReturnScheduled,
    /// Return parcel moving back to the sender.
    ReturnInTransit,
    /// Return delivered back to the sender.
    ReturnDelivered,
    /// Return attempt failed.
    ReturnFailed,
    /// Parcel lost in the network.
    Lost,
    /// Parcel damaged in the network.
    Damaged,
    /// Booking cancelled before completion.
    Cancelled,
    /// Fully settled and archived.
    Closed,
}

/// All defined lifecycle states, in taxonomy order.
pub(crate) const ALL_STATES: [LifecycleState; 25] = [
    LifecycleState::Booked,
    LifecycleState::PickupScheduled,
    LifecycleState::PickupAssigned,
    LifecycleState::PickedUp,
    LifecycleState::AtOriginBranch,
    LifecycleState::LinehaulDeparted,
    LifecycleState::InTransit,
    LifecycleState::AtDestinationBranch,
    LifecycleState::OutForDelivery,
    LifecycleState::DeliveredSuccess,
    LifecycleState::DeliveredPartial,
    LifecycleState::DeliveryRescheduled,
    LifecycleState::DeliveryFailed,
    LifecycleState::RecipientUnreachable,
    LifecycleState::AddressInvalid,
    LifecycleState::OnHold,
    LifecycleState::ReturnCreated,
    LifecycleState::ReturnScheduled,
    LifecycleState::ReturnInTransit,
    LifecycleState::ReturnDelivered,
    LifecycleState::ReturnFailed,
    LifecycleState::Lost,
    LifecycleState::Damaged,
    LifecycleState::Cancelled,
    LifecycleState::Closed,
];

impl LifecycleState {
    /// Returns the string representation of the state.
    ///
    /// This is the wire/persistence form used by the system of record.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Booked => "booked",
            Self::PickupScheduled => "pickup_scheduled",
            Self::PickupAssigned => "pickup_assigned",
            Self::PickedUp => "picked_up",
            Self::AtOriginBranch => "at_origin_branch",
            Self::LinehaulDeparted => "linehaul_departed",
            Self::InTransit => "in_transit",
            Self::AtDestinationBranch => "at_destination_branch",
            Self::OutForDelivery => "out_for_delivery",
            Self::DeliveredSuccess => "delivered_success",
            Self::DeliveredPartial => "delivered_partial",
            Self::DeliveryRescheduled => "delivery_rescheduled",
            Self::DeliveryFailed => "delivery_failed",
            Self::RecipientUnreachable => "recipient_unreachable",
            Self::AddressInvalid => "address_invalid",
            Self::OnHold => "on_hold",
            Self::ReturnCreated => "return_created",
            Self::ReturnScheduled => "return_scheduled",
            Self::ReturnInTransit => "return_in_transit",
            Self::ReturnDelivered => "return_delivered",
            Self::ReturnFailed => "return_failed",
            Self::Lost => "lost",
            Self::Damaged => "damaged",
            Self::Cancelled => "cancelled",
            Self::Closed => "closed",
        }
    }

    /// Returns the human-readable display label for the state.
    #[must_use]
    pub const fn display_label(&self) -> &'static str {
        match self {
            Self::Booked => "Booked",
            Self::PickupScheduled => "Pickup Scheduled",
            Self::PickupAssigned => "Pickup Assigned",
            Self::PickedUp => "Picked Up",
            Self::AtOriginBranch => "At Origin Branch",
            Self::LinehaulDeparted => "Linehaul Departed",
            Self::InTransit => "In Transit",
            Self::AtDestinationBranch => "At Destination Branch",
            Self::OutForDelivery => "Out For Delivery",
            Self::DeliveredSuccess => "Delivered",
            Self::DeliveredPartial => "Delivered (Partial)",
            Self::DeliveryRescheduled => "Delivery Rescheduled",
            Self::DeliveryFailed => "Delivery Failed",
            Self::RecipientUnreachable => "Recipient Unreachable",
            Self::AddressInvalid => "Address Invalid",
            Self::OnHold => "On Hold",
            Self::ReturnCreated => "Return Created",
            Self::ReturnScheduled => "Return Scheduled",
            Self::ReturnInTransit => "Return In Transit",
            Self::ReturnDelivered => "Return Delivered",
            Self::ReturnFailed => "Return Failed",
            Self::Lost => "Lost",
            Self::Damaged => "Damaged",
            Self::Cancelled => "Cancelled",
            Self::Closed => "Closed",
        }
    }

    /// Returns the presentation style token for the state.
    #[must_use]
    pub const fn style(&self) -> StatusStyle {
        match self {
            Self::Booked | Self::PickupScheduled | Self::PickupAssigned => StatusStyle::Info,
            Self::PickedUp
            | Self::AtOriginBranch
            | Self::LinehaulDeparted
            | Self::InTransit
            | Self::AtDestinationBranch
            | Self::OutForDelivery
            | Self::ReturnCreated
            | Self::ReturnScheduled
            | Self::ReturnInTransit => StatusStyle::Progress,
            Self::DeliveredSuccess | Self::DeliveredPartial | Self::ReturnDelivered => {
                StatusStyle::Success
            }
            Self::DeliveryRescheduled | Self::RecipientUnreachable | Self::OnHold => {
                StatusStyle::Warning
            }
            Self::DeliveryFailed
            | Self::AddressInvalid
            | Self::ReturnFailed
            | Self::Lost
            | Self::Damaged => StatusStyle::Danger,
            Self::Cancelled | Self::Closed => StatusStyle::Muted,
        }
    }

    /// Returns the coarse phase this state belongs to.
    ///
    /// The mapping is total and single-valued: every defined state maps to
    /// exactly one phase, enforced by the exhaustive match.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Booked
            | Self::PickupScheduled
            | Self::PickupAssigned
            | Self::PickedUp
            | Self::AtOriginBranch => Phase::Pickup,
            Self::LinehaulDeparted
            | Self::InTransit
            | Self::AtDestinationBranch
            | Self::OutForDelivery => Phase::InTransit,
            Self::DeliveredSuccess | Self::DeliveredPartial | Self::Closed => Phase::Delivered,
            Self::ReturnCreated
            | Self::ReturnScheduled
            | Self::ReturnInTransit
            | Self::ReturnDelivered
            | Self::ReturnFailed => Phase::Return,
            Self::DeliveryRescheduled
            | Self::DeliveryFailed
            | Self::RecipientUnreachable
            | Self::AddressInvalid
            | Self::OnHold
            | Self::Lost
            | Self::Damaged
            | Self::Cancelled => Phase::Issue,
        }
    }

    /// Parses a state from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownLifecycleState` if the string is not a
    /// defined state.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        ALL_STATES
            .iter()
            .find(|state| state.as_str() == s)
            .copied()
            .ok_or_else(|| DomainError::UnknownLifecycleState {
                state: s.to_string(),
            })
    }

    /// Returns every defined lifecycle state.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &ALL_STATES
    }
}

impl FromStr for LifecycleState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Label shown for raw state values outside the taxonomy.
const UNCLASSIFIED_LABEL: &str = "Unclassified";

/// The state value a shipment record actually carries.
///
/// The system of record may emit state strings this build does not know
/// about. Those must not crash classification and the raw value must pass
/// through unchanged, so the record stores either a recognized
/// [`LifecycleState`] or the raw string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StateCode {
    /// A state from the defined taxonomy.
    Known(LifecycleState),
    /// A raw value outside the taxonomy, preserved verbatim.
    Unrecognized(String),
}

impl StateCode {
    /// Parses a raw state string, never failing.
    ///
    /// Unknown values are preserved as [`StateCode::Unrecognized`].
    #[must_use]
    pub fn parse_lossy(raw: &str) -> Self {
        LifecycleState::from_str(raw)
            .map_or_else(|_| Self::Unrecognized(raw.to_string()), Self::Known)
    }

    /// Returns the raw string form, identical to what was ingested.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(state) => state.as_str(),
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }

    /// Returns the display label, falling back to "Unclassified" for
    /// unrecognized values.
    #[must_use]
    pub const fn display_label(&self) -> &str {
        match self {
            Self::Known(state) => state.display_label(),
            Self::Unrecognized(_) => UNCLASSIFIED_LABEL,
        }
    }

    /// Returns the presentation style token, `Muted` for unrecognized
    /// values.
    #[must_use]
    pub const fn style(&self) -> StatusStyle {
        match self {
            Self::Known(state) => state.style(),
            Self::Unrecognized(_) => StatusStyle::Muted,
        }
    }

    /// Returns the phase for a recognized state.
    ///
    /// Unrecognized values return `None`: they count toward whole-feed
    /// totals but appear in no phase-scoped view.
    #[must_use]
    pub const fn phase(&self) -> Option<Phase> {
        match self {
            Self::Known(state) => Some(state.phase()),
            Self::Unrecognized(_) => None,
        }
    }
}

impl From<LifecycleState> for StateCode {
    fn from(state: LifecycleState) -> Self {
        Self::Known(state)
    }
}

impl From<String> for StateCode {
    fn from(raw: String) -> Self {
        Self::parse_lossy(&raw)
    }
}

impl From<StateCode> for String {
    fn from(code: StateCode) -> Self {
        code.as_str().to_string()
    }
}

impl std::fmt::Display for StateCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_state_string_round_trip() {
        for state in LifecycleState::all() {
            let s = state.as_str();
            match LifecycleState::from_str(s) {
                Ok(parsed) => assert_eq!(*state, parsed),
                Err(e) => panic!("Failed to parse state string: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_invalid_state_string() {
        let result = LifecycleState::from_str("teleported");
        assert!(result.is_err());
    }

    #[test]
    fn test_taxonomy_has_25_states() {
        assert_eq!(LifecycleState::all().len(), 25);
    }

    #[test]
    fn test_wire_strings_unique() {
        let mut seen = std::collections::HashSet::new();
        for state in LifecycleState::all() {
            assert!(seen.insert(state.as_str()), "duplicate: {state}");
        }
    }

    #[test]
    fn test_every_state_has_label_and_style() {
        for state in LifecycleState::all() {
            assert!(!state.display_label().is_empty());
            // style() must not panic for any state
            let _ = state.style();
        }
    }

    #[test]
    fn test_state_code_known() {
        let code = StateCode::parse_lossy("in_transit");
        assert_eq!(code, StateCode::Known(LifecycleState::InTransit));
        assert_eq!(code.display_label(), "In Transit");
        assert_eq!(code.phase(), Some(Phase::InTransit));
    }

    #[test]
    fn test_state_code_unrecognized_preserves_raw() {
        let code = StateCode::parse_lossy("warp_drive_engaged");
        assert_eq!(code.as_str(), "warp_drive_engaged");
        assert_eq!(code.display_label(), "Unclassified");
        assert_eq!(code.style(), StatusStyle::Muted);
        assert_eq!(code.phase(), None);
    }

    #[test]
    fn test_state_code_serde_passthrough() {
        let json = "\"not_a_real_state\"";
        let code: StateCode = serde_json::from_str(json).unwrap();
        assert_eq!(code, StateCode::Unrecognized(String::from("not_a_real_state")));
        assert_eq!(serde_json::to_string(&code).unwrap(), json);
    }
}
