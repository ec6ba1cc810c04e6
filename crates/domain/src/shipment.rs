// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shipment record types.
//!
//! Records are owned by the external system of record; this crate holds a
//! read-only, possibly stale, in-memory snapshot and never mutates one.

use crate::currency::display_minor_units;
use crate::error::DomainError;
use crate::lifecycle::StateCode;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A shipment tracking identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackingId(String);

impl TrackingId {
    /// Creates a tracking identifier from a raw string.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTrackingId` if the string is empty or
    /// whitespace-only.
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidTrackingId(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TrackingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A branch identifier.
///
/// Branch comparison is case-insensitive everywhere, so the filter engine
/// never depends on how the feed spells a branch code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Branch(String);

impl Branch {
    /// Creates a branch identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyBranch` if the string is empty.
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyBranch);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The fallback branch used when a feed row carries none.
    #[must_use]
    pub fn unassigned() -> Self {
        Self(String::from("unassigned"))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive equality against a raw string.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A declared service type (e.g. "express", "standard").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceType(String);

impl ServiceType {
    /// Creates a service type identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyServiceType` if the string is empty.
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyServiceType);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The fallback service type used when a feed row carries none.
    #[must_use]
    pub fn unspecified() -> Self {
        Self(String::from("unspecified"))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive equality against a raw string.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One party on a shipment: the sender or the recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Party display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Contact phone number.
    pub phone: String,
}

/// Physical parcel dimensions in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Length in centimetres.
    pub length_cm: u32,
    /// Width in centimetres.
    pub width_cm: u32,
    /// Height in centimetres.
    pub height_cm: u32,
}

/// A read-only snapshot of one shipment as reported by the system of
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    /// Tracking identifier.
    pub id: TrackingId,
    /// Sender party.
    pub origin: Party,
    /// Recipient party.
    pub destination: Party,
    /// Declared service type.
    pub service_type: ServiceType,
    /// Parcel weight in grams.
    pub weight_grams: u32,
    /// Parcel dimensions.
    pub dimensions: Dimensions,
    /// Fee in integer minor units of the source currency.
    pub fee_minor_units: i64,
    /// Current lifecycle state as reported by the system of record.
    pub state: StateCode,
    /// Branch the shipment is affiliated with.
    pub branch: Branch,
    /// When the shipment was booked.
    #[serde(with = "time::serde::iso8601")]
    pub booked_at: OffsetDateTime,
    /// Estimated arrival, when the system of record has one.
    #[serde(default, with = "time::serde::iso8601::option")]
    pub estimated_arrival: Option<OffsetDateTime>,
}

impl ShipmentRecord {
    /// Formats the shipment fee as a two-decimal display currency string.
    #[must_use]
    pub fn display_fee(&self) -> String {
        display_minor_units(self.fee_minor_units)
    }
}

#[cfg(test)]
impl ShipmentRecord {
    /// Builds a minimal record for tests; callers override what they need.
    #[allow(clippy::unwrap_used)]
    pub(crate) fn sample(id: &str) -> Self {
        use crate::lifecycle::LifecycleState;
        Self {
            id: TrackingId::new(id).unwrap(),
            origin: Party {
                name: String::from("Origin Depot"),
                address: String::from("1 Sender Way"),
                phone: String::from("0900000001"),
            },
            destination: Party {
                name: String::from("Dest Person"),
                address: String::from("2 Receiver Road"),
                phone: String::from("0900000002"),
            },
            service_type: ServiceType::new("standard").unwrap(),
            weight_grams: 1_000,
            dimensions: Dimensions {
                length_cm: 30,
                width_cm: 20,
                height_cm: 10,
            },
            fee_minor_units: 50_000,
            state: StateCode::Known(LifecycleState::Booked),
            branch: Branch::new("HQ").unwrap(),
            booked_at: OffsetDateTime::UNIX_EPOCH,
            estimated_arrival: None,
        }
    }
}
