// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A lifecycle state string is not part of the defined taxonomy.
    UnknownLifecycleState {
        /// The raw state string that failed to parse.
        state: String,
    },
    /// A phase string is not one of the five defined phases.
    UnknownPhase {
        /// The raw phase string that failed to parse.
        phase: String,
    },
    /// A tracking identifier is empty or invalid.
    InvalidTrackingId(String),
    /// A branch identifier is empty.
    EmptyBranch,
    /// A service type identifier is empty.
    EmptyServiceType,
    /// A shipment fee is negative.
    NegativeFee {
        /// The offending fee in minor units.
        minor_units: i64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLifecycleState { state } => {
                write!(f, "Unknown lifecycle state: '{state}'")
            }
            Self::UnknownPhase { phase } => {
                write!(f, "Unknown phase: '{phase}'")
            }
            Self::InvalidTrackingId(id) => {
                write!(f, "Invalid tracking identifier: '{id}'")
            }
            Self::EmptyBranch => write!(f, "Branch identifier must not be empty"),
            Self::EmptyServiceType => write!(f, "Service type must not be empty"),
            Self::NegativeFee { minor_units } => {
                write!(f, "Shipment fee must not be negative, got {minor_units}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
