// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the collaborator boundary.
//!
//! A fetch failure is never fatal to the dashboard: the previous snapshot
//! stays displayed and the viewer gets a retry affordance. These errors
//! carry enough context for diagnostics, nothing more.

use thiserror::Error;

/// Errors raised by the external fetch collaborators.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The request never reached the server or the connection dropped.
    #[error("Network error: {reason}")]
    Network {
        /// Transport-level failure description.
        reason: String,
    },

    /// The server answered with a non-success status.
    #[error("Server returned status {status}")]
    ServerStatus {
        /// The HTTP-like status code the collaborator reported.
        status: u16,
    },

    /// The response arrived but could not be interpreted at all.
    ///
    /// Individual missing fields never raise this; the adapter falls back
    /// per field. This covers a response body that is not even the right
    /// shape, e.g. a string where an object was promised.
    #[error("Malformed response: {reason}")]
    Malformed {
        /// What made the response uninterpretable.
        reason: String,
    },
}
