// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Currency display conversion.
//!
//! Monetary values are stored in integer minor units of the source
//! currency and divided by a fixed constant before formatting as a
//! two-decimal display currency. The divisor is a design invariant, not
//! configuration.

/// Fixed divisor converting stored minor units to display currency.
pub const FEE_DISPLAY_DIVISOR: i64 = 25_000;

/// Formats a minor-unit amount as a two-decimal display currency string.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn display_minor_units(minor_units: i64) -> String {
    format!("{:.2}", minor_units as f64 / FEE_DISPLAY_DIVISOR as f64)
}
