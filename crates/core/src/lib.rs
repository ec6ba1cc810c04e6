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

mod filter;
mod page;
mod scope;
mod view;

#[cfg(test)]
mod tests;

pub use filter::{FilterCriteria, apply_filters};
pub use page::{DEFAULT_PAGE_SIZE, PageView, paginate};
pub use scope::{ViewerRole, ViewerScope};
pub use view::{DashboardView, PhaseCounts};
