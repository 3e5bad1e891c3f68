/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! # FL-Common
//!
//! Shared error plumbing for the FL compiler crates. Mostly the
//! [CheckReport] that turns an aborted program check into the
//! user-visible failure message.

//Re-export so downstream crates can derive on the same thiserror version.
pub use thiserror;

mod report;
pub use report::CheckReport;
