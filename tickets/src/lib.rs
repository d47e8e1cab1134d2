// Copyright (c) 2020-present, UMD Database Group.
//
// This program is free software: you can use, redistribute, and/or modify
// it under the terms of the GNU Affero General Public License, version 3
// or later ("AGPL"), as published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

#![warn(missing_docs, clippy::needless_borrow)]
// Clippy lints, some should be disabled incrementally
#![allow(
    clippy::module_inception,
    clippy::new_without_default,
    clippy::upper_case_acronyms
)]

//! `tickets` implements a minimal tickets API on cloud function services:
//! one function creates a ticket from a JSON body, another lists a fixed set
//! of demo tickets. Both answer with API Gateway proxy responses that carry
//! permissive CORS headers.

pub mod configs;
pub mod error;
pub mod handlers;
pub mod model;
pub mod prelude;
pub mod runtime;
pub mod telemetry;
pub mod test_util;
