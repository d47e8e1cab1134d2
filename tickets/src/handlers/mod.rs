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

//! The request handlers of the tickets functions.
//!
//! Each handler is a pure function from an [`ApiRequest`] to an
//! [`ApiResponse`]: no state is shared between invocations, so one instance
//! can serve concurrent requests.

pub mod create;
pub mod list;
pub mod router;

pub use create::CreateTicketHandler;
pub use list::ListTicketsHandler;
pub use router::Router;

use crate::runtime::event::{ApiRequest, ApiResponse};

/// A tickets function.
pub trait Handler: Send + Sync {
    /// Answers a single API Gateway request.
    fn handle(&self, request: &ApiRequest) -> ApiResponse;
}
