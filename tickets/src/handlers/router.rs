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

//! Dispatches `/tickets` requests by HTTP method, so a single function can
//! serve the whole resource.

use super::{CreateTicketHandler, Handler, ListTicketsHandler};
use crate::configs::Settings;
use crate::runtime::event::{ApiRequest, ApiResponse};
use crate::runtime::response::ResponseBuilder;
use crate::telemetry::{self, Telemetry};
use log::debug;
use std::sync::Arc;

/// Routes `POST` to [`CreateTicketHandler`] and `GET` to
/// [`ListTicketsHandler`]; answers CORS preflights itself.
pub struct Router {
    create:    CreateTicketHandler,
    list:      ListTicketsHandler,
    responses: ResponseBuilder,
}

impl Router {
    /// Returns a router whose handlers share `telemetry`.
    pub fn new(settings: &Settings, telemetry: Option<Arc<dyn Telemetry>>) -> Self {
        Self {
            create:    CreateTicketHandler::new(settings, telemetry.clone()),
            list:      ListTicketsHandler::new(settings, telemetry),
            responses: ResponseBuilder::new(settings.cors.clone()),
        }
    }

    /// Returns a router whose observability port is derived from `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings, telemetry::from_settings(settings))
    }
}

impl Handler for Router {
    fn handle(&self, request: &ApiRequest) -> ApiResponse {
        let method = request.method().to_ascii_uppercase();
        debug!("{} {}", method, request.path.as_deref().unwrap_or("/tickets"));

        match method.as_str() {
            "POST" => self.create.handle(request),
            "GET" => self.list.handle(request),
            "OPTIONS" => self.responses.empty(204),
            _ => self.responses.message(405, "Method Not Allowed"),
        }
    }
}
