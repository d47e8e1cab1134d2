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

//! `POST /tickets`: validates the request body and answers with a freshly
//! created ticket.

use super::Handler;
use crate::configs::Settings;
use crate::error::{Result, TicketsError};
use crate::model::{trim_title, Ticket};
use crate::runtime::event::{ApiRequest, ApiResponse};
use crate::runtime::response::ResponseBuilder;
use crate::telemetry::{self, MetricUnit, Telemetry};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Metric incremented for every created ticket.
pub const TICKET_CREATED: &str = "TicketCreated";

#[derive(Serialize)]
struct Created<'a> {
    ticket: &'a Ticket,
}

/// Creates tickets from JSON request bodies.
pub struct CreateTicketHandler {
    responses:        ResponseBuilder,
    id_prefix:        String,
    default_priority: String,
    telemetry:        Option<Arc<dyn Telemetry>>,
}

impl CreateTicketHandler {
    /// Returns a handler configured by `settings`, reporting to `telemetry`
    /// when one is given.
    pub fn new(settings: &Settings, telemetry: Option<Arc<dyn Telemetry>>) -> Self {
        Self {
            responses: ResponseBuilder::new(settings.cors.clone()),
            id_prefix: settings.id_prefix.clone(),
            default_priority: settings.default_priority.clone(),
            telemetry,
        }
    }

    /// Returns a handler whose observability port is derived from
    /// `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings, telemetry::from_settings(settings))
    }

    /// Validates the request and builds the ticket created at `now`.
    pub fn create(&self, request: &ApiRequest, now: DateTime<Utc>) -> Result<Ticket> {
        let payload = parse_payload(request.body.as_deref())?;
        let title = validate_title(&payload)?;

        Ok(Ticket::create(
            &self.id_prefix,
            title,
            payload.get("priority"),
            &self.default_priority,
            now,
        ))
    }

    fn report_rejection(&self, err: &TicketsError) {
        if let Some(telemetry) = &self.telemetry {
            match err {
                TicketsError::InvalidJson(e) => {
                    telemetry.warn("Invalid JSON", json!({ "error": e.to_string() }))
                }
                TicketsError::MissingTitle => telemetry.warn("Missing 'title' in body", Value::Null),
                other => telemetry.warn("Ticket rejected", json!({ "error": other.to_string() })),
            }
        }
    }

    fn report_created(&self, ticket: &Ticket) {
        if let Some(telemetry) = &self.telemetry {
            telemetry.add_metric(TICKET_CREATED, MetricUnit::Count, 1.0);
            telemetry.info(
                "Ticket created",
                json!({ "id": ticket.id, "priority": ticket.priority }),
            );
        }
    }
}

impl Handler for CreateTicketHandler {
    fn handle(&self, request: &ApiRequest) -> ApiResponse {
        match self.create(request, Utc::now()) {
            Ok(ticket) => {
                self.report_created(&ticket);
                self.responses.reply(201, &Created { ticket: &ticket })
            }
            Err(e) => {
                self.report_rejection(&e);
                self.responses.error(&e)
            }
        }
    }
}

/// Parses the request body; a missing or empty body is an empty object.
pub fn parse_payload(body: Option<&str>) -> Result<Value> {
    match body {
        Some(body) if !body.is_empty() => {
            serde_json::from_str(body).map_err(TicketsError::InvalidJson)
        }
        _ => Ok(Value::Object(Map::new())),
    }
}

/// Returns the trimmed title of the payload.
///
/// The payload must be an object whose `title` is a string that is not blank.
pub fn validate_title(payload: &Value) -> Result<&str> {
    payload
        .as_object()
        .and_then(|object| object.get("title"))
        .and_then(Value::as_str)
        .map(trim_title)
        .filter(|title| !title.is_empty())
        .ok_or(TicketsError::MissingTitle)
}
