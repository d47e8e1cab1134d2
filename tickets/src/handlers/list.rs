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

//! `GET /tickets`: the demo tickets, optionally cut to `?limit=n`.

use super::Handler;
use crate::configs::Settings;
use crate::model::{demo_tickets, Ticket};
use crate::runtime::event::{ApiRequest, ApiResponse};
use crate::runtime::response::ResponseBuilder;
use crate::telemetry::{self, MetricUnit, Telemetry};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

/// Metric recording how many tickets a request returned.
pub const TICKETS_LISTED: &str = "TicketsListed";

/// Name of the query string parameter limiting the result.
pub const LIMIT_PARAM: &str = "limit";

#[derive(Serialize)]
struct Items<'a> {
    items: &'a [Ticket],
}

/// Lists the demo tickets.
pub struct ListTicketsHandler {
    responses: ResponseBuilder,
    telemetry: Option<Arc<dyn Telemetry>>,
}

impl ListTicketsHandler {
    /// Returns a handler configured by `settings`, reporting to `telemetry`
    /// when one is given.
    pub fn new(settings: &Settings, telemetry: Option<Arc<dyn Telemetry>>) -> Self {
        Self {
            responses: ResponseBuilder::new(settings.cors.clone()),
            telemetry,
        }
    }

    /// Returns a handler whose observability port is derived from
    /// `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings, telemetry::from_settings(settings))
    }

    /// The tickets a request asks for.
    pub fn items(&self, request: &ApiRequest) -> &'static [Ticket] {
        let items = demo_tickets();
        match request.query(LIMIT_PARAM) {
            None => items,
            Some(raw) => match parse_limit(raw) {
                Some(n) => &items[..n.min(items.len())],
                None => {
                    if let Some(telemetry) = &self.telemetry {
                        telemetry.warn("Ignoring invalid limit", json!({ "limit": raw }));
                    }
                    items
                }
            },
        }
    }
}

impl Handler for ListTicketsHandler {
    fn handle(&self, request: &ApiRequest) -> ApiResponse {
        let items = self.items(request);

        if let Some(telemetry) = &self.telemetry {
            telemetry.add_metric(TICKETS_LISTED, MetricUnit::Count, items.len() as f64);
            telemetry.info(
                "GET /tickets",
                json!({ "limit": request.query(LIMIT_PARAM), "size": items.len() }),
            );
        }

        self.responses.reply(200, &Items { items })
    }
}

/// Parses `?limit=`. Only non-negative decimal integers are accepted;
/// anything else means "no limit".
pub fn parse_limit(raw: &str) -> Option<usize> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Too many digits for usize still means "more than we have".
    Some(raw.parse::<usize>().unwrap_or(usize::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{get_tickets, Recorded, RecordingTelemetry};

    fn ids(items: &[Ticket]) -> Vec<&str> {
        items.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn limit_parsing() {
        assert_eq!(Some(0), parse_limit("0"));
        assert_eq!(Some(1), parse_limit("1"));
        assert_eq!(Some(5), parse_limit(" 5 "));
        assert_eq!(Some(usize::MAX), parse_limit("99999999999999999999999999"));
        assert_eq!(None, parse_limit(""));
        assert_eq!(None, parse_limit("abc"));
        assert_eq!(None, parse_limit("-1"));
        assert_eq!(None, parse_limit("+1"));
        assert_eq!(None, parse_limit("1.5"));
        assert_eq!(None, parse_limit("1e2"));
    }

    #[test]
    fn limit_slices_demo_tickets() {
        let handler = ListTicketsHandler::new(&Settings::default(), None);

        assert_eq!(vec!["t-1001", "t-1002"], ids(handler.items(&get_tickets(None))));
        assert_eq!(vec!["t-1001"], ids(handler.items(&get_tickets(Some("1")))));
        assert_eq!(vec!["t-1001", "t-1002"], ids(handler.items(&get_tickets(Some("5")))));
        assert!(handler.items(&get_tickets(Some("0"))).is_empty());
        assert_eq!(2, handler.items(&get_tickets(Some("abc"))).len());
        assert_eq!(2, handler.items(&get_tickets(Some("-1"))).len());
    }

    #[test]
    fn listing_is_reported() {
        let recorder = RecordingTelemetry::shared();
        let handler = ListTicketsHandler::new(&Settings::default(), Some(recorder.clone()));

        handler.handle(&get_tickets(Some("1")));
        handler.handle(&get_tickets(None));

        assert_eq!(
            vec![
                Recorded::Metric {
                    name:  TICKETS_LISTED.to_owned(),
                    unit:  MetricUnit::Count,
                    value: 1.0,
                },
                Recorded::Info {
                    message: "GET /tickets".to_owned(),
                    fields:  json!({ "limit": "1", "size": 1 }),
                },
                Recorded::Metric {
                    name:  TICKETS_LISTED.to_owned(),
                    unit:  MetricUnit::Count,
                    value: 2.0,
                },
                Recorded::Info {
                    message: "GET /tickets".to_owned(),
                    fields:  json!({ "limit": null, "size": 2 }),
                },
            ],
            recorder.events()
        );
    }

    #[test]
    fn invalid_limit_is_reported() {
        let recorder = RecordingTelemetry::shared();
        let handler = ListTicketsHandler::new(&Settings::default(), Some(recorder.clone()));

        handler.handle(&get_tickets(Some("lots")));

        assert_eq!(
            vec!["Ignoring invalid limit".to_owned(), "GET /tickets".to_owned()],
            recorder.messages()
        );
        assert_eq!(vec![(TICKETS_LISTED.to_owned(), 2.0)], recorder.metrics());
    }
}
