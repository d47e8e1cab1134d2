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

//! Common unit test utility methods

use crate::runtime::event::ApiRequest;
use crate::telemetry::{MetricUnit, Telemetry};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Something a handler reported through its [`Telemetry`].
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    /// A metric value.
    Metric {
        /// Metric name.
        name:  String,
        /// Metric unit.
        unit:  MetricUnit,
        /// Metric value.
        value: f64,
    },
    /// An info log entry.
    Info {
        /// Log message.
        message: String,
        /// Structured fields.
        fields:  Value,
    },
    /// A warning log entry.
    Warn {
        /// Log message.
        message: String,
        /// Structured fields.
        fields:  Value,
    },
}

/// A [`Telemetry`] that keeps everything it receives in memory.
#[derive(Debug, Default)]
pub struct RecordingTelemetry {
    events: Mutex<Vec<Recorded>>,
}

impl RecordingTelemetry {
    /// Returns an empty recorder behind an [`Arc`], ready to be handed to a
    /// handler.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Everything recorded so far, in order.
    pub fn events(&self) -> Vec<Recorded> {
        self.lock().clone()
    }

    /// The recorded metrics as `(name, value)` pairs.
    pub fn metrics(&self) -> Vec<(String, f64)> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                Recorded::Metric { name, value, .. } => Some((name.clone(), *value)),
                _ => None,
            })
            .collect()
    }

    /// The recorded log messages, warnings included.
    pub fn messages(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                Recorded::Info { message, .. } | Recorded::Warn { message, .. } => {
                    Some(message.clone())
                }
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Recorded>> {
        // A test that panicked while holding the lock already failed.
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn push(&self, event: Recorded) {
        self.lock().push(event);
    }
}

impl Telemetry for RecordingTelemetry {
    fn add_metric(&self, name: &str, unit: MetricUnit, value: f64) {
        self.push(Recorded::Metric {
            name: name.to_owned(),
            unit,
            value,
        });
    }

    fn info(&self, message: &str, fields: Value) {
        self.push(Recorded::Info {
            message: message.to_owned(),
            fields,
        });
    }

    fn warn(&self, message: &str, fields: Value) {
        self.push(Recorded::Warn {
            message: message.to_owned(),
            fields,
        });
    }
}

/// A `POST /tickets` proxy event.
pub fn post_tickets(body: Option<&str>) -> ApiRequest {
    let request = ApiRequest::new().with_method("POST").with_path("/tickets");
    match body {
        Some(body) => request.with_body(body),
        None => request,
    }
}

/// A `GET /tickets` proxy event.
pub fn get_tickets(limit: Option<&str>) -> ApiRequest {
    let request = ApiRequest::new().with_method("GET").with_path("/tickets");
    match limit {
        Some(limit) => request.with_query("limit", limit),
        None => request,
    }
}
