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

//! Structured logs and CloudWatch metrics for AWS Lambda.
//!
//! Metrics are written to stdout in the CloudWatch Embedded Metric Format
//! (EMF); the Lambda log agent turns each document into a metric datum, so
//! no API call is made from the function.
//!
//! More details: <https://docs.aws.amazon.com/AmazonCloudWatch/latest/monitoring/CloudWatch_Embedded_Metric_Format_Specification.html>

use super::{MetricUnit, Telemetry};
use crate::model::iso_timestamp;
use chrono::Utc;
use log::{info, warn, Level};
use serde_json::{json, Map, Value};

/// Dimension every metric is published under.
const SERVICE_DIMENSION: &str = "service";

/// [`Telemetry`] backed by CloudWatch Logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudWatchTelemetry {
    service:   String,
    namespace: String,
}

impl CloudWatchTelemetry {
    /// Returns a telemetry sink for `service` publishing metrics under
    /// `namespace`.
    pub fn new(service: &str, namespace: &str) -> Self {
        Self {
            service:   service.to_owned(),
            namespace: namespace.to_owned(),
        }
    }

    /// The EMF document of a single metric value.
    ///
    /// # Example
    ///
    /// ```json
    /// {
    ///     "_aws": {
    ///         "Timestamp": 1740824430456,
    ///         "CloudWatchMetrics": [{
    ///             "Namespace": "Tickets",
    ///             "Dimensions": [["service"]],
    ///             "Metrics": [{ "Name": "TicketCreated", "Unit": "Count" }]
    ///         }]
    ///     },
    ///     "service": "tickets-api",
    ///     "TicketCreated": 1
    /// }
    /// ```
    pub fn metric_document(
        &self,
        name: &str,
        unit: MetricUnit,
        value: f64,
        timestamp_ms: i64,
    ) -> Value {
        let mut doc = Map::new();
        doc.insert(
            "_aws".to_owned(),
            json!({
                "Timestamp": timestamp_ms,
                "CloudWatchMetrics": [{
                    "Namespace": self.namespace,
                    "Dimensions": [[SERVICE_DIMENSION]],
                    "Metrics": [{ "Name": name, "Unit": unit.as_str() }]
                }]
            }),
        );
        doc.insert(SERVICE_DIMENSION.to_owned(), json!(self.service));
        doc.insert(name.to_owned(), metric_value(value));
        Value::Object(doc)
    }

    /// The JSON log line of an entry.
    ///
    /// `fields` are merged into the top level object; they cannot replace
    /// `level`, `message`, `service` or `timestamp`.
    pub fn log_document(&self, level: Level, message: &str, fields: Value, timestamp: &str) -> Value {
        let mut doc = match fields {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("fields".to_owned(), other);
                map
            }
        };
        doc.insert("level".to_owned(), json!(level.to_string()));
        doc.insert("message".to_owned(), json!(message));
        doc.insert("service".to_owned(), json!(self.service));
        doc.insert("timestamp".to_owned(), json!(timestamp));
        Value::Object(doc)
    }

    fn now() -> String {
        iso_timestamp(Utc::now())
    }
}

/// Whole numbers are written without a fraction, as CloudWatch shows them.
fn metric_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        json!(value as i64)
    } else {
        json!(value)
    }
}

impl Telemetry for CloudWatchTelemetry {
    fn add_metric(&self, name: &str, unit: MetricUnit, value: f64) {
        let doc = self.metric_document(name, unit, value, Utc::now().timestamp_millis());
        println!("{}", doc);
    }

    fn info(&self, message: &str, fields: Value) {
        info!("{}", self.log_document(Level::Info, message, fields, &Self::now()));
    }

    fn warn(&self, message: &str, fields: Value) {
        warn!("{}", self.log_document(Level::Warn, message, fields, &Self::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emf_document() {
        let telemetry = CloudWatchTelemetry::new("tickets-api", "Tickets");
        let doc = telemetry.metric_document("TicketCreated", MetricUnit::Count, 1.0, 1740824430456);

        assert_eq!(
            json!({
                "_aws": {
                    "Timestamp": 1740824430456_i64,
                    "CloudWatchMetrics": [{
                        "Namespace": "Tickets",
                        "Dimensions": [["service"]],
                        "Metrics": [{ "Name": "TicketCreated", "Unit": "Count" }]
                    }]
                },
                "service": "tickets-api",
                "TicketCreated": 1
            }),
            doc
        );
    }

    #[test]
    fn fractional_metric_values() {
        let telemetry = CloudWatchTelemetry::new("tickets-api", "Tickets");
        let doc = telemetry.metric_document("Latency", MetricUnit::Milliseconds, 2.5, 0);
        assert_eq!(json!(2.5), doc["Latency"]);
        assert_eq!("Milliseconds", doc["_aws"]["CloudWatchMetrics"][0]["Metrics"][0]["Unit"]);
    }

    #[test]
    fn log_line() {
        let telemetry = CloudWatchTelemetry::new("tickets-api", "Tickets");
        let doc = telemetry.log_document(
            Level::Info,
            "Ticket created",
            json!({ "id": "t-0a1b2c3d", "priority": "LOW", "message": "spoofed" }),
            "2025-03-01T10:20:30.456Z",
        );

        assert_eq!(
            json!({
                "level": "INFO",
                "message": "Ticket created",
                "service": "tickets-api",
                "timestamp": "2025-03-01T10:20:30.456Z",
                "id": "t-0a1b2c3d",
                "priority": "LOW"
            }),
            doc
        );
    }

    #[test]
    fn log_line_without_fields() {
        let telemetry = CloudWatchTelemetry::new("svc", "Ns");
        let doc = telemetry.log_document(Level::Warn, "Missing 'title' in body", Value::Null, "t");
        assert_eq!("WARN", doc["level"]);
        assert_eq!(4, doc.as_object().map(|m| m.len()).unwrap_or_default());

        let doc = telemetry.log_document(Level::Warn, "odd", json!([1]), "t");
        assert_eq!(json!([1]), doc["fields"]);
    }
}
