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

//! The observability port of the tickets handlers.
//!
//! Handlers receive an optional [`Telemetry`] at construction time. Whether
//! one is present never changes the response a handler produces.

mod cloudwatch;
pub use self::cloudwatch::CloudWatchTelemetry;

use crate::configs::Settings;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// CloudWatch metric units.
///
/// <https://docs.aws.amazon.com/AmazonCloudWatch/latest/APIReference/API_MetricDatum.html>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricUnit {
    /// A plain count.
    Count,
    /// A duration.
    Milliseconds,
    /// A size.
    Bytes,
    /// No unit.
    None,
}

impl MetricUnit {
    /// The unit name CloudWatch expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricUnit::Count => "Count",
            MetricUnit::Milliseconds => "Milliseconds",
            MetricUnit::Bytes => "Bytes",
            MetricUnit::None => "None",
        }
    }
}

impl fmt::Display for MetricUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metrics and structured logs emitted by the handlers.
pub trait Telemetry: Send + Sync {
    /// Records a single metric value.
    fn add_metric(&self, name: &str, unit: MetricUnit, value: f64);

    /// Emits an informational log entry. `fields` is a JSON object.
    fn info(&self, message: &str, fields: Value);

    /// Emits a warning log entry. `fields` is a JSON object.
    fn warn(&self, message: &str, fields: Value);
}

/// Builds the observability port described by `settings`, or none when
/// telemetry is switched off.
pub fn from_settings(settings: &Settings) -> Option<Arc<dyn Telemetry>> {
    if settings.telemetry {
        Some(Arc::new(CloudWatchTelemetry::new(
            &settings.service_name,
            &settings.metrics_namespace,
        )))
    } else {
        None
    }
}
