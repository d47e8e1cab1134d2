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

//! This module provides various default configurations for the tickets
//! service.

mod tickets;
pub use self::tickets::{conf_value, TICKETS_CONF};

use crate::error::{Result, TicketsError};
use lazy_static::lazy_static;
use log::warn;

/// Environment variable overriding the service name.
pub const SERVICE_NAME_ENV: &str = "POWERTOOLS_SERVICE_NAME";
/// Environment variable overriding the metrics namespace.
pub const METRICS_NAMESPACE_ENV: &str = "POWERTOOLS_METRICS_NAMESPACE";
/// Environment variable switching logs and metrics on or off.
pub const TELEMETRY_ENV: &str = "TICKETS_TELEMETRY";

lazy_static! {
    /// The service name attached to every log line and metric.
    pub static ref TICKETS_SERVICE_NAME: String = conf_value("service", "name", "tickets-api");
    /// Whether handlers are built with the observability port.
    pub static ref TICKETS_TELEMETRY: String = conf_value("service", "telemetry", "on");
    /// CloudWatch metrics namespace.
    pub static ref TICKETS_METRICS_NAMESPACE: String = conf_value("metrics", "namespace", "Tickets");

    /// `Access-Control-Allow-Origin` response header.
    pub static ref TICKETS_CORS_ALLOW_ORIGIN: String = conf_value("cors", "allow_origin", "*");
    /// `Access-Control-Allow-Headers` response header.
    pub static ref TICKETS_CORS_ALLOW_HEADERS: String =
        conf_value("cors", "allow_headers", "Content-Type,Authorization,x-api-key");
    /// `Access-Control-Allow-Methods` response header.
    pub static ref TICKETS_CORS_ALLOW_METHODS: String =
        conf_value("cors", "allow_methods", "GET,POST,OPTIONS");

    /// Prefix of generated ticket identifiers.
    pub static ref TICKETS_ID_PREFIX: String = conf_value("tickets", "id_prefix", "t-");
    /// Priority assigned when the client sends none.
    pub static ref TICKETS_DEFAULT_PRIORITY: String = conf_value("tickets", "default_priority", "LOW");
}

/// Cross-origin headers attached to every response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    /// Value of `Access-Control-Allow-Origin`.
    pub allow_origin:  String,
    /// Value of `Access-Control-Allow-Headers`.
    pub allow_headers: String,
    /// Value of `Access-Control-Allow-Methods`.
    pub allow_methods: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        CorsConfig {
            allow_origin:  TICKETS_CORS_ALLOW_ORIGIN.to_string(),
            allow_headers: TICKETS_CORS_ALLOW_HEADERS.to_string(),
            allow_methods: TICKETS_CORS_ALLOW_METHODS.to_string(),
        }
    }
}

/// Runtime settings of a tickets function.
///
/// Built from the embedded `config.toml` and then overlaid with the
/// environment of the cloud function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Service name used by logs and as the metrics dimension.
    pub service_name:      String,
    /// CloudWatch metrics namespace.
    pub metrics_namespace: String,
    /// Whether handlers get an observability port.
    pub telemetry:         bool,
    /// Response CORS headers.
    pub cors:              CorsConfig,
    /// Prefix of generated ticket identifiers.
    pub id_prefix:         String,
    /// Priority assigned when the client sends none.
    pub default_priority:  String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            service_name:      TICKETS_SERVICE_NAME.to_string(),
            metrics_namespace: TICKETS_METRICS_NAMESPACE.to_string(),
            telemetry:         default_switch(&TICKETS_TELEMETRY),
            cors:              CorsConfig::default(),
            id_prefix:         TICKETS_ID_PREFIX.to_string(),
            default_priority:  TICKETS_DEFAULT_PRIORITY.to_string(),
        }
    }
}

impl Settings {
    /// Returns the default settings overlaid with the process environment.
    pub fn from_env() -> Result<Self> {
        Settings::default().overlay(|key| std::env::var(key).ok())
    }

    /// Overlays the settings with the variables `lookup` knows about.
    ///
    /// Empty values are treated as unset.
    pub fn overlay<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(name) = lookup(SERVICE_NAME_ENV) {
            self.service_name = name;
        }
        if let Some(namespace) = lookup(METRICS_NAMESPACE_ENV) {
            self.metrics_namespace = namespace;
        }
        if let Some(switch) = lookup(TELEMETRY_ENV) {
            self.telemetry = parse_switch(&switch).ok_or_else(|| {
                TicketsError::Config(format!(
                    "{} must be one of on/off/true/false/1/0, got {:?}",
                    TELEMETRY_ENV, switch
                ))
            })?;
        }

        Ok(self)
    }
}

/// The compiled-in telemetry switch. An unreadable value keeps telemetry on.
fn default_switch(value: &str) -> bool {
    parse_switch(value).unwrap_or_else(|| {
        warn!(
            "Ignoring [service] telemetry = {:?} in config.toml, telemetry stays on",
            value
        );
        true
    })
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Some(true),
        "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
