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

//! This module contains the [`ApiRequest`] and [`ApiResponse`] types, the
//! subset of the Amazon API Gateway proxy integration that the tickets
//! functions read and write.
//!
//! More details: <https://docs.aws.amazon.com/apigateway/latest/developerguide/set-up-lambda-proxy-integrations.html>

use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// An API Gateway proxy request.
///
/// Only the fields the handlers look at are kept; every other field of the
/// proxy event is ignored during deserialization.
///
/// # Example
///
/// ```json
/// {
///     "resource": "/tickets",
///     "path": "/tickets",
///     "httpMethod": "GET",
///     "queryStringParameters": { "limit": "1" },
///     "body": null,
///     "isBase64Encoded": false
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    /// The HTTP method of the request.
    #[serde(default)]
    pub http_method:             Option<String>,
    /// The request path.
    #[serde(default)]
    pub path:                    Option<String>,
    /// Single-value query string parameters. API Gateway sends `null` when
    /// the request has none.
    #[serde(default, deserialize_with = "nullable_map")]
    pub query_string_parameters: HashMap<String, String>,
    /// The raw request body.
    #[serde(default)]
    pub body:                    Option<String>,
}

fn nullable_map<'de, D>(deserializer: D) -> std::result::Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<HashMap<String, String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ApiRequest {
    /// Returns an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP method.
    pub fn with_method(mut self, method: &str) -> Self {
        self.http_method = Some(method.to_owned());
        self
    }

    /// Sets the request path.
    pub fn with_path(mut self, path: &str) -> Self {
        self.path = Some(path.to_owned());
        self
    }

    /// Sets the raw body.
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = Some(body.to_owned());
        self
    }

    /// Adds a query string parameter.
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query_string_parameters
            .insert(key.to_owned(), value.to_owned());
        self
    }

    /// Returns the HTTP method, `GET` when the event carries none.
    pub fn method(&self) -> &str {
        self.http_method.as_deref().unwrap_or("GET")
    }

    /// Returns the value of a query string parameter.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query_string_parameters.get(key).map(|v| v.as_str())
    }

    /// Parses an API Gateway proxy event.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// An API Gateway proxy response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    /// The HTTP status code.
    pub status_code: i64,
    /// Response headers.
    pub headers:     BTreeMap<String, String>,
    /// The response body, JSON text or empty.
    pub body:        String,
}

impl ApiResponse {
    /// Looks up a response header, ignoring the case of its name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Parses the body as JSON.
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}
