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

//! Formatting of API Gateway responses shared by all tickets functions.

use crate::configs::CorsConfig;
use crate::error::TicketsError;
use crate::runtime::event::ApiResponse;
use log::error;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

/// `Access-Control-Allow-Origin`
pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
/// `Access-Control-Allow-Headers`
pub const ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
/// `Access-Control-Allow-Methods`
pub const ALLOW_METHODS: &str = "Access-Control-Allow-Methods";

/// Builds responses that carry the CORS headers and a JSON body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseBuilder {
    cors: CorsConfig,
}

impl ResponseBuilder {
    /// Returns a builder attaching the given CORS headers.
    pub fn new(cors: CorsConfig) -> Self {
        Self { cors }
    }

    /// The headers every response carries.
    pub fn headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert(ALLOW_ORIGIN.to_owned(), self.cors.allow_origin.clone());
        headers.insert(ALLOW_HEADERS.to_owned(), self.cors.allow_headers.clone());
        headers.insert(ALLOW_METHODS.to_owned(), self.cors.allow_methods.clone());
        headers
    }

    /// Serializes `body` into a response with the given status code.
    ///
    /// A body that cannot be serialized turns into a 500 response.
    pub fn reply<T>(&self, status_code: i64, body: &T) -> ApiResponse
    where
        T: Serialize + ?Sized,
    {
        match serde_json::to_string(body) {
            Ok(body) => ApiResponse {
                status_code,
                headers: self.headers(),
                body,
            },
            Err(e) => {
                error!("Failed to serialize response body: {}", e);
                self.error(&TicketsError::SerdeJson(e))
            }
        }
    }

    /// A `{"message": ...}` response.
    pub fn message(&self, status_code: i64, message: &str) -> ApiResponse {
        self.reply(status_code, &json!({ "message": message }))
    }

    /// The public response of an error.
    pub fn error(&self, err: &TicketsError) -> ApiResponse {
        ApiResponse {
            status_code: err.status_code(),
            headers:     self.headers(),
            body:        json!({ "message": err.message() }).to_string(),
        }
    }

    /// A response without a body.
    pub fn empty(&self, status_code: i64) -> ApiResponse {
        ApiResponse {
            status_code,
            headers: self.headers(),
            body: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use serde::ser::Error as _;
    use serde::Serializer;

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
            Err(S::Error::custom("not today"))
        }
    }

    fn assert_cors(response: &ApiResponse) {
        assert_eq!(Some("*"), response.header(ALLOW_ORIGIN));
        assert_eq!(
            Some("Content-Type,Authorization,x-api-key"),
            response.header(ALLOW_HEADERS)
        );
        assert_eq!(Some("GET,POST,OPTIONS"), response.header(ALLOW_METHODS));
        assert_eq!(3, response.headers.len());
    }

    #[test]
    fn reply_serializes_body() -> Result<()> {
        let builder = ResponseBuilder::default();
        let response = builder.reply(200, &json!({ "items": [1, 2] }));

        assert_eq!(200, response.status_code);
        assert_eq!(json!({ "items": [1, 2] }), response.json()?);
        assert_cors(&response);
        Ok(())
    }

    #[test]
    fn every_status_has_cors_headers() {
        let builder = ResponseBuilder::default();
        assert_cors(&builder.message(400, "Invalid JSON"));
        assert_cors(&builder.error(&TicketsError::MissingTitle));
        assert_cors(&builder.empty(204));
        assert_cors(&builder.reply(500, &Unserializable));
    }

    #[test]
    fn unserializable_body_is_internal_error() -> Result<()> {
        let response = ResponseBuilder::default().reply(201, &Unserializable);
        assert_eq!(500, response.status_code);
        assert_eq!(json!({ "message": "Internal server error" }), response.json()?);
        Ok(())
    }

    #[test]
    fn custom_cors() {
        let builder = ResponseBuilder::new(CorsConfig {
            allow_origin:  "https://tickets.example.com".to_owned(),
            allow_headers: "Content-Type,Authorization".to_owned(),
            allow_methods: "GET,POST,OPTIONS".to_owned(),
        });
        let response = builder.empty(204);
        assert_eq!(
            Some("https://tickets.example.com"),
            response.header(ALLOW_ORIGIN)
        );
        assert_eq!(
            Some("Content-Type,Authorization"),
            response.header(ALLOW_HEADERS)
        );
        assert_eq!("", response.body);
    }
}
