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

//! End-to-end behavior of the tickets functions, driven through API Gateway
//! proxy events.

use chrono::DateTime;
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use regex::Regex;
use serde_json::{json, Value};
use std::sync::Arc;
use tickets::prelude::*;
use tickets::test_util::{get_tickets, post_tickets, RecordingTelemetry};

const CORS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    (
        "Access-Control-Allow-Headers",
        "Content-Type,Authorization,x-api-key",
    ),
    ("Access-Control-Allow-Methods", "GET,POST,OPTIONS"),
];

fn create() -> CreateTicketHandler {
    CreateTicketHandler::new(&Settings::default(), None)
}

fn list() -> ListTicketsHandler {
    ListTicketsHandler::new(&Settings::default(), None)
}

fn assert_cors(response: &ApiResponse) {
    for (name, value) in CORS.iter() {
        assert_eq!(Some(*value), response.header(name), "header {}", name);
    }
}

fn body(response: &ApiResponse) -> Value {
    response.json().expect("response body is JSON")
}

#[test]
fn create_trims_title_and_defaults_priority() {
    let response = create().handle(&post_tickets(Some("{\"title\":\"  Fix login bug  \"}")));

    assert_eq!(201, response.status_code);
    assert_cors(&response);

    let body = body(&response);
    let ticket = &body["ticket"];
    assert_eq!("Fix login bug", ticket["title"]);
    assert_eq!("LOW", ticket["priority"]);

    let id = ticket["id"].as_str().unwrap_or_default();
    assert!(Regex::new("^t-[0-9a-f]{8}$").unwrap().is_match(id), "id {}", id);

    let created_at = ticket["createdAt"].as_str().unwrap_or_default();
    assert!(DateTime::parse_from_rfc3339(created_at).is_ok(), "createdAt {}", created_at);
    assert!(created_at.ends_with('Z'));

    let fields: Vec<&String> = ticket.as_object().map(|o| o.keys().collect()).unwrap_or_default();
    assert_eq!(4, fields.len());
}

#[test]
fn create_keeps_priority_verbatim() {
    for priority in &[json!("HIGH"), json!("urgent!!"), json!(2), json!({ "level": 1 })] {
        let request = json!({ "title": "Broken printer", "priority": priority }).to_string();
        let response = create().handle(&post_tickets(Some(&request)));

        assert_eq!(201, response.status_code);
        assert_eq!(priority, &body(&response)["ticket"]["priority"]);
    }
}

#[test]
fn create_rejects_blank_title() {
    for request in &[
        Some("{\"title\":\"\"}"),
        Some("{\"title\":\"   \"}"),
        Some("{\"title\":12}"),
        Some("{\"name\":\"x\"}"),
        Some("null"),
        Some("[]"),
        Some(""),
        None,
    ] {
        let response = create().handle(&post_tickets(*request));

        assert_eq!(400, response.status_code, "request {:?}", request);
        assert_eq!(json!({ "message": "Field 'title' is required" }), body(&response));
        assert_cors(&response);
    }
}

#[test]
fn create_keeps_next_line_characters() {
    for (title, expected) in &[
        ("\u{85}", "\u{85}"),
        ("\u{85}x\u{85}", "\u{85}x\u{85}"),
        (" \u{85}x\u{feff}", "\u{85}x"),
    ] {
        let request = json!({ "title": title }).to_string();
        let response = create().handle(&post_tickets(Some(&request)));

        assert_eq!(201, response.status_code, "title {:?}", title);
        assert_eq!(*expected, body(&response)["ticket"]["title"]);
    }
}

#[test]
fn create_rejects_invalid_json() {
    for request in &["not-json", "{\"title\":", "   ", "{title: 'x'}"] {
        let response = create().handle(&post_tickets(Some(*request)));

        assert_eq!(400, response.status_code, "request {:?}", request);
        assert_eq!(json!({ "message": "Invalid JSON" }), body(&response));
        assert_cors(&response);
    }
}

#[test]
fn create_trims_random_titles() {
    for _ in 0..50 {
        let title: String = Sentence(1..6).fake();
        let padded = format!(" \t{}\n ", title);
        let request = json!({ "title": padded }).to_string();
        let response = create().handle(&post_tickets(Some(&request)));

        assert_eq!(201, response.status_code);
        assert_eq!(title.trim(), body(&response)["ticket"]["title"]);
    }
}

#[test]
fn list_without_limit() {
    let response = list().handle(&get_tickets(None));

    assert_eq!(200, response.status_code);
    assert_cors(&response);
    assert_eq!(
        json!({
            "items": [
                { "id": "t-1001", "title": "First ticket", "priority": "LOW" },
                { "id": "t-1002", "title": "Second ticket", "priority": "HIGH" }
            ]
        }),
        body(&response)
    );
}

#[test]
fn list_with_limit() {
    let response = list().handle(&get_tickets(Some("1")));
    assert_eq!(
        json!({ "items": [{ "id": "t-1001", "title": "First ticket", "priority": "LOW" }] }),
        body(&response)
    );

    let response = list().handle(&get_tickets(Some("5")));
    assert_eq!(2, body(&response)["items"].as_array().map_or(0, |a| a.len()));

    let response = list().handle(&get_tickets(Some("0")));
    assert_eq!(json!({ "items": [] }), body(&response));
}

#[test]
fn list_ignores_invalid_limit() {
    for limit in &["abc", "-1", "", "2.5"] {
        let response = list().handle(&get_tickets(Some(*limit)));
        assert_eq!(200, response.status_code);
        assert_eq!(2, body(&response)["items"].as_array().map_or(0, |a| a.len()), "limit {:?}", limit);
    }
}

#[test]
fn telemetry_does_not_change_responses() {
    let recorder = RecordingTelemetry::shared();
    let port: Option<Arc<dyn Telemetry>> = Some(recorder.clone());
    let settings = Settings::default();

    let with = Router::new(&settings, port);
    let without = Router::new(&settings, None);

    for request in &[
        get_tickets(None),
        get_tickets(Some("1")),
        get_tickets(Some("nope")),
        post_tickets(Some("not-json")),
        post_tickets(None),
        ApiRequest::new().with_method("OPTIONS"),
        ApiRequest::new().with_method("DELETE"),
    ] {
        assert_eq!(without.handle(request), with.handle(request));
    }

    let ticket = |r: &ApiResponse| {
        let mut t = body(r)["ticket"].clone();
        if let Some(o) = t.as_object_mut() {
            o.remove("id");
            o.remove("createdAt");
        }
        t
    };
    let request = post_tickets(Some("{\"title\":\"same\",\"priority\":\"HIGH\"}"));
    assert_eq!(ticket(&without.handle(&request)), ticket(&with.handle(&request)));

    assert!(!recorder.events().is_empty());
}

#[test]
fn proxy_event_round_trip() {
    let event = json!({
        "resource": "/tickets",
        "path": "/tickets",
        "httpMethod": "POST",
        "headers": { "Content-Type": "application/json" },
        "queryStringParameters": null,
        "requestContext": { "stage": "prod" },
        "body": "{\"title\":\"From API Gateway\"}",
        "isBase64Encoded": false
    });
    let request: ApiRequest = serde_json::from_value(event).expect("valid proxy event");
    let response = Router::new(&Settings::default(), None).handle(&request);

    let wire = serde_json::to_value(&response).expect("serializable response");
    assert_eq!(json!(201), wire["statusCode"]);
    assert_eq!("*", wire["headers"]["Access-Control-Allow-Origin"]);

    let body: Value = serde_json::from_str(wire["body"].as_str().unwrap_or_default())
        .expect("body is JSON text");
    assert_eq!("From API Gateway", body["ticket"]["title"]);
}
