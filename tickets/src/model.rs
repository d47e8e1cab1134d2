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

//! This module contains the [`Ticket`] type and the demo tickets served by
//! the list function. Tickets only live inside a single response; nothing is
//! stored.

use chrono::{DateTime, SecondsFormat, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Number of hex characters taken from a random UUID for a ticket id.
pub const ID_HEX_LEN: usize = 8;

/// A support ticket.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// `t-` followed by 8 hex characters for created tickets.
    pub id:         String,
    /// The trimmed title.
    pub title:      String,
    /// Free-form priority, echoed back as the client sent it.
    pub priority:   Value,
    /// ISO-8601 creation instant. Demo tickets have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

lazy_static! {
    /// The fixed tickets returned by the list function.
    pub static ref DEMO_TICKETS: Vec<Ticket> = vec![
        Ticket::demo("t-1001", "First ticket", "LOW"),
        Ticket::demo("t-1002", "Second ticket", "HIGH"),
    ];
}

/// Returns the demo tickets in their fixed order.
pub fn demo_tickets() -> &'static [Ticket] {
    &DEMO_TICKETS
}

impl Ticket {
    fn demo(id: &str, title: &str, priority: &str) -> Self {
        Ticket {
            id:         id.to_owned(),
            title:      title.to_owned(),
            priority:   Value::String(priority.to_owned()),
            created_at: None,
        }
    }

    /// Creates a new ticket with a random identifier.
    ///
    /// # Arguments
    /// * `id_prefix` - The prefix of the generated identifier, e.g. `t-`.
    /// * `title` - The already validated and trimmed title.
    /// * `priority` - The priority from the request, if any.
    /// * `default_priority` - Used when `priority` is missing or falsy.
    /// * `now` - The creation instant.
    pub fn create(
        id_prefix: &str,
        title: &str,
        priority: Option<&Value>,
        default_priority: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let priority = match priority {
            Some(p) if !is_falsy(p) => p.clone(),
            _ => Value::String(default_priority.to_owned()),
        };

        Ticket {
            id: generate_id(id_prefix),
            title: title.to_owned(),
            priority,
            created_at: Some(iso_timestamp(now)),
        }
    }
}

/// Returns `prefix` followed by the first 8 hex characters of a v4 UUID.
pub fn generate_id(prefix: &str) -> String {
    let uuid = Uuid::new_v4().to_string();
    format!("{}{}", prefix, &uuid[..ID_HEX_LEN])
}

/// Formats an instant like `2025-03-01T10:20:30.456Z`.
pub fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Whether a JSON value counts as "no value": `null`, `false`, zero or the
/// empty string.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Whether `c` is an ECMAScript `WhiteSpace` or `LineTerminator`.
///
/// Unlike [`char::is_whitespace`], U+0085 (NEL) is not part of the set.
pub fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{9}'..='\u{d}'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}

/// Strips leading and trailing whitespace the way `String.prototype.trim`
/// does.
pub fn trim_title(title: &str) -> &str {
    title.trim_matches(is_js_whitespace)
}
