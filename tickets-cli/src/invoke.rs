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

//! Runs the tickets handlers locally, the same way the Lambda functions do.

use anyhow::{bail, Context, Result};
use clap::{App, Arg, ArgMatches};
use log::info;
use serde_json::json;
use std::io::Read;
use tickets::prelude::{
    ApiRequest, ApiResponse, CreateTicketHandler, Handler, ListTicketsHandler, Router, Settings,
};

pub fn command_args() -> Vec<App<'static>> {
    vec![
        App::new("create")
            .about("Creates a ticket through the create function")
            .arg(
                Arg::new("title")
                    .short('t')
                    .long("title")
                    .value_name("TITLE")
                    .help("The ticket title")
                    .takes_value(true),
            )
            .arg(
                Arg::new("priority")
                    .short('p')
                    .long("priority")
                    .value_name("PRIORITY")
                    .help("The ticket priority [default: LOW]")
                    .requires("title")
                    .takes_value(true),
            )
            .arg(
                Arg::new("body")
                    .short('b')
                    .long("body")
                    .value_name("JSON")
                    .help("Sends a raw request body instead of --title/--priority")
                    .conflicts_with_all(&["title", "priority"])
                    .takes_value(true),
            ),
        App::new("list")
            .about("Lists tickets through the list function")
            .arg(
                Arg::new("limit")
                    .short('l')
                    .long("limit")
                    .value_name("N")
                    .help("Returns at most N tickets")
                    .takes_value(true),
            ),
        App::new("invoke")
            .about("Feeds an API Gateway proxy event to a tickets function")
            .arg(
                Arg::new("event")
                    .short('e')
                    .long("event")
                    .value_name("FILE")
                    .help("The event file, or - to read it from stdin")
                    .required(true)
                    .takes_value(true),
            )
            .arg(
                Arg::new("function")
                    .short('f')
                    .long("function")
                    .possible_values(["create", "list", "api"])
                    .help("The function receiving the event [default: api]")
                    .takes_value(true),
            ),
    ]
}

/// Runs the subcommand `name` and returns the function's response.
pub fn command(name: &str, matches: &ArgMatches, settings: &Settings) -> Result<ApiResponse> {
    let response = match name {
        "create" => {
            let request = create_request(matches)?;
            CreateTicketHandler::from_settings(settings).handle(&request)
        }
        "list" => {
            let mut request = ApiRequest::new().with_method("GET").with_path("/tickets");
            if let Some(limit) = matches.value_of("limit") {
                request = request.with_query("limit", limit);
            }
            ListTicketsHandler::from_settings(settings).handle(&request)
        }
        "invoke" => {
            let path = matches.value_of("event").unwrap_or("-");
            let request = read_event(path)?;
            let handler: Box<dyn Handler> = match matches.value_of("function") {
                Some("create") => Box::new(CreateTicketHandler::from_settings(settings)),
                Some("list") => Box::new(ListTicketsHandler::from_settings(settings)),
                _ => Box::new(Router::from_settings(settings)),
            };
            handler.handle(&request)
        }
        other => bail!("Unknown command: {}", other),
    };

    info!("{} -> {}", name, response.status_code);
    Ok(response)
}

fn create_request(matches: &ArgMatches) -> Result<ApiRequest> {
    let request = ApiRequest::new().with_method("POST").with_path("/tickets");

    let body = match (matches.value_of("body"), matches.value_of("title")) {
        (Some(body), _) => Some(body.to_owned()),
        (None, Some(title)) => {
            let mut payload = json!({ "title": title });
            if let Some(priority) = matches.value_of("priority") {
                payload["priority"] = json!(priority);
            }
            Some(serde_json::to_string(&payload)?)
        }
        (None, None) => None,
    };

    Ok(match body {
        Some(body) => request.with_body(&body),
        None => request,
    })
}

/// Reads an API Gateway proxy event from `path`, `-` being stdin.
pub fn read_event(path: &str) -> Result<ApiRequest> {
    let bytes = if path == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read the event from stdin")?;
        buf
    } else {
        std::fs::read(path).with_context(|| format!("Failed to read the event file {}", path))?
    };

    ApiRequest::from_slice(&bytes).with_context(|| format!("{} is not an API Gateway proxy event", path))
}
