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

//! Flags shared by every `tickets-cli` subcommand.

use anyhow::Result;
use clap::{Arg, ArgMatches};
use log::LevelFilter;
use std::io::Write;

/// Global flags: logging verbosity and the telemetry switch.
pub fn get_args() -> Vec<Arg<'static>> {
    vec![
        Arg::new("log-level")
            .short('L')
            .long("log-level")
            .possible_values(["error", "warn", "info", "debug", "trace", "off"])
            .help("Log level [default: info]")
            .global(true)
            .takes_value(true),
        Arg::new("trace")
            .long("trace")
            .help("Log ultra-verbose (trace level) information")
            .global(true)
            .takes_value(false),
        Arg::new("silent")
            .long("silent")
            .help("Suppress all log output")
            .global(true)
            .takes_value(false),
        Arg::new("telemetry")
            .long("telemetry")
            .help("Emits handler logs and CloudWatch EMF metrics (metrics go to stdout)")
            .global(true)
            .takes_value(false),
    ]
}

fn is_present(global_matches: &ArgMatches, matches: &ArgMatches, name: &str) -> bool {
    matches.is_present(name) || global_matches.is_present(name)
}

/// Whether the handlers should be built with their observability port.
pub fn telemetry_requested(global_matches: &ArgMatches, matches: &ArgMatches) -> bool {
    is_present(global_matches, matches, "telemetry")
}

fn log_level(global_matches: &ArgMatches, matches: &ArgMatches) -> LevelFilter {
    if is_present(global_matches, matches, "trace") {
        return LevelFilter::Trace;
    }
    if is_present(global_matches, matches, "silent") {
        return LevelFilter::Off;
    }
    match matches
        .value_of("log-level")
        .or_else(|| global_matches.value_of("log-level"))
    {
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        Some("off") => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// A logger writing to stderr, so stdout only carries the response.
pub fn get_logging(
    global_matches: &ArgMatches,
    matches: &ArgMatches,
) -> Result<env_logger::Builder> {
    let level = log_level(global_matches, matches);

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .target(env_logger::Target::Stderr);

    if level == LevelFilter::Trace {
        builder.format_timestamp_millis();
    } else {
        builder.format(|f, record| {
            writeln!(
                f,
                "[{}] {}",
                record.level().to_string().to_lowercase(),
                record.args()
            )
        });
    }

    Ok(builder)
}
