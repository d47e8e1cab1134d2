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

mod args;
mod invoke;

use anyhow::{Context, Result};
use clap::{crate_version, App, AppSettings};
use tickets::prelude::Settings;

pub fn main() -> Result<()> {
    // Command line arg parsing and configuration.
    let matches = App::new("tickets-cli")
        .version(crate_version!())
        .about("Command Line Controller for the tickets functions")
        .author("UMD Database Group")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .args(args::get_args())
        .subcommands(invoke::command_args())
        .get_matches();

    let (name, sub_matches) = matches
        .subcommand()
        .context("No subcommand provided")?;

    args::get_logging(&matches, sub_matches)?.init();

    let mut settings = Settings::from_env().context("Failed to load the tickets settings")?;
    // EMF metrics share stdout with the response, so they are opt-in here.
    settings.telemetry &= args::telemetry_requested(&matches, sub_matches);

    let response = invoke::command(name, sub_matches, &settings)?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
