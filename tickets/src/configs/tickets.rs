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

//! Configuration settings that affect all crates in current system.

use ini::Ini;
use lazy_static::lazy_static;

lazy_static! {
    /// Global settings.
    ///
    /// The file is compiled into the binary; if it ever fails to parse, every
    /// lookup falls back to its built-in default.
    pub static ref TICKETS_CONF: Ini =
        Ini::load_from_str(include_str!("./config.toml")).unwrap_or_else(|_| Ini::new());
}

/// Reads `key` from `section` of the global settings.
pub fn conf_value(section: &str, key: &str, default: &str) -> String {
    TICKETS_CONF
        .get_from_or(Some(section), key, default)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setting_shows() {
        let conf = Ini::load_from_str(include_str!("./config.toml")).unwrap();

        for (sec, prop) in &conf {
            println!("Section: {:?}", sec);
            for (key, value) in prop.iter() {
                println!("{:?}:{:?}", key, value);
            }
        }

        let get = |section: &str, key: &str| conf.get_from(Some(section), key);
        assert_eq!(Some("tickets-api"), get("service", "name"));
        assert_eq!(Some("on"), get("service", "telemetry"));
        assert_eq!(Some("Tickets"), get("metrics", "namespace"));
        assert_eq!(Some("*"), get("cors", "allow_origin"));
        assert_eq!(
            Some("Content-Type,Authorization,x-api-key"),
            get("cors", "allow_headers")
        );
        assert_eq!(Some("GET,POST,OPTIONS"), get("cors", "allow_methods"));
        assert_eq!(Some("t-"), get("tickets", "id_prefix"));
        assert_eq!(Some("LOW"), get("tickets", "default_priority"));
    }

    #[test]
    fn missing_key_uses_default() {
        assert_eq!("fallback", conf_value("service", "no_such_key", "fallback"));
        assert_eq!("fallback", conf_value("no_such_section", "name", "fallback"));
    }
}
