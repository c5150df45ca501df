/* Copyright © 2024-2025 Adam Train <adam@adamtrain.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::config::config_file::Config;
use anyhow::{anyhow, bail, Context, Error};
use dirs::home_dir;
use std::fs;
use std::fs::File;
use std::path::PathBuf;
use std::process::Command;

const DEFAULT_CONFIG_PATH: &str = ".config/citytax/config.toml";

pub struct Filesystem {
	home: Option<PathBuf>,
}

impl Filesystem {
	pub fn new() -> Self {
		Self { home: home_dir() }
	}

	pub fn read_to_string(&self, file_path: &str) -> Result<String, Error> {
		fs::read_to_string(file_path)
			.with_context(|| format!("failed to read `{}`", file_path))
	}

	/// Fetches the config from the given path, or default path if none.
	/// The boolean argument indicates whether it is necessary to inspect
	/// the config for authentication, i.e. for fetching data via API.
	pub fn get_config(
		&self,
		custom_config_path: Option<&String>,
		expand_auth: bool,
	) -> Result<Config, Error> {
		let config_path = match &custom_config_path {
			None => self
				.home
				.as_ref()
				.ok_or_else(|| anyhow!("Unable to determine home directory"))?
				.join(DEFAULT_CONFIG_PATH),
			Some(p) => PathBuf::from(p),
		};

		// create empty config file if it doesn't exist
		if !config_path.exists() && custom_config_path.is_none() {
			if let Some(parent) = config_path.parent() {
				fs::create_dir_all(parent)?;
			}
			File::create(config_path.clone())?;
		}

		let content = fs::read_to_string(&config_path).with_context(|| {
			format!("failed to read config `{}`", config_path.display())
		})?;
		let mut config: Config = toml::from_str(&content)
			.map_err(|e| anyhow!("failed to parse config: {}", e))?;

		// Execute token_cmd if applicable, and put result in token
		if !expand_auth {
			return Ok(config);
		}

		if let Some(apaleo) = &mut config.apaleo {
			if apaleo.token_cmd.is_some() && apaleo.token.is_some() {
				bail!("Only one of apaleo.token and apaleo.token_cmd may be specified")
			}

			if let Some(token_cmd) = &apaleo.token_cmd {
				apaleo.token = Some(run_token_cmd(token_cmd)?);
			}
		}

		Ok(config)
	}
}

fn run_token_cmd(token_cmd: &str) -> Result<String, Error> {
	tracing::debug!("running apaleo.token_cmd");

	let output = Command::new("sh")
		.arg("-c")
		.arg(token_cmd)
		.output()
		.map_err(|e| anyhow!("failed to execute token_cmd: {}", e))?;

	if !output.status.success() {
		bail!(
			"apaleo token_cmd failed with status {}: {}",
			output.status,
			String::from_utf8_lossy(&output.stderr)
		);
	}

	Ok(String::from_utf8(output.stdout)
		.map_err(|e| anyhow!("failed to parse command output: {}", e))?
		.trim()
		.to_string())
}
