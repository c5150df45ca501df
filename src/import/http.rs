/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
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
use anyhow::{bail, Context};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

pub struct Client {
	client: reqwest::blocking::Client,
	base_url: String,
	token: String,
}

impl Client {
	pub fn new(base_url: &str, token: String) -> Self {
		Client {
			client: reqwest::blocking::Client::new(),
			base_url: base_url.trim_end_matches('/').to_string(),
			token,
		}
	}

	/// Sends a GET and handles the response. See `send`.
	pub fn get<Q, R>(
		&self,
		endpoint: &str,
		query_params: &Q,
	) -> Result<Option<R>, anyhow::Error>
	where
		Q: Serialize,
		R: for<'de> Deserialize<'de>,
	{
		self.send(Method::GET, endpoint, query_params)
	}

	/// Sends a body-less POST and handles the response. See `send`.
	pub fn post<Q, R>(
		&self,
		endpoint: &str,
		query_params: &Q,
	) -> Result<Option<R>, anyhow::Error>
	where
		Q: Serialize,
		R: for<'de> Deserialize<'de>,
	{
		self.send(Method::POST, endpoint, query_params)
	}

	/// Errors on non-2xx response codes. A 204 yields None, since list
	/// endpoints answer an empty result that way.
	fn send<Q, R>(
		&self,
		method: Method,
		endpoint: &str,
		query_params: &Q,
	) -> Result<Option<R>, anyhow::Error>
	where
		Q: Serialize,
		R: for<'de> Deserialize<'de>,
	{
		let url = format!("{}/{}", self.base_url, endpoint);

		let request = self
			.client
			.request(method.clone(), &url)
			.bearer_auth(&self.token)
			.query(query_params);

		tracing::info!("Sending {} to {}", method, url);
		let response = request.send()?;

		// Handle non-2xx response codes
		if !response.status().is_success() {
			bail!("Request to {} failed with status: {}", url, response.status());
		}
		if response.status() == StatusCode::NO_CONTENT {
			return Ok(None);
		}

		let response_data: R = response
			.json()
			.with_context(|| format!("unexpected response body from {}", url))?;
		Ok(Some(response_data))
	}
}
