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
use crate::config::config_file::Apaleo;
use crate::import::http::Client;
use crate::import::importer::Source;
use crate::import::apaleo::models::{
	AccountExportParams, ReservationHolder, ReservationParams,
	TransactionHolder,
};
use crate::tax::record::{ReservationRecord, TransactionRecord};
use crate::util::date::ReportWindow;
use anyhow::{anyhow, Error};

const APALEO_API_URL: &str = "https://api.apaleo.com";

/// The ledger account reduced-rate city tax is posted to.
const CITY_TAX_ACCOUNT: &str = "CityTax_Reduced:7.00";

/// Reads accounting transactions and reservations from the Apaleo API.
/// Read-only implementation.
pub struct ApaleoSource {
	http: Client,
	account_number: String,
}

impl ApaleoSource {
	pub fn new(config: Apaleo) -> Result<Self, Error> {
		let token = config
			.token
			.ok_or_else(|| anyhow!("no apaleo token in config"))?;

		let api_url = config.api_url.unwrap_or(APALEO_API_URL.to_owned());

		Ok(ApaleoSource {
			http: Client::new(&api_url, token),
			account_number: config
				.account_number
				.unwrap_or(CITY_TAX_ACCOUNT.to_owned()),
		})
	}
}

impl Source for ApaleoSource {
	fn transactions(
		&self,
		property: &str,
		window: &ReportWindow,
	) -> Result<Vec<TransactionRecord>, Error> {
		let resp: Option<TransactionHolder> = self.http.post(
			"finance/v1/accounts/export",
			&AccountExportParams {
				property_id: property.to_string(),
				account_number: self.account_number.clone(),
				from: window.start_timestamp(),
				to: window.end_timestamp(),
			},
		)?;

		Ok(resp.unwrap_or_default().transactions)
	}

	fn reservations(
		&self,
		property: &str,
		window: &ReportWindow,
	) -> Result<Vec<ReservationRecord>, Error> {
		let resp: Option<ReservationHolder> = self.http.get(
			"booking/v1/reservations",
			&ReservationParams {
				property_id: property.to_string(),
				date_filter: "Stay",
				from: window.start_timestamp(),
				to: window.end_timestamp(),
			},
		)?;

		let resp = resp.unwrap_or_default();
		if let Some(count) = resp.count {
			if count as usize != resp.reservations.len() {
				tracing::warn!(
					count,
					received = resp.reservations.len(),
					"reservation list is incomplete; some charges may not join"
				);
			}
		}

		Ok(resp.reservations)
	}
}
