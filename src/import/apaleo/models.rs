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
use crate::tax::record::{ReservationRecord, TransactionRecord};
use serde::{Deserialize, Serialize};

// -------------
// -- SENDING --
// -------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountExportParams {
	pub property_id: String,
	pub account_number: String,
	pub from: String,
	pub to: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationParams {
	pub property_id: String,
	pub date_filter: &'static str, // "Stay" matches on the stay dates
	pub from: String,
	pub to: String,
}

// ---------------
// -- RECEIVING --
// ---------------

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransactionHolder {
	#[serde(default)]
	pub transactions: Vec<TransactionRecord>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReservationHolder {
	#[serde(default)]
	pub reservations: Vec<ReservationRecord>,
	#[serde(default)]
	pub count: Option<u64>,
}
