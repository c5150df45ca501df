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
use crate::config::filesystem::Filesystem;
use crate::tax::record::{ReservationRecord, TransactionRecord};
use crate::tax::window::POSTING_DRIFT_DAYS;
use crate::util::date::ReportWindow;
use anyhow::{Context, Error};
use serde::Deserialize;

/// Reservations are fetched this many days either side of the report start,
/// so that long stays beginning before the window still join.
pub const RESERVATION_SPAN_DAYS: u64 = 120;

/// Anything that can hand over the raw inputs of a report.
pub trait Source {
	fn transactions(
		&self,
		property: &str,
		window: &ReportWindow,
	) -> Result<Vec<TransactionRecord>, Error>;

	fn reservations(
		&self,
		property: &str,
		window: &ReportWindow,
	) -> Result<Vec<ReservationRecord>, Error>;
}

/// Already-fetched transactions and reservations, as stored in a snapshot
/// file or returned by `fetch`.
#[derive(Debug, Default, Deserialize)]
pub struct Snapshot {
	#[serde(default)]
	pub transactions: Vec<TransactionRecord>,
	#[serde(default)]
	pub reservations: Vec<ReservationRecord>,
}

/// Fetches everything a report over `window` needs: transactions over the
/// window widened for posting drift, and reservations around its start.
pub fn fetch(
	source: &dyn Source,
	property: &str,
	window: &ReportWindow,
) -> Result<Snapshot, Error> {
	let transaction_window = window.widened(POSTING_DRIFT_DAYS);
	let transactions = source
		.transactions(property, &transaction_window)
		.with_context(|| {
			format!("fetching transactions {}", transaction_window)
		})?;

	let reservation_window = window.around_start(RESERVATION_SPAN_DAYS);
	let reservations = source
		.reservations(property, &reservation_window)
		.with_context(|| {
			format!("fetching reservations {}", reservation_window)
		})?;

	tracing::info!(
		property,
		transactions = transactions.len(),
		reservations = reservations.len(),
		"fetched report inputs"
	);

	Ok(Snapshot {
		transactions,
		reservations,
	})
}

/// Serves a snapshot file. The file is taken as already fetched for the
/// requested window, so the window arguments are ignored.
pub struct SnapshotSource {
	snapshot: Snapshot,
}

impl SnapshotSource {
	pub fn open(fs: &Filesystem, file_path: &str) -> Result<Self, Error> {
		let content = fs.read_to_string(file_path)?;
		Self::from_json(&content)
			.with_context(|| format!("failed to parse `{}`", file_path))
	}

	pub fn from_json(content: &str) -> Result<Self, Error> {
		Ok(Self {
			snapshot: serde_json::from_str(content)?,
		})
	}
}

impl Source for SnapshotSource {
	fn transactions(
		&self,
		_property: &str,
		_window: &ReportWindow,
	) -> Result<Vec<TransactionRecord>, Error> {
		Ok(self.snapshot.transactions.clone())
	}

	fn reservations(
		&self,
		_property: &str,
		_window: &ReportWindow,
	) -> Result<Vec<ReservationRecord>, Error> {
		Ok(self.snapshot.reservations.clone())
	}
}
