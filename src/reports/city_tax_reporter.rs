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
use crate::reports::sink::{ReportHeader, Sink};
use crate::tax::aggregator::{Aggregator, Cell, ReportRow};
use crate::tax::berlin::BerlinAggregator;
use crate::tax::hamburg::HamburgAggregator;
use crate::tax::join::join;
use crate::tax::jurisdiction::Jurisdiction;
use crate::tax::record::{MergedRecord, ReservationRecord, TransactionRecord};
use crate::tax::window::charges_within;
use crate::util::date::ReportWindow;
use anyhow::Error;

/// Holds the charges of one report window, already joined with their
/// reservations, and renders them under the rules of a jurisdiction.
pub struct CityTaxReporter {
	records: Vec<MergedRecord>,
}

impl CityTaxReporter {
	/// `transactions` may span more than `window`; only the charges inside
	/// it are kept.
	pub fn new(
		transactions: &[TransactionRecord],
		reservations: &[ReservationRecord],
		window: &ReportWindow,
	) -> Self {
		let charges = charges_within(transactions, window);
		Self {
			records: join(&charges, reservations),
		}
	}

	pub fn render(
		&self,
		header: &ReportHeader,
		sink: &mut dyn Sink,
	) -> Result<(), Error> {
		match header.jurisdiction {
			Jurisdiction::Berlin => {
				self.render_with(&BerlinAggregator, header, sink)
			},
			Jurisdiction::Hamburg => {
				self.render_with(&HamburgAggregator, header, sink)
			},
		}
	}

	fn render_with<A: Aggregator>(
		&self,
		aggregator: &A,
		header: &ReportHeader,
		sink: &mut dyn Sink,
	) -> Result<(), Error> {
		let rows: Vec<Vec<Cell>> = aggregator
			.aggregate(&self.records)
			.iter()
			.map(|r| r.cells())
			.collect();

		tracing::info!(
			jurisdiction = %header.jurisdiction,
			charges = self.records.len(),
			rows = rows.len(),
			"assembled report"
		);

		sink.write_report(header, A::COLUMNS, &rows)
	}
}
