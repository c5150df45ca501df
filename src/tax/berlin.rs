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
use crate::tax::aggregator::{Aggregator, Cell, ReportRow};
use crate::tax::record::MergedRecord;
use crate::util::amount::round_cents;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Share of the VAT-inclusive city tax that is reported excluding VAT.
const TAX_WITHOUT_VAT_PERCENT: Decimal = Decimal::from_parts(93, 0, 0, false, 0);

/// City tax as a percentage of net accommodation revenue.
const TAX_RATE_PERCENT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Grouping key for records that carry neither a source nor a channel code.
pub const UNKNOWN_CHANNEL: &str = "Unknown";

#[derive(Clone, Debug, PartialEq)]
pub struct BerlinRow {
	pub channel_code: String,
	pub city_tax_without_vat: Decimal,
	pub city_tax_with_vat: Decimal,
	pub net_accommodation_revenue: Decimal,
}

impl BerlinRow {
	fn from_total(channel_code: String, total_without_vat: Decimal) -> Self {
		let with_vat =
			total_without_vat / TAX_WITHOUT_VAT_PERCENT * Decimal::ONE_HUNDRED;
		let revenue = with_vat / TAX_RATE_PERCENT * Decimal::ONE_HUNDRED;

		Self {
			channel_code,
			city_tax_without_vat: round_cents(total_without_vat),
			city_tax_with_vat: round_cents(with_vat),
			net_accommodation_revenue: round_cents(revenue),
		}
	}
}

impl ReportRow for BerlinRow {
	fn cells(&self) -> Vec<Cell> {
		vec![
			Cell::Text(self.channel_code.clone()),
			Cell::Fixed(self.city_tax_without_vat),
			Cell::Fixed(self.city_tax_with_vat),
			Cell::Fixed(self.net_accommodation_revenue),
		]
	}
}

/// Sums city tax per distribution channel and derives the VAT-inclusive tax
/// and the net accommodation revenue it implies. Channels are reported in
/// the order they are first seen.
pub struct BerlinAggregator;

impl Aggregator for BerlinAggregator {
	type Row = BerlinRow;

	const COLUMNS: &'static [&'static str] = &[
		"Channel Source",
		"City Tax excl. VAT",
		"City Tax Incl. VAT",
		"Net accommodation revenue",
	];

	fn aggregate(&self, records: &[MergedRecord]) -> Vec<BerlinRow> {
		let mut totals: Vec<(String, Decimal)> = Vec::new();
		let mut positions: HashMap<&str, usize> = HashMap::new();

		for record in records {
			let key = record.channel().unwrap_or(UNKNOWN_CHANNEL);
			match positions.get(key) {
				Some(&i) => totals[i].1 += record.amount,
				None => {
					positions.insert(key, totals.len());
					totals.push((key.to_string(), record.amount));
				},
			}
		}

		totals
			.into_iter()
			.map(|(channel, total)| BerlinRow::from_total(channel, total))
			.collect()
	}
}
