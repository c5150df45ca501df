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
use crate::tax::bracket::classify;
use crate::tax::record::MergedRecord;
use crate::util::amount::round_cents;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq)]
pub struct HamburgRow {
	pub city_tax_amount: Decimal,
	pub corrected_number_of_guests: i64,
	pub label: &'static str,
}

impl ReportRow for HamburgRow {
	fn cells(&self) -> Vec<Cell> {
		vec![
			Cell::Fixed(self.city_tax_amount),
			Cell::Integer(self.corrected_number_of_guests),
			Cell::Text(self.label.to_string()),
		]
	}
}

/// Guests charged at one per-guest rate. Negative rates come from
/// reversals, and carry a negated guest count.
#[derive(Debug, PartialEq)]
struct RateGroup {
	rate: Decimal,
	guests: i64,
}

/// Counts guests per city tax step. Reversals are netted against charges of
/// the same per-guest magnitude, so a cancelled stay does not count twice.
pub struct HamburgAggregator;

impl HamburgAggregator {
	/// Groups records by their per-guest rate, rounded to cents. Records
	/// without a guest count cannot be given a rate and are skipped.
	fn by_rate(records: &[MergedRecord]) -> Vec<RateGroup> {
		let mut groups: Vec<RateGroup> = Vec::new();
		let mut skipped = 0usize;

		for record in records {
			let adults = match record.adults {
				Some(n) if n > 0 => n,
				_ => {
					skipped += 1;
					continue;
				},
			};

			let rate = round_cents(record.amount / Decimal::from(adults));
			match groups.iter_mut().find(|g| g.rate == rate) {
				Some(g) => g.guests += i64::from(adults),
				None => groups.push(RateGroup {
					rate,
					guests: i64::from(adults),
				}),
			}
		}

		if skipped > 0 {
			tracing::warn!(skipped, "records without a guest count were left out");
		}

		for g in &mut groups {
			if g.rate.is_sign_negative() && !g.rate.is_zero() {
				g.guests = -g.guests;
			}
		}

		groups
	}
}

impl Aggregator for HamburgAggregator {
	type Row = HamburgRow;

	const COLUMNS: &'static [&'static str] =
		&["City Tax Amount", "Corrected # of Guests", "Label"];

	fn aggregate(&self, records: &[MergedRecord]) -> Vec<HamburgRow> {
		// keyed by magnitude; iteration order is the report order
		let mut buckets: BTreeMap<Decimal, i64> = BTreeMap::new();
		for group in HamburgAggregator::by_rate(records) {
			*buckets.entry(group.rate.abs().normalize()).or_insert(0) +=
				group.guests;
		}

		buckets
			.into_iter()
			.map(|(amount, guests)| HamburgRow {
				city_tax_amount: amount,
				corrected_number_of_guests: guests,
				label: classify(amount),
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::NaiveDate;
	use rand::Rng;
	use rust_decimal_macros::dec;

	fn record(amount: Decimal, adults: Option<u32>) -> MergedRecord {
		MergedRecord {
			reference: "R1".to_string(),
			amount,
			date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
			command: "PostCharge".to_string(),
			channel_code: None,
			source: None,
			adults,
			reservation_id: Some("R1".to_string()),
		}
	}

	#[test]
	fn test_reversal_cancels_charge() {
		let records = [
			record(dec!(50), Some(2)),
			record(dec!(-50), Some(2)),
		];

		assert_eq!(
			HamburgAggregator::by_rate(&records),
			vec![
				RateGroup {
					rate: dec!(25),
					guests: 2
				},
				RateGroup {
					rate: dec!(-25),
					guests: -2
				},
			]
		);

		assert_eq!(
			HamburgAggregator.aggregate(&records),
			vec![HamburgRow {
				city_tax_amount: dec!(25),
				corrected_number_of_guests: 0,
				label: "<1250 Euro",
			}]
		);
	}

	#[test]
	fn test_partial_reversal() {
		let rows = HamburgAggregator.aggregate(&[
			record(dec!(6), Some(2)),
			record(dec!(9), Some(3)),
			record(dec!(-3), Some(1)),
		]);
		assert_eq!(rows.len(), 1);
		assert_eq!(rows[0].city_tax_amount, dec!(3));
		assert_eq!(rows[0].corrected_number_of_guests, 4);
		assert_eq!(rows[0].label, "<150 Euro");
	}

	#[test]
	fn test_missing_or_zero_adults_skipped() {
		let rows = HamburgAggregator.aggregate(&[
			record(dec!(4), None),
			record(dec!(4), Some(0)),
			record(dec!(4), Some(1)),
		]);
		assert_eq!(
			rows,
			vec![HamburgRow {
				city_tax_amount: dec!(4),
				corrected_number_of_guests: 1,
				label: "<200 Euro",
			}]
		);
	}

	#[test]
	fn test_rate_rounded_before_grouping() {
		// 10 / 3 rounds to 3.33 and 6.67 / 2 to 3.34; 10.01 / 3 = 3.3366..
		// also rounds to 3.34 and must share that group
		let rows = HamburgAggregator.aggregate(&[
			record(dec!(10), Some(3)),
			record(dec!(6.67), Some(2)),
			record(dec!(10.01), Some(3)),
		]);
		let summary: Vec<(Decimal, i64, &str)> = rows
			.iter()
			.map(|r| {
				(r.city_tax_amount, r.corrected_number_of_guests, r.label)
			})
			.collect();
		assert_eq!(
			summary,
			vec![(dec!(3.33), 3, ""), (dec!(3.34), 5, "")]
		);
	}

	#[test]
	fn test_unlisted_amount_gets_empty_label() {
		let rows = HamburgAggregator.aggregate(&[record(dec!(0.75), Some(3))]);
		assert_eq!(rows[0].city_tax_amount, dec!(0.25));
		assert_eq!(rows[0].label, "");
	}

	#[test]
	fn test_zero_charge() {
		let rows = HamburgAggregator.aggregate(&[
			record(dec!(0), Some(2)),
			record(dec!(-0.00), Some(1)),
		]);
		assert_eq!(rows.len(), 1);
		assert_eq!(rows[0].corrected_number_of_guests, 3);
		assert_eq!(rows[0].label, "<10 Euro");
	}

	#[test]
	fn test_cells() {
		let row = HamburgRow {
			city_tax_amount: dec!(7),
			corrected_number_of_guests: -1,
			label: "<350 Euro",
		};
		let rendered: Vec<String> =
			row.cells().iter().map(|c| c.to_string()).collect();
		assert_eq!(rendered, vec!["7.00", "-1", "<350 Euro"]);
	}

	#[test]
	fn test_rows_strictly_ascending() {
		let mut rng = rand::thread_rng();

		for _ in 0..50 {
			let records: Vec<MergedRecord> = (0..rng.gen_range(1..30))
				.map(|_| {
					let adults: u32 = rng.gen_range(1..5);
					let rate: i64 = rng.gen_range(0..8);
					let mut cents = rate * 100 * i64::from(adults);
					if rng.gen_bool(0.3) {
						cents = -cents;
					}
					record(Decimal::new(cents, 2), Some(adults))
				})
				.collect();

			let rows = HamburgAggregator.aggregate(&records);
			for pair in rows.windows(2) {
				assert!(pair[0].city_tax_amount < pair[1].city_tax_amount);
			}

			// every guest is accounted for, reversals subtracting
			let expected: i64 = records
				.iter()
				.map(|r| {
					let adults = i64::from(r.adults.unwrap());
					if r.amount.is_sign_negative() && !r.amount.is_zero() {
						-adults
					} else {
						adults
					}
				})
				.sum();
			let actual: i64 =
				rows.iter().map(|r| r.corrected_number_of_guests).sum();
			assert_eq!(expected, actual);
		}
	}
}
