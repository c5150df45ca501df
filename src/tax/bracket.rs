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
use rust_decimal::Decimal;

/// One step of the Hamburg disclosure table: the per-guest tax that applies
/// to stays priced between `from` and `to` Euro.
#[derive(Clone, Copy, Debug)]
pub struct BracketEntry {
	pub tax: Decimal,
	pub from: u32,
	pub to: u32,
	pub label: &'static str,
}

const fn entry(
	tax_cents: u32,
	from: u32,
	to: u32,
	label: &'static str,
) -> BracketEntry {
	BracketEntry {
		tax: Decimal::from_parts(tax_cents, 0, 0, false, 2),
		from,
		to,
		label,
	}
}

pub const BRACKETS: [BracketEntry; 27] = [
	entry(0, 0, 10, "<10 Euro"),
	entry(50, 11, 25, "<25 Euro"),
	entry(100, 26, 50, "<50 Euro"),
	entry(200, 51, 100, "<100 Euro"),
	entry(300, 101, 150, "<150 Euro"),
	entry(400, 151, 200, "<200 Euro"),
	entry(500, 201, 250, "<250 Euro"),
	entry(600, 251, 300, "<300 Euro"),
	entry(700, 301, 350, "<350 Euro"),
	entry(800, 351, 400, "<400 Euro"),
	entry(900, 401, 450, "<450 Euro"),
	entry(1000, 451, 500, "<500 Euro"),
	entry(1100, 501, 550, "<550 Euro"),
	entry(1200, 551, 600, "<600 Euro"),
	entry(1300, 601, 650, "<650 Euro"),
	entry(1400, 651, 700, "<700 Euro"),
	entry(1500, 701, 750, "<750 Euro"),
	entry(1600, 751, 800, "<800 Euro"),
	entry(1700, 801, 850, "<850 Euro"),
	entry(1800, 851, 900, "<900 Euro"),
	entry(1900, 901, 950, "<950 Euro"),
	entry(2000, 951, 1000, "<1000 Euro"),
	entry(2100, 1001, 1050, "<1050 Euro"),
	entry(2200, 1051, 1100, "<1100 Euro"),
	entry(2300, 1101, 1150, "<1150 Euro"),
	entry(2400, 1151, 1200, "<1200 Euro"),
	entry(2500, 1201, 1250, "<1250 Euro"),
];

/// Label of the bracket whose tax is exactly `amount`, or "" if there is
/// none. The `from`/`to` bounds do not take part in the lookup.
pub fn classify(amount: Decimal) -> &'static str {
	BRACKETS
		.iter()
		.find(|b| b.tax == amount)
		.map(|b| b.label)
		.unwrap_or("")
}

#[cfg(test)]
mod tests {
	use super::*;
	use rust_decimal_macros::dec;

	#[test]
	fn test_exact_matches() {
		assert_eq!(classify(dec!(7)), "<350 Euro");
		assert_eq!(classify(dec!(0)), "<10 Euro");
		assert_eq!(classify(dec!(0.5)), "<25 Euro");
		assert_eq!(classify(dec!(25.00)), "<1250 Euro");
	}

	#[test]
	fn test_no_range_lookup() {
		assert_eq!(classify(dec!(0.25)), "");
		assert_eq!(classify(dec!(7.01)), "");
		assert_eq!(classify(dec!(26)), "");
		assert_eq!(classify(dec!(-7)), "");
	}

	#[test]
	fn test_table_is_ordered_and_contiguous() {
		for pair in BRACKETS.windows(2) {
			assert!(pair[0].tax < pair[1].tax);
			assert_eq!(pair[0].to + 1, pair[1].from);
		}
		assert_eq!(BRACKETS[0].from, 0);
		assert_eq!(BRACKETS[26].to, 1250);
	}
}
