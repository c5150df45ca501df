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
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

/// Decimal places every reported amount is rounded to.
pub const REPORT_PRECISION: u32 = 2;

/// Monetary value as the accounting export nests it. The currency is
/// always the property's own and is not kept.
#[derive(Deserialize)]
struct Money {
	amount: Decimal,
}

/// Reads `{"amount": 1.5, "currency": "EUR"}` into its decimal amount.
pub fn deserialize_money<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
	D: serde::Deserializer<'de>,
{
	Money::deserialize(deserializer).map(|m| m.amount)
}

/// Rounds to report precision, half away from zero. Zero is always
/// returned unsigned.
pub fn round_cents(value: Decimal) -> Decimal {
	let rounded = value.round_dp_with_strategy(
		REPORT_PRECISION,
		RoundingStrategy::MidpointAwayFromZero,
	);
	if rounded.is_zero() {
		Decimal::ZERO
	} else {
		rounded
	}
}

/// Renders with exactly `REPORT_PRECISION` decimal places.
pub fn to_fixed(value: Decimal) -> String {
	let mut out = round_cents(value);
	out.rescale(REPORT_PRECISION);
	out.to_string()
}
