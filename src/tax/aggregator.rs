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
use crate::tax::record::MergedRecord;
use crate::util::amount::to_fixed;
use rust_decimal::Decimal;
use std::fmt;

/// A single value in a report row. The variant decides how it renders.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
	Text(String),
	/// Rendered with exactly two decimal places.
	Fixed(Decimal),
	Integer(i64),
}

impl Cell {
	pub fn is_numeric(&self) -> bool {
		!matches!(self, Cell::Text(_))
	}
}

impl fmt::Display for Cell {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Cell::Text(s) => write!(f, "{}", s),
			Cell::Fixed(d) => write!(f, "{}", to_fixed(*d)),
			Cell::Integer(i) => write!(f, "{}", i),
		}
	}
}

pub trait ReportRow {
	/// Cells in column order.
	fn cells(&self) -> Vec<Cell>;
}

/// The capability every jurisdiction provides: turn joined records into the
/// rows of its report.
pub trait Aggregator {
	type Row: ReportRow;

	/// Column headers, in the order `ReportRow::cells` emits them.
	const COLUMNS: &'static [&'static str];

	fn aggregate(&self, records: &[MergedRecord]) -> Vec<Self::Row>;
}
