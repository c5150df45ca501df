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

use anyhow::{bail, Context, Error};
use chrono::{Days, NaiveDate};
use std::fmt;

/// Parses a string in the "YYYY-mm-dd" format.
pub fn parse_date(date_str: &str) -> Result<NaiveDate, Error> {
	NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
		.with_context(|| format!("Invalid date `{}`, expected YYYY-MM-DD", date_str))
}

/// A closed range of calendar days, both ends inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportWindow {
	start: NaiveDate,
	end: NaiveDate,
}

impl ReportWindow {
	pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, Error> {
		if start > end {
			bail!("Window start {} is after its end {}", start, end);
		}
		Ok(Self { start, end })
	}

	pub fn from_strs(start: &str, end: &str) -> Result<Self, Error> {
		Self::new(parse_date(start)?, parse_date(end)?)
	}

	pub fn start(&self) -> NaiveDate {
		self.start
	}

	pub fn end(&self) -> NaiveDate {
		self.end
	}

	pub fn contains(&self, date: &NaiveDate) -> bool {
		self.start <= *date && *date <= self.end
	}

	/// The window grown by `days` on both sides. Used to fetch postings that
	/// were booked before or after the stay they belong to.
	pub fn widened(&self, days: u64) -> Self {
		Self {
			start: sub_days(self.start, days),
			end: add_days(self.end, days),
		}
	}

	/// A window of `days` either side of the start date.
	pub fn around_start(&self, days: u64) -> Self {
		Self {
			start: sub_days(self.start, days),
			end: add_days(self.start, days),
		}
	}

	/// Start of the first day as an RFC 3339 UTC timestamp.
	pub fn start_timestamp(&self) -> String {
		format!("{}T00:00:00Z", self.start)
	}

	/// End of the last day as an RFC 3339 UTC timestamp.
	pub fn end_timestamp(&self) -> String {
		format!("{}T23:59:59Z", self.end)
	}
}

// saturate at the calendar limits rather than fail; nobody reports on those
fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
	date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

fn sub_days(date: NaiveDate, days: u64) -> NaiveDate {
	date.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

impl fmt::Display for ReportWindow {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "from {} to {}", self.start, self.end)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn date(s: &str) -> NaiveDate {
		parse_date(s).unwrap()
	}

	#[test]
	fn test_parse_rejects_garbage() {
		assert!(parse_date("2024-13-01").is_err());
		assert!(parse_date("2024/01/01").is_err());
		assert!(parse_date("2024-02-30").is_err());
		assert_eq!(date("2024-02-29").to_string(), "2024-02-29");
	}

	#[test]
	fn test_reversed_window() {
		assert!(ReportWindow::from_strs("2024-11-16", "2024-11-15").is_err());
		assert!(ReportWindow::from_strs("2024-11-15", "2024-11-15").is_ok());
	}

	#[test]
	fn test_contains_is_inclusive() {
		let w = ReportWindow::from_strs("2024-11-01", "2024-11-30").unwrap();
		assert!(w.contains(&date("2024-11-01")));
		assert!(w.contains(&date("2024-11-30")));
		assert!(w.contains(&date("2024-11-15")));
		assert!(!w.contains(&date("2024-10-31")));
		assert!(!w.contains(&date("2024-12-01")));
	}

	#[test]
	fn test_widened_crosses_year_boundary() {
		let w = ReportWindow::from_strs("2024-01-15", "2024-01-31").unwrap();
		let wide = w.widened(60);
		assert_eq!(wide.start(), date("2023-11-16"));
		assert_eq!(wide.end(), date("2024-03-31"));
	}

	#[test]
	fn test_around_start() {
		let w = ReportWindow::from_strs("2024-06-01", "2024-06-30").unwrap();
		let r = w.around_start(120);
		assert_eq!(r.start(), date("2024-02-02"));
		assert_eq!(r.end(), date("2024-09-29"));
	}

	#[test]
	fn test_timestamps() {
		let w = ReportWindow::from_strs("2024-06-01", "2024-06-30").unwrap();
		assert_eq!(w.start_timestamp(), "2024-06-01T00:00:00Z");
		assert_eq!(w.end_timestamp(), "2024-06-30T23:59:59Z");
		assert_eq!(w.to_string(), "from 2024-06-01 to 2024-06-30");
	}
}
