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
use crate::reports::table::Table;
use crate::tax::aggregator::Cell;
use crate::tax::jurisdiction::Jurisdiction;
use crate::util::date::ReportWindow;
use anyhow::Error;
use std::io::Write;

pub const REPORT_TITLE: &str = "City Tax Report";

/// What a report is about. Rendered above the data by every sink.
#[derive(Clone, Debug)]
pub struct ReportHeader {
	pub jurisdiction: Jurisdiction,
	pub property: String,
	pub window: ReportWindow,
	/// When the report was produced, already formatted for display.
	pub executed: String,
}

impl ReportHeader {
	pub fn lines(&self) -> [String; 3] {
		[
			REPORT_TITLE.to_string(),
			format!("for property {} {}", self.property, self.window),
			format!("Executed: {}", self.executed),
		]
	}

	/// A name unique per city, property and end date; used for output files.
	pub fn name(&self) -> String {
		format!(
			"citytax_{}_{}_{}",
			self.jurisdiction,
			self.property,
			self.window.end()
		)
	}
}

/// Accepts a finished report: header, column titles and data block.
pub trait Sink {
	fn write_report(
		&mut self,
		header: &ReportHeader,
		columns: &[&str],
		rows: &[Vec<Cell>],
	) -> Result<(), Error>;
}

/// Human-readable aligned table.
pub struct TableSink<W: Write> {
	out: W,
}

impl<W: Write> TableSink<W> {
	pub fn new(out: W) -> Self {
		Self { out }
	}

	pub fn into_inner(self) -> W {
		self.out
	}
}

impl<W: Write> Sink for TableSink<W> {
	fn write_report(
		&mut self,
		header: &ReportHeader,
		columns: &[&str],
		rows: &[Vec<Cell>],
	) -> Result<(), Error> {
		for line in header.lines() {
			writeln!(self.out, "{}", line)?;
		}
		writeln!(self.out)?;

		let mut table = Table::new(columns.len());
		if let Some(first) = rows.first() {
			table.right_align(
				first
					.iter()
					.enumerate()
					.filter(|(_, c)| c.is_numeric())
					.map(|(i, _)| i)
					.collect(),
			);
		}

		table.add_header(columns.to_vec());
		table.add_separator();
		for row in rows {
			table.add_row(row.iter().map(|c| c.to_string()).collect());
		}

		write!(self.out, "{}", table.render())?;
		if rows.is_empty() {
			writeln!(self.out, "No data")?;
		}

		Ok(())
	}
}

/// Tab-separated output for spreadsheets. Header lines are written as
/// `#` comments.
pub struct TsvSink<W: Write> {
	out: W,
}

impl<W: Write> TsvSink<W> {
	pub fn new(out: W) -> Self {
		Self { out }
	}

	pub fn into_inner(self) -> W {
		self.out
	}
}

impl<W: Write> Sink for TsvSink<W> {
	fn write_report(
		&mut self,
		header: &ReportHeader,
		columns: &[&str],
		rows: &[Vec<Cell>],
	) -> Result<(), Error> {
		for line in header.lines() {
			writeln!(self.out, "# {}", line)?;
		}

		writeln!(self.out, "{}", columns.join("\t"))?;
		for row in rows {
			let fields: Vec<String> =
				row.iter().map(|c| c.to_string().replace('\t', " ")).collect();
			writeln!(self.out, "{}", fields.join("\t"))?;
		}

		Ok(())
	}
}
