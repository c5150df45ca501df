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
use crate::tax::record::TransactionRecord;
use crate::util::date::ReportWindow;

/// Days fetched beyond each end of the report window. Postings for a stay
/// may be dated up to this far from the stay itself.
pub const POSTING_DRIFT_DAYS: u64 = 60;

/// Keeps the posted charges dated inside the report window, in their
/// original order. The input is expected to span the widened window.
pub fn charges_within(
	transactions: &[TransactionRecord],
	window: &ReportWindow,
) -> Vec<TransactionRecord> {
	let out: Vec<TransactionRecord> = transactions
		.iter()
		.filter(|t| t.is_charge() && window.contains(&t.date))
		.cloned()
		.collect();

	tracing::debug!(
		fetched = transactions.len(),
		kept = out.len(),
		"filtered transactions to {}",
		window
	);

	out
}
