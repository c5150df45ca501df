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
use crate::tax::record::{MergedRecord, ReservationRecord, TransactionRecord};
use std::collections::HashMap;

/// Looks up reservations by the two identifiers a transaction reference can
/// carry. A match on the reservation id always beats a match on the booking
/// id; among several candidates of the same kind the earliest reservation in
/// input order wins.
pub struct ReservationIndex<'a> {
	by_id: HashMap<&'a str, &'a ReservationRecord>,
	by_booking_id: HashMap<&'a str, &'a ReservationRecord>,
}

impl<'a> ReservationIndex<'a> {
	pub fn new(reservations: &'a [ReservationRecord]) -> Self {
		let mut by_id = HashMap::new();
		let mut by_booking_id = HashMap::new();

		for r in reservations {
			by_id.entry(r.id.as_str()).or_insert(r);
			by_booking_id.entry(r.booking_id.as_str()).or_insert(r);
		}

		Self {
			by_id,
			by_booking_id,
		}
	}

	pub fn lookup(&self, reference: &str) -> Option<&'a ReservationRecord> {
		self.by_id
			.get(reference)
			.or_else(|| self.by_booking_id.get(reference))
			.copied()
	}
}

/// Pairs every transaction with the reservation it references, if any.
/// Unmatched transactions pass through with their own fields only.
pub fn join(
	transactions: &[TransactionRecord],
	reservations: &[ReservationRecord],
) -> Vec<MergedRecord> {
	let index = ReservationIndex::new(reservations);
	let mut unmatched = 0usize;

	let out: Vec<MergedRecord> = transactions
		.iter()
		.map(|t| {
			let reservation = index.lookup(&t.reference);
			if reservation.is_none() {
				unmatched += 1;
			}
			MergedRecord::merge(t, reservation)
		})
		.collect();

	if unmatched > 0 {
		tracing::debug!(
			unmatched,
			total = out.len(),
			"transactions without a matching reservation"
		);
	}

	out
}
