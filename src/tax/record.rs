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
use crate::util::amount::deserialize_money;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

/// The ledger command under which city tax charges are posted.
pub const CHARGE_POSTED: &str = "PostCharge";

/// An accounting ledger entry as exported for the city tax account.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
	/// Links to a reservation id or booking id.
	pub reference: String,

	/// Positive for charges, negative for reversals.
	#[serde(deserialize_with = "deserialize_money")]
	pub amount: Decimal,

	pub date: NaiveDate,
	pub command: String,

	#[serde(default)]
	pub channel_code: Option<String>,
	#[serde(default)]
	pub source: Option<String>,
	#[serde(default)]
	pub adults: Option<u32>,
}

impl TransactionRecord {
	pub fn is_charge(&self) -> bool {
		self.command == CHARGE_POSTED
	}
}

/// Booking metadata. Only the fields the reports care about are kept.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRecord {
	pub id: String,
	pub booking_id: String,

	#[serde(default)]
	pub channel_code: Option<String>,
	#[serde(default)]
	pub source: Option<String>,
	#[serde(default)]
	pub adults: Option<u32>,
}

/// A transaction overlaid with the fields of the reservation it references,
/// if one was found. Reservation values win wherever both sides carry one.
#[derive(Clone, Debug, PartialEq)]
pub struct MergedRecord {
	pub reference: String,
	pub amount: Decimal,
	pub date: NaiveDate,
	pub command: String,
	pub channel_code: Option<String>,
	pub source: Option<String>,
	pub adults: Option<u32>,

	/// Id of the matched reservation; None when the join found nothing.
	pub reservation_id: Option<String>,
}

impl MergedRecord {
	pub fn merge(
		transaction: &TransactionRecord,
		reservation: Option<&ReservationRecord>,
	) -> Self {
		let mut out = MergedRecord::from(transaction);

		if let Some(r) = reservation {
			out.channel_code =
				r.channel_code.clone().or(out.channel_code.take());
			out.source = r.source.clone().or(out.source.take());
			out.adults = r.adults.or(out.adults);
			out.reservation_id = Some(r.id.clone());
		}

		out
	}

	/// The channel a record is attributed to: its source when known,
	/// otherwise its channel code.
	pub fn channel(&self) -> Option<&str> {
		self.source.as_deref().or(self.channel_code.as_deref())
	}
}

impl From<&TransactionRecord> for MergedRecord {
	fn from(t: &TransactionRecord) -> Self {
		Self {
			reference: t.reference.clone(),
			amount: t.amount,
			date: t.date,
			command: t.command.clone(),
			channel_code: t.channel_code.clone(),
			source: t.source.clone(),
			adults: t.adults,
			reservation_id: None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rust_decimal_macros::dec;

	fn transaction() -> TransactionRecord {
		TransactionRecord {
			reference: "ABCDEF-1".to_string(),
			amount: dec!(7.50),
			date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
			command: CHARGE_POSTED.to_string(),
			channel_code: Some("Direct".to_string()),
			source: None,
			adults: Some(1),
		}
	}

	#[test]
	fn test_deserialize_transaction() {
		let json = r#"{
			"reference": "ABCDEF-1",
			"amount": { "amount": 7.5, "currency": "EUR" },
			"date": "2024-03-02",
			"command": "PostCharge",
			"channelCode": "Direct",
			"adults": 1
		}"#;
		let t: TransactionRecord = serde_json::from_str(json).unwrap();
		assert_eq!(t, transaction());
		assert!(t.is_charge());
	}

	#[test]
	fn test_deserialize_reservation_without_optionals() {
		let json = r#"{ "id": "ABCDEF-1", "bookingId": "ABCDEF" }"#;
		let r: ReservationRecord = serde_json::from_str(json).unwrap();
		assert_eq!(r.booking_id, "ABCDEF");
		assert_eq!((r.channel_code, r.source, r.adults), (None, None, None));
	}

	#[test]
	fn test_merge_without_reservation_keeps_transaction() {
		let t = transaction();
		let m = MergedRecord::merge(&t, None);
		assert_eq!(m.channel_code.as_deref(), Some("Direct"));
		assert_eq!(m.adults, Some(1));
		assert_eq!(m.reservation_id, None);
	}

	#[test]
	fn test_merge_reservation_overrides() {
		let t = transaction();
		let r = ReservationRecord {
			id: "ABCDEF-1".to_string(),
			booking_id: "ABCDEF".to_string(),
			channel_code: Some("BookingCom".to_string()),
			source: None,
			adults: Some(3),
		};
		let m = MergedRecord::merge(&t, Some(&r));
		assert_eq!(m.channel_code.as_deref(), Some("BookingCom"));
		assert_eq!(m.adults, Some(3));
		assert_eq!(m.amount, dec!(7.50));
		assert_eq!(m.reservation_id.as_deref(), Some("ABCDEF-1"));

		// inputs untouched
		assert_eq!(t, transaction());
	}

	#[test]
	fn test_merge_falls_back_to_transaction_fields() {
		let mut t = transaction();
		t.source = Some("Expedia".to_string());
		let r = ReservationRecord {
			id: "ABCDEF-1".to_string(),
			booking_id: "ABCDEF".to_string(),
			channel_code: None,
			source: None,
			adults: None,
		};
		let m = MergedRecord::merge(&t, Some(&r));
		assert_eq!(m.channel_code.as_deref(), Some("Direct"));
		assert_eq!(m.channel(), Some("Expedia"));
		assert_eq!(m.adults, Some(1));
	}
}
