//! Conversions between SQLite values and dashboard types.
//!
//! Claim timestamps are stored as naive local time text with microsecond
//! precision, e.g. `2024-05-01 13:45:07.123456`.

use chrono::NaiveDateTime;
use foodshare_core::table::Cell;
use rusqlite::types::ValueRef;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

pub fn encode_timestamp(ts: NaiveDateTime) -> String { ts.format(TIMESTAMP_FORMAT).to_string() }

pub fn decode_value(value: ValueRef<'_>) -> Cell {
  match value {
    ValueRef::Null => Cell::Null,
    ValueRef::Integer(i) => Cell::Integer(i),
    ValueRef::Real(r) => Cell::Real(r),
    ValueRef::Text(t) => Cell::Text(String::from_utf8_lossy(t).into_owned()),
    ValueRef::Blob(b) => Cell::Blob(b.to_vec()),
  }
}
