//! Entity inputs and persisted records for the append-only tables.
//!
//! Providers, receivers and claims are only ever appended. Food listings have
//! no creation path here; they are read through the snapshot only.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Status every new claim is recorded with.
pub const CLAIM_STATUS_PENDING: &str = "Pending";

/// Column names the engines look up by name.
pub mod columns {
  pub const PROVIDER_ID: &str = "provider_id";
  pub const PROVIDER_TYPE: &str = "provider_type";
  pub const QUANTITY: &str = "quantity";
  pub const LOCATION: &str = "location";
  pub const FOOD_TYPE: &str = "food_type";
  pub const MEAL_TYPE: &str = "meal_type";
  pub const EXPIRY_DATE: &str = "expiry_date";
}

// ─── Providers ───────────────────────────────────────────────────────────────

/// Input for a new provider row. All fields are free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProvider {
  pub name:    String,
  #[serde(rename = "type")]
  pub kind:    String,
  pub address: String,
  pub city:    String,
  pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
  pub provider_id: i64,
  pub name:        String,
  #[serde(rename = "type")]
  pub kind:        String,
  pub address:     String,
  pub city:        String,
  pub contact:     String,
}

impl Provider {
  pub fn from_new(provider_id: i64, input: NewProvider) -> Self {
    Self {
      provider_id,
      name:    input.name,
      kind:    input.kind,
      address: input.address,
      city:    input.city,
      contact: input.contact,
    }
  }
}

// ─── Receivers ───────────────────────────────────────────────────────────────

/// Input for a new receiver row. All fields are free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReceiver {
  pub name:    String,
  #[serde(rename = "type")]
  pub kind:    String,
  pub city:    String,
  pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receiver {
  pub receiver_id: i64,
  pub name:        String,
  #[serde(rename = "type")]
  pub kind:        String,
  pub city:        String,
  pub contact:     String,
}

impl Receiver {
  pub fn from_new(receiver_id: i64, input: NewReceiver) -> Self {
    Self {
      receiver_id,
      name:    input.name,
      kind:    input.kind,
      city:    input.city,
      contact: input.contact,
    }
  }
}

// ─── Claims ──────────────────────────────────────────────────────────────────

/// A validated claim request.
///
/// Both identifiers must be at least 1. Whether they reference existing rows
/// is not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NewClaim {
  food_id:     i64,
  receiver_id: i64,
}

impl NewClaim {
  pub fn new(food_id: i64, receiver_id: i64) -> Result<Self> {
    if food_id < 1 {
      return Err(Error::InvalidInput(format!("food_id must be at least 1, got {food_id}")));
    }
    if receiver_id < 1 {
      return Err(Error::InvalidInput(format!(
        "receiver_id must be at least 1, got {receiver_id}"
      )));
    }
    Ok(Self { food_id, receiver_id })
  }

  pub fn food_id(&self) -> i64 { self.food_id }

  pub fn receiver_id(&self) -> i64 { self.receiver_id }
}

/// A persisted claim. `timestamp` is local wall-clock time at insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
  pub claim_id:    i64,
  pub food_id:     i64,
  pub receiver_id: i64,
  pub status:      String,
  pub timestamp:   NaiveDateTime,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn claim_ids_must_be_positive() {
    assert!(NewClaim::new(3, 7).is_ok());
    assert!(matches!(NewClaim::new(0, 7), Err(Error::InvalidInput(_))));
    assert!(matches!(NewClaim::new(3, 0), Err(Error::InvalidInput(_))));
    assert!(matches!(NewClaim::new(-1, -1), Err(Error::InvalidInput(_))));
  }

  #[test]
  fn provider_kind_serialises_as_type() {
    let json = serde_json::to_value(NewProvider {
      name: "A".into(),
      kind: "Restaurant".into(),
      ..Default::default()
    })
    .unwrap();
    assert_eq!(json["type"], "Restaurant");
  }
}
