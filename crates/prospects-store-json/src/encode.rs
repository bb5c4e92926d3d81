//! Conversion between the prospect collection and its on-disk bytes.
//!
//! The file is a JSON array of prospect records in collection order.

use prospects_core::Prospect;

use crate::Result;

pub(crate) fn encode_people(people: &[Prospect]) -> Result<Vec<u8>> {
  Ok(serde_json::to_vec_pretty(people)?)
}

pub(crate) fn decode_people(bytes: &[u8]) -> Result<Vec<Prospect>> {
  Ok(serde_json::from_slice(bytes)?)
}
