//! Decoding of QR scan payloads.
//!
//! A payload is two lines: the contact's name, then their email address.

use crate::prospect::Prospect;

/// Payloads used in place of a camera scan.
pub const SAMPLE_PAYLOADS: [&str; 3] = [
  "Paul Hudson\npaul@hackingwithswift.com",
  "John Bright\nbright@example.com",
  "Marry Heaven\nmarry@example.com",
];

/// Build a prospect from `payload`, or `None` unless it has exactly two
/// newline-separated lines. Lines are taken verbatim.
pub fn parse(payload: &str) -> Option<Prospect> {
  let mut lines = payload.split('\n');
  let (Some(name), Some(email), None) = (lines.next(), lines.next(), lines.next()) else {
    tracing::debug!(lines = payload.split('\n').count(), "discarding scan payload");
    return None;
  };
  Some(Prospect::new(name, email))
}
