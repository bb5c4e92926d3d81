//! Scan input sources. There is no camera here: payloads come from the
//! command line, stdin, or a simulated scan.

use std::io::Read as _;

use anyhow::Context as _;
use prospects_core::scan::SAMPLE_PAYLOADS;
use rand_core::{OsRng, RngCore as _};

/// One of the sample payloads, picked uniformly at random.
pub fn simulated_payload() -> &'static str {
  let index = OsRng.next_u32() as usize % SAMPLE_PAYLOADS.len();
  SAMPLE_PAYLOADS[index]
}

/// Read a whole payload from stdin. A single trailing line ending is removed
/// so `echo` output scans the same as a QR code.
pub fn read_stdin_payload() -> anyhow::Result<String> {
  let mut raw = String::new();
  std::io::stdin()
    .read_to_string(&mut raw)
    .context("reading scan payload from stdin")?;
  Ok(strip_line_ending(&raw).to_owned())
}

fn strip_line_ending(raw: &str) -> &str {
  raw
    .strip_suffix("\r\n")
    .or_else(|| raw.strip_suffix('\n'))
    .unwrap_or(raw)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn simulated_payload_is_a_sample() {
    for _ in 0..20 {
      assert!(SAMPLE_PAYLOADS.contains(&simulated_payload()));
    }
  }

  #[test]
  fn strips_one_line_ending() {
    assert_eq!(strip_line_ending("a\nb\n"), "a\nb");
    assert_eq!(strip_line_ending("a\nb\r\n"), "a\nb");
    assert_eq!(strip_line_ending("a\nb\n\n"), "a\nb\n");
    assert_eq!(strip_line_ending("a\nb"), "a\nb");
  }
}
