use crate::distance::Reading;
use crate::indicator::Tier;
use core::fmt::{self, Write as _};
use std::io::Write;

// Longest line is well below this: raw (4), voltage (5), distance (4), label (22)
const STATUS_LINE_LEN: usize = 96;

pub const BANNER: [&str; 2] = [
    "GP2Y0A21YK distance sensor + LED indicator test started",
    "Reading the sensor on GPIO1 and showing the distance on the LED",
];

/// Everything reported for one loop iteration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StatusReport {
    pub reading: Reading,
    pub tier: Tier,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Raw ADC: {}, Voltage: {:.3}V, Distance: {:.1} cm - LED: {}",
            self.reading.raw,
            self.reading.voltage,
            self.reading.distance_cm,
            self.tier.label()
        )
    }
}

impl StatusReport {
    pub fn to_line(&self) -> Result<heapless::String<STATUS_LINE_LEN>, fmt::Error> {
        let mut line = heapless::String::new();
        write!(line, "{}", self)?;
        Ok(line)
    }
}

/// Writes the human readable status stream. A reporter for a channel
/// that never came up swallows everything.
pub struct Reporter<W: Write> {
    out: W,
    enabled: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, enabled: bool) -> Self {
        Reporter { out, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn banner(&mut self) {
        for line in BANNER {
            self.write_line(line);
        }
    }

    pub fn report(&mut self, report: &StatusReport) {
        match report.to_line() {
            Ok(line) => self.write_line(&line),
            Err(_) => log::warn!("status line does not fit {} bytes", STATUS_LINE_LEN),
        }
    }

    fn write_line(&mut self, line: &str) {
        if !self.enabled {
            return;
        }
        // best effort, the host may go away at any time
        let _ = self
            .out
            .write_all(line.as_bytes())
            .and_then(|_| self.out.write_all(b"\n"))
            .and_then(|_| self.out.flush());
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}
