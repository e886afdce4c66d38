//! Serial number capture from a keyboard-wedge barcode scanner

use std::fmt;

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Scanning,
    Complete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaptureError {
    Empty,
    Duplicate(String),
    Full { expected: usize },
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Empty => write!(f, "Scanned serial number is empty"),
            CaptureError::Duplicate(serial) => {
                write!(f, "Serial number '{}' was already scanned", serial)
            }
            CaptureError::Full { expected } => {
                write!(f, "All {} serial numbers have been captured", expected)
            }
        }
    }
}

impl std::error::Error for CaptureError {}

/// Collects one serial number per unit purchased.
///
/// The scanner types the code followed by Enter. Keystrokes go through
/// [`SerialCapture::feed`]; a line break commits whatever was buffered.
#[derive(Debug, Clone, PartialEq)]
pub struct SerialCapture {
    expected: usize,
    serials: Vec<String>,
    buffer: String,
    state: CaptureState,
}

impl SerialCapture {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            serials: Vec::new(),
            buffer: String::new(),
            state: CaptureState::Idle,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn serials(&self) -> &[String] {
        &self.serials
    }

    pub fn remaining(&self) -> usize {
        self.expected.saturating_sub(self.serials.len())
    }

    /// Start listening for scans.
    pub fn begin(&mut self) {
        if self.state == CaptureState::Idle {
            self.state = if self.remaining() == 0 {
                CaptureState::Complete
            } else {
                CaptureState::Scanning
            };
        }
    }

    /// Feed one keystroke. Returns the new state when a line break committed
    /// a serial.
    pub fn feed(&mut self, key: char) -> Result<Option<CaptureState>, CaptureError> {
        self.begin();
        match key {
            '\n' | '\r' => {
                if self.buffer.trim().is_empty() {
                    self.buffer.clear();
                    return Ok(None);
                }
                let code = std::mem::take(&mut self.buffer);
                self.commit(&code).map(Some)
            }
            _ => {
                self.buffer.push(key);
                Ok(None)
            }
        }
    }

    /// Record one scanned or typed serial number.
    pub fn commit(&mut self, code: &str) -> Result<CaptureState, CaptureError> {
        self.begin();
        let code = code.trim();
        if code.is_empty() {
            return Err(CaptureError::Empty);
        }
        if self.state == CaptureState::Complete {
            return Err(CaptureError::Full {
                expected: self.expected,
            });
        }
        if self.serials.iter().any(|s| s.eq_ignore_ascii_case(code)) {
            return Err(CaptureError::Duplicate(code.to_string()));
        }

        self.serials.push(code.to_string());
        if self.remaining() == 0 {
            self.state = CaptureState::Complete;
        }
        debug!(
            "Captured serial '{}' ({}/{})",
            code,
            self.serials.len(),
            self.expected
        );
        Ok(self.state)
    }

    /// Drop a captured serial, reopening capture if it was complete.
    pub fn remove(&mut self, serial: &str) -> bool {
        let before = self.serials.len();
        self.serials.retain(|s| !s.eq_ignore_ascii_case(serial));
        let removed = self.serials.len() != before;
        if removed && self.state == CaptureState::Complete {
            self.state = CaptureState::Scanning;
        }
        removed
    }

    pub fn reset(&mut self) {
        self.serials.clear();
        self.buffer.clear();
        self.state = CaptureState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(capture: &mut SerialCapture, code: &str) -> Result<Option<CaptureState>, CaptureError> {
        for key in code.chars() {
            capture.feed(key)?;
        }
        capture.feed('\r')
    }

    #[test]
    fn test_scanner_keystrokes_commit_on_enter() {
        let mut capture = SerialCapture::new(2);
        assert_eq!(capture.state(), CaptureState::Idle);
        assert_eq!(scan(&mut capture, "SN-001"), Ok(Some(CaptureState::Scanning)));
        // CRLF scanners send a second, empty line
        assert_eq!(capture.feed('\n'), Ok(None));
        assert_eq!(scan(&mut capture, "SN-002"), Ok(Some(CaptureState::Complete)));
        assert_eq!(capture.serials(), &["SN-001".to_string(), "SN-002".to_string()]);
    }

    #[test]
    fn test_duplicates_rejected() {
        let mut capture = SerialCapture::new(3);
        capture.commit("abc123").unwrap();
        assert_eq!(capture.commit(" ABC123 "), Err(CaptureError::Duplicate("ABC123".to_string())));
        assert_eq!(capture.remaining(), 2);
    }

    #[test]
    fn test_full_and_reopen() {
        let mut capture = SerialCapture::new(1);
        assert_eq!(capture.commit("A"), Ok(CaptureState::Complete));
        assert_eq!(capture.commit("B"), Err(CaptureError::Full { expected: 1 }));
        assert!(capture.remove("a"));
        assert_eq!(capture.state(), CaptureState::Scanning);
        assert_eq!(capture.commit("B"), Ok(CaptureState::Complete));
    }

    #[test]
    fn test_empty_commit() {
        let mut capture = SerialCapture::new(1);
        assert_eq!(capture.commit("   "), Err(CaptureError::Empty));
    }

    #[test]
    fn test_zero_quantity_is_complete() {
        let mut capture = SerialCapture::new(0);
        capture.begin();
        assert_eq!(capture.state(), CaptureState::Complete);
    }

    #[test]
    fn test_reset() {
        let mut capture = SerialCapture::new(2);
        capture.commit("A").unwrap();
        capture.feed('B').unwrap();
        capture.reset();
        assert_eq!(capture.state(), CaptureState::Idle);
        assert!(capture.serials().is_empty());
        assert_eq!(scan(&mut capture, "C"), Ok(Some(CaptureState::Scanning)));
        assert_eq!(capture.serials(), &["C".to_string()]);
    }
}
