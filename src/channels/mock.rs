//! Recording pin bank for host tests.

use super::{PinBank, PinId};

/// Write rejected by the mock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinFault(pub u8);

/// Remembers every write and the last level of each slot.
pub struct RecordingBank {
    pub writes: Vec<(u8, bool)>,
    pub levels: Vec<Option<bool>>,
    /// Slot that refuses writes, for error-path tests.
    pub fail_on: Option<u8>,
}

impl RecordingBank {
    pub fn new(pin_count: usize) -> Self {
        Self {
            writes: Vec::new(),
            levels: vec![None; pin_count],
            fail_on: None,
        }
    }

    pub fn level(&self, pin: u8) -> Option<bool> {
        self.levels.get(usize::from(pin)).copied().flatten()
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }
}

impl PinBank for RecordingBank {
    type Error = PinFault;

    fn pin_count(&self) -> usize {
        self.levels.len()
    }

    fn set_level(&mut self, pin: PinId, high: bool) -> Result<(), PinFault> {
        if self.fail_on == Some(pin.raw()) {
            return Err(PinFault(pin.raw()));
        }
        self.writes.push((pin.raw(), high));
        self.levels[pin.index()] = Some(high);
        Ok(())
    }
}
