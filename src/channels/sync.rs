//! State synchroniser - owns the applied `ChannelState`.
//!
//! On every genuine change all `N` channels are re-driven in ascending
//! order, not just the bits that flipped. With `N <= 32` the extra writes
//! are negligible and a pin can never be left stale by a missed diff.

use super::{ChannelState, OutputDriver, PinBank};

/// Result of one `apply` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncOutcome {
    /// Same as the applied state; no pin was touched.
    Unchanged,
    /// Outputs re-driven. `failed` counts channels whose write errored.
    Applied { failed: u8 },
}

/// Holds the single authoritative applied state and the driver it
/// controls.
pub struct StateSynchronizer<B, const N: usize> {
    driver: OutputDriver<B, N>,
    current: ChannelState,
}

impl<B: PinBank, const N: usize> StateSynchronizer<B, N> {
    /// Starts at `ChannelState::ALL_OFF` without touching any pin; call
    /// `reset_outputs` at boot to put the hardware in the same state.
    pub fn new(driver: OutputDriver<B, N>) -> Self {
        Self {
            driver,
            current: ChannelState::ALL_OFF,
        }
    }

    /// Last applied state.
    pub fn current(&self) -> ChannelState {
        self.current
    }

    /// Drive every channel off and forget the applied state.
    pub fn reset_outputs(&mut self) -> SyncOutcome {
        let failed = self.drive_all(ChannelState::ALL_OFF);
        self.current = ChannelState::ALL_OFF;
        SyncOutcome::Applied { failed }
    }

    /// Apply `new_state` if it differs from the current one.
    ///
    /// Bits at or above `N` are dropped before comparing. The new state is
    /// committed even if some pin writes failed.
    pub fn apply(&mut self, new_state: ChannelState) -> SyncOutcome {
        let new_state = new_state.truncate(N);
        if new_state == self.current {
            trace!("sync: duplicate state {=u32:#x}, skipped", new_state.bits());
            return SyncOutcome::Unchanged;
        }

        info!(
            "sync: {=u32:#x} -> {=u32:#x}",
            self.current.bits(),
            new_state.bits()
        );
        let failed = self.drive_all(new_state);
        self.current = new_state;
        SyncOutcome::Applied { failed }
    }

    fn drive_all(&mut self, state: ChannelState) -> u8 {
        let mut failed = 0u8;
        for channel in 0..N {
            if self.driver.drive(channel, state.is_on(channel)).is_err() {
                warn!("sync: write to channel {} failed", channel);
                failed = failed.saturating_add(1);
            }
        }
        failed
    }

    pub fn driver(&self) -> &OutputDriver<B, N> {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut OutputDriver<B, N> {
        &mut self.driver
    }
}
