//! PacDrive device logic, independent of any USB stack.
//!
//! The transport adapter forwards HID class requests here:
//! `SET_REPORT` / OUT data go through `handle_output_report`,
//! `GET_REPORT` through `input_report`. Each report is fully decoded,
//! compared and driven before the call returns.

use crate::channels::sync::SyncOutcome;
use crate::channels::{ChannelState, OutputDriver, PinBank, StateSynchronizer};
use crate::error::{ConfigError, Error, Result};
use crate::hid::report::{FrameLayout, ReportDecoder};

/// Decoder plus synchroniser for an `N`-channel device.
pub struct PacDrive<B, const N: usize> {
    decoder: ReportDecoder,
    sync: StateSynchronizer<B, N>,
}

impl<B: PinBank, const N: usize> PacDrive<B, N> {
    /// Fails if `layout` has fewer mask bits than there are channels.
    pub fn new(layout: FrameLayout, driver: OutputDriver<B, N>) -> Result<Self> {
        if layout.channel_capacity() < N {
            return Err(ConfigError::LayoutTooNarrow {
                channels: N,
                capacity: layout.channel_capacity(),
            }
            .into());
        }
        Ok(Self {
            decoder: ReportDecoder::new(layout),
            sync: StateSynchronizer::new(driver),
        })
    }

    /// Put every output in the OFF state. Called once at boot.
    pub fn power_on(&mut self) {
        if let SyncOutcome::Applied { failed } = self.sync.reset_outputs() {
            if failed > 0 {
                warn!("power-on: {} channel(s) could not be driven off", failed);
            }
        }
        info!("outputs reset, {} channel(s) mapped", self.mapped_channels());
    }

    /// Handle one output report from the host.
    ///
    /// A malformed frame is logged and returned as an error with nothing
    /// applied; the device carries on with the next report.
    pub fn handle_output_report(&mut self, report_id: u8, data: &[u8]) -> Result<SyncOutcome> {
        let report = match self.decoder.decode(data) {
            Ok(report) => report,
            Err(e) => {
                warn!(
                    "UNKN: report id {} len {} bytes {=[u8]:x}",
                    report_id,
                    data.len(),
                    data
                );
                return Err(e);
            }
        };

        debug!("report: {=[u8]:x}", data);
        Ok(self.sync.apply(report.state))
    }

    /// Answer a `GET_REPORT`. There is no input data, so this is always
    /// `None` and the stack stalls the request.
    pub fn input_report(&mut self, report_id: u8, _buf: &mut [u8]) -> Option<usize> {
        debug!("GET_REPORT id {} not supported", report_id);
        None
    }

    /// State currently driven onto the pins.
    pub fn current(&self) -> ChannelState {
        self.sync.current()
    }

    pub fn layout(&self) -> FrameLayout {
        self.decoder.layout()
    }

    pub fn mapped_channels(&self) -> usize {
        self.sync.driver().map().mapped_count()
    }

    pub fn synchronizer(&self) -> &StateSynchronizer<B, N> {
        &self.sync
    }

    pub fn synchronizer_mut(&mut self) -> &mut StateSynchronizer<B, N> {
        &mut self.sync
    }
}

/// `true` if `err` came from a bad frame rather than bad configuration.
pub fn is_report_error(err: &Error) -> bool {
    matches!(err, Error::MalformedReport { .. })
}
