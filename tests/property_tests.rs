//! Property-based tests for report decoding and state synchronisation.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, OutputPin};
use pacdrive::channels::sync::SyncOutcome;
use pacdrive::hid::{FrameLayout, ReportDecoder};
use pacdrive::{ChannelMap, ChannelState, Error, OutputDriver, PacDrive, Polarity};
use proptest::prelude::*;

type Levels = Rc<RefCell<[Option<bool>; 16]>>;

struct Pin {
    id: usize,
    levels: Levels,
    writes: Rc<RefCell<usize>>,
}

impl ErrorType for Pin {
    type Error = Infallible;
}

impl OutputPin for Pin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.levels.borrow_mut()[self.id] = Some(false);
        *self.writes.borrow_mut() += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.levels.borrow_mut()[self.id] = Some(true);
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}

struct Rig {
    device: PacDrive<[Pin; 16], 16>,
    levels: Levels,
    writes: Rc<RefCell<usize>>,
}

fn rig() -> Rig {
    let levels = Levels::default();
    let writes = Rc::new(RefCell::new(0));
    let bank = std::array::from_fn(|id| Pin {
        id,
        levels: Rc::clone(&levels),
        writes: Rc::clone(&writes),
    });
    let map = ChannelMap::new(std::array::from_fn(|i| Some(i as u8)), 16).unwrap();
    let driver = OutputDriver::new(map, bank, Polarity::ActiveHigh).unwrap();
    let mut device = PacDrive::new(FrameLayout::PACDRIVE, driver).unwrap();
    device.power_on();
    *writes.borrow_mut() = 0;
    Rig {
        device,
        levels,
        writes,
    }
}

proptest! {
    #[test]
    fn mask_is_big_endian_bytes_two_and_three(frame in any::<[u8; 4]>()) {
        let report = ReportDecoder::new(FrameLayout::PACDRIVE).decode(&frame).unwrap();
        let expected = (u32::from(frame[2]) << 8) | u32::from(frame[3]);
        prop_assert_eq!(report.state.bits(), expected);
        prop_assert_eq!(report.reserved, &frame[..2]);
    }

    #[test]
    fn wrong_length_is_malformed(frame in prop::collection::vec(any::<u8>(), 0..64)) {
        prop_assume!(frame.len() != 4);
        let result = ReportDecoder::new(FrameLayout::PACDRIVE).decode(&frame);
        let is_malformed = matches!(
            result,
            Err(Error::MalformedReport { expected_len: 4, actual_len, .. }) if actual_len == frame.len()
        );
        prop_assert!(is_malformed);
    }

    #[test]
    fn pins_follow_mask(masks in prop::collection::vec(any::<u16>(), 1..16)) {
        let mut rig = rig();
        for mask in masks {
            let [hi, lo] = mask.to_be_bytes();
            rig.device.handle_output_report(0, &[0, 0, hi, lo]).unwrap();
            prop_assert_eq!(rig.device.current().bits(), u32::from(mask));

            let levels = *rig.levels.borrow();
            for (ch, level) in levels.iter().enumerate() {
                prop_assert_eq!(*level, Some(mask & (1 << ch) != 0), "channel {}", ch);
            }
        }
    }

    #[test]
    fn same_mask_twice_is_idempotent(mask in any::<u16>(), reserved in any::<[u8; 2]>()) {
        let mut rig = rig();
        let [hi, lo] = mask.to_be_bytes();
        rig.device.handle_output_report(0, &[0, 0, hi, lo]).unwrap();
        let before = *rig.writes.borrow();

        let outcome = rig
            .device
            .handle_output_report(0, &[reserved[0], reserved[1], hi, lo])
            .unwrap();
        prop_assert_eq!(outcome, SyncOutcome::Unchanged);
        prop_assert_eq!(*rig.writes.borrow(), before);
    }

    #[test]
    fn malformed_frame_keeps_state(
        mask in any::<u16>(),
        bad in prop::collection::vec(any::<u8>(), 0..16),
    ) {
        prop_assume!(bad.len() != 4);
        let mut rig = rig();
        let [hi, lo] = mask.to_be_bytes();
        rig.device.handle_output_report(0, &[0, 0, hi, lo]).unwrap();
        let before = *rig.writes.borrow();

        prop_assert!(rig.device.handle_output_report(0, &bad).is_err());
        prop_assert_eq!(rig.device.current(), ChannelState::from_bits(u32::from(mask)));
        prop_assert_eq!(*rig.writes.borrow(), before);
    }
}
