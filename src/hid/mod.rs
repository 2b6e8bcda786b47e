//! HID wire contract: descriptors and output report decoding.

pub mod descriptors;
pub mod report;


pub use descriptors::{descriptor, string_descriptor, Descriptor, DescriptorKind};
pub use report::{FrameLayout, OutputReport, ReportDecoder};
