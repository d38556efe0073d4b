// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Persistent image status flag.
//!
//! One byte in the INFO segment records where the device is in the image
//! lifecycle. The application posts [`ImageStatus::Download`] and
//! [`ImageStatus::Validated`]; the bootloader posts the other four. Flash
//! bits only move 1 -> 0 without an erase, so every status change is a full
//! copy / erase / rewrite of the segment.

use crate::flash::{EraseMode, FlashController, WriteSession};
use crate::layout::{INFO_SEGMENT_ADDR, INFO_SEGMENT_SIZE, STATUS_FLAG_OFFSET};

/// Image lifecycle status.
///
/// The byte encodings are persisted in the INFO segment, which survives
/// reflashing, so they must stay stable across firmware revisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ImageStatus {
    /// No image activity, nothing to be done.
    None = 0,
    /// New image staged in the download region by the application.
    Download = 1,
    /// Image flashed by the bootloader, waiting for the application to
    /// validate it. Seen at boot, this means validation never happened.
    PendingValidation = 2,
    /// Image validated by the application.
    Validated = 3,
    /// Image restored from the backup region after a failed validation.
    Recovered = 4,
    /// Image rewrite could not be completed.
    FlashingError = 5,
}

impl ImageStatus {
    /// Coerce a raw flag byte. Anything unrecognized (including erased
    /// `0xFF` on a factory-fresh device) reads as `None`, the safest no-op.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            1 => ImageStatus::Download,
            2 => ImageStatus::PendingValidation,
            3 => ImageStatus::Validated,
            4 => ImageStatus::Recovered,
            5 => ImageStatus::FlashingError,
            _ => ImageStatus::None,
        }
    }
}

/// Staging buffer for one INFO segment rewrite.
///
/// Statically sized; the bootloader keeps one in `.bss`, the application
/// provides its own. Whoever holds it hands it to [`set_image_status`] for
/// the duration of the write.
pub struct InfoSegment {
    bytes: [u8; INFO_SEGMENT_SIZE],
}

impl InfoSegment {
    pub const fn new() -> Self {
        InfoSegment {
            bytes: [0xFF; INFO_SEGMENT_SIZE],
        }
    }
}

impl Default for InfoSegment {
    fn default() -> Self {
        Self::new()
    }
}

/// Read the current image status from the INFO segment.
pub fn get_image_status<F: FlashController>(flash: &F) -> ImageStatus {
    ImageStatus::from_byte(flash.read_byte(INFO_SEGMENT_ADDR + STATUS_FLAG_OFFSET))
}

/// Rewrite the INFO segment with `status` in the flag byte, preserving every
/// other byte of the segment.
///
/// Without a staging buffer the write is skipped and `false` is returned;
/// the flag keeps its previous value, which every caller tolerates (each
/// stale status still yields a safe next boot).
pub fn set_image_status<F: FlashController>(
    flash: &mut F,
    scratch: Option<&mut InfoSegment>,
    status: ImageStatus,
) -> bool {
    let Some(seg) = scratch else {
        return false;
    };

    for (i, slot) in seg.bytes.iter_mut().enumerate() {
        *slot = flash.read_byte(INFO_SEGMENT_ADDR + i as u32);
    }
    seg.bytes[STATUS_FLAG_OFFSET as usize] = status as u8;

    flash.erase(INFO_SEGMENT_ADDR, EraseMode::Segment);

    let mut session = WriteSession::begin(flash);
    for (i, byte) in seg.bytes.iter().enumerate() {
        session.write_byte(INFO_SEGMENT_ADDR + i as u32, *byte);
    }

    true
}
