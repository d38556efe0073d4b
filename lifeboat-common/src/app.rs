// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Status operations for the running application.
//!
//! The bootloader owns four of the six status values; these are the two the
//! application posts. The application links against this crate with its own
//! flash controller binding and keeps its own [`InfoSegment`] buffer.

use crate::flash::FlashController;
use crate::status::{set_image_status, ImageStatus, InfoSegment};

/// Mark the currently running image as good.
///
/// Must be called once the application has started up successfully, within
/// its first run after a reflash: a reset before this lands makes the
/// bootloader treat the activation as failed and roll back to the backup
/// image.
///
/// Returns `false` if the status write was skipped.
pub fn confirm_image<F: FlashController>(flash: &mut F, scratch: &mut InfoSegment) -> bool {
    set_image_status(flash, Some(scratch), ImageStatus::Validated)
}

/// Announce a fully staged image in the download region.
///
/// The application calls this after writing the new image to the download
/// region, then issues a soft reset; the bootloader picks the image up on
/// the next pass.
///
/// Returns `false` if the status write was skipped.
pub fn submit_download<F: FlashController>(flash: &mut F, scratch: &mut InfoSegment) -> bool {
    set_image_status(flash, Some(scratch), ImageStatus::Download)
}
