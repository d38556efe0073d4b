// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Image-copy engine: the reflash and recover flash-rewrite procedures.
//!
//! Both procedures rewrite the PROGRAM region, and the bootloader itself
//! executes out of the same bank, so on the target every function in this
//! module is placed in the `.data` output section: loaded from flash,
//! copied to RAM by the startup code, and executed from RAM. While the
//! program bank is being erased or written, no instruction and no constant
//! may be fetched from it, so [`Region`] descriptors and the snapshotted
//! reset vector travel by value, in registers or on the stack. On the host
//! the section attribute is compiled out and the same code runs against the
//! simulated controller.
//!
//! The hardware reset vector is the one word never copied verbatim into
//! PROGRAM: it must point at the bootloader's entry whenever a reset can
//! occur. The incoming image's entry is diverted to
//! [`APP_RESET_VECTOR_ADDR`] instead, and the bootloader entry is written
//! back immediately after the erase, before anything else touches the
//! region.

use crate::flash::{erase_verify, segments_for, EraseMode, FlashController, WriteSession};
use crate::layout::{
    Region, APP_RESET_VECTOR_ADDR, APP_SIZE, BACKUP, DOWNLOAD, HW_RESET_VECTOR_ADDR,
    IMAGE_TOTAL_SIZE, PROGRAM, SEGMENT_SIZE,
};

/// Image rewrite failure. The controller gives no per-write error
/// reporting; both variants come from readback checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// A region did not read back all-0xFF after an erase.
    EraseVerify,
    /// A written word did not read back as its source.
    WriteVerify,
}

pub type Result<T> = core::result::Result<T, FlashError>;

/// How the reset-vector word is treated while copying a vector table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ResetVectorRule {
    /// Copying PROGRAM out to BACKUP: the source's hardware reset vector
    /// holds the bootloader entry, so the backup's slot gets the old
    /// application entry from `APP_RESET_VECTOR_ADDR` instead. This word is
    /// not readback-verified; source and destination never match here.
    PreserveAppEntry,
    /// Copying an image in over PROGRAM: the incoming entry is written to
    /// `APP_RESET_VECTOR_ADDR`; the hardware slot already holds the
    /// bootloader entry, restored right after the erase.
    RedirectAppEntry,
}

/// Install the downloaded image, keeping a rollback copy of the current one.
///
/// Backs up PROGRAM into BACKUP (bank erase, word copy with verify, vector
/// table with the preserve rule), then rewrites PROGRAM from DOWNLOAD.
/// The controller is locked again on every exit.
#[cfg_attr(target_os = "none", link_section = ".data")]
#[inline(never)]
pub fn reflash<F: FlashController>(flash: &mut F) -> Result<()> {
    let boot_vector = flash.read_word(HW_RESET_VECTOR_ADDR);

    flash.erase(BACKUP.app_start, EraseMode::Bank);
    if !erase_verify(flash, BACKUP.app_start, IMAGE_TOTAL_SIZE) {
        return Err(FlashError::EraseVerify);
    }

    copy_with_verify(flash, PROGRAM.app_start, BACKUP.app_start, APP_SIZE)?;
    copy_vector_table(flash, PROGRAM, BACKUP, ResetVectorRule::PreserveAppEntry)?;

    rewrite_program(flash, DOWNLOAD, boot_vector)
}

/// Restore the image saved in BACKUP after a failed activation.
///
/// No backup is taken first; there is no older image left to preserve.
#[cfg_attr(target_os = "none", link_section = ".data")]
#[inline(never)]
pub fn recover<F: FlashController>(flash: &mut F) -> Result<()> {
    let boot_vector = flash.read_word(HW_RESET_VECTOR_ADDR);

    rewrite_program(flash, BACKUP, boot_vector)
}

/// Erase the PROGRAM region and copy the image at `src` into it.
///
/// The erase wipes the hardware reset vector along with everything else, so
/// `boot_vector` (snapshotted before any erase) is written back as the very
/// first word after the erase check. Only then is the rest of the image
/// copied in.
#[cfg_attr(target_os = "none", link_section = ".data")]
#[inline(never)]
fn rewrite_program<F: FlashController>(
    flash: &mut F,
    src: Region,
    boot_vector: u16,
) -> Result<()> {
    let span = PROGRAM.erase_span();
    let mut seg = 0;
    while seg < segments_for(span) {
        flash.erase(PROGRAM.app_start + seg * SEGMENT_SIZE, EraseMode::Segment);
        seg += 1;
    }
    if !erase_verify(flash, PROGRAM.app_start, span) {
        return Err(FlashError::EraseVerify);
    }

    {
        let mut session = WriteSession::begin(flash);
        session.write_word(HW_RESET_VECTOR_ADDR, boot_vector);
    }

    copy_with_verify(flash, src.app_start, PROGRAM.app_start, APP_SIZE)?;
    copy_vector_table(flash, src, PROGRAM, ResetVectorRule::RedirectAppEntry)
}

/// Word-granular copy with inline readback verify.
///
/// `dst` must be erased. `n_bytes` is even; images are word-aligned.
#[cfg_attr(target_os = "none", link_section = ".data")]
#[inline(never)]
fn copy_with_verify<F: FlashController>(
    flash: &mut F,
    src: u32,
    dst: u32,
    n_bytes: u32,
) -> Result<()> {
    let mut session = WriteSession::begin(flash);
    let mut offset = 0;
    while offset < n_bytes {
        let word = session.read_word(src + offset);
        session.write_word(dst + offset, word);
        if session.read_word(src + offset) != session.read_word(dst + offset) {
            return Err(FlashError::WriteVerify);
        }
        offset += 2;
    }
    Ok(())
}

/// Copy a vector table word by word, treating the reset-vector word
/// according to `rule`.
#[cfg_attr(target_os = "none", link_section = ".data")]
#[inline(never)]
fn copy_vector_table<F: FlashController>(
    flash: &mut F,
    src: Region,
    dst: Region,
    rule: ResetVectorRule,
) -> Result<()> {
    let mut session = WriteSession::begin(flash);
    let mut src_addr = src.vect_start;
    let mut dst_addr = dst.vect_start;
    while src_addr < src.vect_end() {
        match rule {
            ResetVectorRule::PreserveAppEntry if src_addr == HW_RESET_VECTOR_ADDR => {
                let old_entry = session.read_word(APP_RESET_VECTOR_ADDR);
                session.write_word(dst_addr, old_entry);
            }
            ResetVectorRule::RedirectAppEntry if dst_addr == HW_RESET_VECTOR_ADDR => {
                let entry = session.read_word(src_addr);
                session.write_word(APP_RESET_VECTOR_ADDR, entry);
                if session.read_word(src_addr) != session.read_word(APP_RESET_VECTOR_ADDR) {
                    return Err(FlashError::WriteVerify);
                }
            }
            _ => {
                let word = session.read_word(src_addr);
                session.write_word(dst_addr, word);
                if session.read_word(src_addr) != session.read_word(dst_addr) {
                    return Err(FlashError::WriteVerify);
                }
            }
        }
        src_addr += 2;
        dst_addr += 2;
    }
    Ok(())
}
