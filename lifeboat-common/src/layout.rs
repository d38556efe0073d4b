// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Flash memory map: regions, vector tables and the image status segment.
//!
//! The map is fixed at build time and must stay bit-exact across firmware
//! revisions: images are produced by an external toolchain against these
//! addresses, and the INFO segment survives reflashing. The device's flash
//! is organized as four 32 KiB banks starting at [`FIRST_BANK_ADDR`]; each
//! image region occupies one bank.

/// Smallest erasable flash unit.
pub const SEGMENT_SIZE: u32 = 512;

/// One flash bank; a full image (app body + vector table) fits in a bank.
pub const BANK_SIZE: u32 = 32 * 1024;

/// Base address of the first flash bank.
pub const FIRST_BANK_ADDR: u32 = 0x4400;

/// Application body size in bytes, without the vector table.
pub const APP_SIZE: u32 = 32_640;

/// Vector table size in bytes. Its last word is the CPU reset vector.
pub const VECT_SIZE: u32 = 128;

/// Full image size: application body plus vector table.
pub const IMAGE_TOTAL_SIZE: u32 = APP_SIZE + VECT_SIZE;

/// Information segment holding the image status flag.
pub const INFO_SEGMENT_ADDR: u32 = 0x1900;

/// Size of the information segment (one erase unit of information memory).
pub const INFO_SEGMENT_SIZE: usize = 128;

/// Offset of the image status byte inside the INFO segment.
pub const STATUS_FLAG_OFFSET: u32 = 0;

/// The application's true reset vector lives here; the hardware reset
/// vector at the top of the PROGRAM vector table is reserved for the
/// bootloader's entry and must keep pointing at it across every reset.
pub const APP_RESET_VECTOR_ADDR: u32 = 0xFF7E;

/// One contiguous image region: application body at `app_start`, vector
/// table at `vect_start`. There may be an address gap between the two (the
/// PROGRAM region has one; DOWNLOAD and BACKUP are contiguous).
///
/// Passed by value throughout the rewrite code so the field loads come from
/// registers or the stack, never from flash that may be mid-rewrite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub app_start: u32,
    pub vect_start: u32,
}

impl Region {
    /// First address past the vector table.
    pub const fn vect_end(self) -> u32 {
        self.vect_start + VECT_SIZE
    }

    /// Address of the region's reset-vector word (last word of the table).
    pub const fn reset_vector_slot(self) -> u32 {
        self.vect_end() - 2
    }

    /// Byte span covered when erasing the region segment by segment:
    /// app body, gap (if any) and vector table.
    pub const fn erase_span(self) -> u32 {
        self.vect_end() - self.app_start
    }
}

/// Live application image, read-executed by the application.
pub const PROGRAM: Region = Region {
    app_start: 0x5400,
    vect_start: 0xFF80,
};

/// Staging area the application writes a newly received image into.
pub const DOWNLOAD: Region = Region {
    app_start: 0x1_4400,
    vect_start: 0x1_C380,
};

/// Rollback copy of the image that was live before the last reflash.
pub const BACKUP: Region = Region {
    app_start: 0x1_C400,
    vect_start: 0x2_4380,
};

/// The word the CPU fetches its initial PC from at power-on: the last word
/// of the PROGRAM vector table.
pub const HW_RESET_VECTOR_ADDR: u32 = PROGRAM.reset_vector_slot();

// Compile-time layout checks
const _: () = assert!(IMAGE_TOTAL_SIZE <= BANK_SIZE);
const _: () = assert!(APP_SIZE % 2 == 0 && VECT_SIZE % 2 == 0);
const _: () = assert!(SEGMENT_SIZE.is_power_of_two());
const _: () = assert!(HW_RESET_VECTOR_ADDR == 0xFFFE);
const _: () = assert!(APP_RESET_VECTOR_ADDR % 2 == 0);
const _: () = assert!(APP_RESET_VECTOR_ADDR < PROGRAM.vect_start);
// DOWNLOAD and BACKUP images are contiguous within their banks
const _: () = assert!(DOWNLOAD.vect_start == DOWNLOAD.app_start + APP_SIZE);
const _: () = assert!(BACKUP.vect_start == BACKUP.app_start + APP_SIZE);
// Each image region starts on a bank boundary relative to the first bank
const _: () = assert!((DOWNLOAD.app_start - FIRST_BANK_ADDR) % BANK_SIZE == 0);
const _: () = assert!((BACKUP.app_start - FIRST_BANK_ADDR) % BANK_SIZE == 0);
// The INFO segment lives outside every image region, on its own erase unit
const _: () = assert!(INFO_SEGMENT_ADDR + (INFO_SEGMENT_SIZE as u32) <= PROGRAM.app_start);
const _: () = assert!(INFO_SEGMENT_ADDR % (INFO_SEGMENT_SIZE as u32) == 0);
