// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Flash controller driver.
//!
//! The controller stalls instruction fetches from a bank that is being
//! erased or written, and the bootloader executes out of the same bank that
//! holds the PROGRAM region. Every function here therefore lives in the
//! `.data` output section: the startup code copies it to RAM together with
//! the initialized data, and the rewrite procedures call it there. The
//! linker fails the build if the RAM image outgrows the data region, which
//! bounds the resident code size.
//!
//! Register discipline, enforced by the [`FlashController`] contract plus
//! `WriteSession` upstream:
//! - every register write carries the password in the high byte;
//! - `erase` owns its whole unlock/relock sequence;
//! - a run of word/byte writes is bracketed by `unlock_write`/`lock`, with
//!   a BUSY wait before each access while unlocked.
//!
//! The boot pass runs with interrupts disabled, so no masking is done per
//! operation here.

use lifeboat_common::flash::{EraseMode, FlashController};

// Flash controller registers
const FCTL1: *mut u16 = 0x0140 as *mut u16;
const FCTL3: *mut u16 = 0x0144 as *mut u16;

/// Write password, required in the high byte of every FCTL register write.
const FWKEY: u16 = 0xA500;

// FCTL1 mode bits
const ERASE: u16 = 0x0002; // segment erase
const MERAS: u16 = 0x0004; // bank erase
const WRT: u16 = 0x0040; // byte/word write mode

// FCTL3 bits
const BUSY: u16 = 0x0001;
const LOCK: u16 = 0x0010;

/// The MCU's flash controller.
pub struct McuFlash {
    _private: (),
}

impl McuFlash {
    /// # Safety
    /// There must be at most one `McuFlash` alive; the controller registers
    /// are a single hardware resource.
    pub const unsafe fn steal() -> Self {
        McuFlash { _private: () }
    }
}

impl FlashController for McuFlash {
    #[link_section = ".data"]
    #[inline(never)]
    fn erase(&mut self, addr: u32, mode: EraseMode) {
        let mode_bit = match mode {
            EraseMode::Segment => ERASE,
            EraseMode::Bank => MERAS,
        };
        unsafe {
            while FCTL3.read_volatile() & BUSY != 0 {}
            FCTL3.write_volatile(FWKEY); // clear LOCK
            FCTL1.write_volatile(FWKEY | mode_bit);
            // Dummy write starts the erase
            (addr as *mut u8).write_volatile(0);
            while FCTL3.read_volatile() & BUSY != 0 {}
            FCTL1.write_volatile(FWKEY); // clear mode bit
            FCTL3.write_volatile(FWKEY | LOCK);
        }
    }

    #[link_section = ".data"]
    #[inline(never)]
    fn read_byte(&self, addr: u32) -> u8 {
        unsafe { (addr as *const u8).read_volatile() }
    }

    #[link_section = ".data"]
    #[inline(never)]
    fn read_word(&self, addr: u32) -> u16 {
        unsafe { (addr as *const u16).read_volatile() }
    }

    #[link_section = ".data"]
    #[inline(never)]
    fn write_byte(&mut self, addr: u32, value: u8) {
        unsafe { (addr as *mut u8).write_volatile(value) }
    }

    #[link_section = ".data"]
    #[inline(never)]
    fn write_word(&mut self, addr: u32, value: u16) {
        unsafe { (addr as *mut u16).write_volatile(value) }
    }

    #[link_section = ".data"]
    #[inline(never)]
    fn wait_ready(&self) {
        unsafe { while FCTL3.read_volatile() & BUSY != 0 {} }
    }

    #[link_section = ".data"]
    #[inline(never)]
    fn unlock_write(&mut self) {
        unsafe {
            FCTL3.write_volatile(FWKEY); // clear LOCK
            FCTL1.write_volatile(FWKEY | WRT);
        }
    }

    #[link_section = ".data"]
    #[inline(never)]
    fn lock(&mut self) {
        unsafe {
            FCTL1.write_volatile(FWKEY); // clear WRT
            FCTL3.write_volatile(FWKEY | LOCK);
        }
    }
}
