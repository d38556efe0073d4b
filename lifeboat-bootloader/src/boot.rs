// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! The boot pass: dispatch on the image status, then hand over to the
//! application.

use crate::flash::McuFlash;
use crate::platform;
use lifeboat_common::boot::{run_boot_pass, PassOutcome};
use lifeboat_common::status::{get_image_status, ImageStatus, InfoSegment};

/// Staging buffer for INFO segment rewrites. Lives in RAM for the whole
/// bootloader pass and is handed to the decision loop by reference.
static mut INFO_SCRATCH: InfoSegment = InfoSegment::new();

/// Run boot passes forever. Control normally leaves through the
/// application call and comes back here only if the application returns,
/// which re-runs the whole pass.
pub fn run() -> ! {
    loop {
        platform::halt_watchdog();
        platform::configure_clocks();
        platform::init_debug_leds();
        cortex_m::interrupt::disable();

        let mut flash = unsafe { McuFlash::steal() };
        let status = get_image_status(&flash);
        defmt::println!("image status: {}", status);

        // Checkpoint LEDs: red while a rewrite is pending, both during
        // recovery.
        match status {
            ImageStatus::Download => platform::red_led(true),
            ImageStatus::PendingValidation => {
                platform::red_led(true);
                platform::green_led(true);
            }
            _ => {}
        }

        let scratch = unsafe { &mut *core::ptr::addr_of_mut!(INFO_SCRATCH) };
        match run_boot_pass(&mut flash, Some(scratch)) {
            PassOutcome::Reset => {
                defmt::println!("recovery outcome recorded, resetting");
                platform::soft_reset();
            }
            PassOutcome::Jump(entry) => {
                platform::red_led(false);
                platform::green_led(false);
                defmt::println!("handing over to application at {=u16:x}", entry);
                platform::arm_watchdog_long();
                unsafe { call_application(entry) };
            }
        }
    }
}

/// Indirect call through the application's true reset vector. The hardware
/// reset vector stays pointed at the bootloader, so any reset lands back
/// here.
///
/// # Safety
/// `entry` must be the entry address of a valid application image.
unsafe fn call_application(entry: u16) {
    let app = core::mem::transmute::<usize, extern "C" fn()>(entry as usize);
    app();
}
