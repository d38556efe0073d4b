// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Lifeboat bootloader: fail-safe firmware install and rollback over four
//! flash banks.

#![no_std]
#![no_main]

mod boot;
mod flash;
mod platform;

use defmt_rtt as _;
use panic_probe as _;

defmt::timestamp!("{=u64:us}", { 0 });

use cortex_m_rt::entry;

#[entry]
fn main() -> ! {
    defmt::println!("Bootloader init");

    boot::run()
}
