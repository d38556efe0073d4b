// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Platform bring-up: watchdog, clocks, debug LEDs and soft reset.
//!
//! ACLK runs from the 32768 Hz XT1 crystal, MCLK and SMCLK from the 4 MHz
//! XT2 crystal. The watchdog is halted for the duration of the boot pass
//! and re-armed with a long ACLK-sourced timeout just before control moves
//! to the application.

// Watchdog
const WDTCTL: *mut u16 = 0x015C as *mut u16;
const WDTPW: u16 = 0x5A00;
const WDTHOLD: u16 = 0x0080;
const WDT_SSEL_ACLK: u16 = 0x0020;
const WDT_IS_DIV_8192K: u16 = 0x0002; // 2^23 / 32768 Hz = 256 s

// Clock system
const UCSCTL3: *mut u16 = 0x0166 as *mut u16;
const UCSCTL4: *mut u16 = 0x0168 as *mut u16;
const UCSCTL6: *mut u16 = 0x016C as *mut u16;
const UCSCTL7: *mut u16 = 0x016E as *mut u16;
const SFRIFG1: *mut u16 = 0x0102 as *mut u16;

const XT1OFF: u16 = 0x0001;
const XT2OFF: u16 = 0x0100;
const XCAP_3: u16 = 0x000C;
const XT1DRIVE_MASK: u16 = 0x00C0;
const XT2DRIVE_MASK: u16 = 0xC000;
const SELREF_MASK: u16 = 0x0070; // FLL reference select; XT1 = 0
const SELA_XT1CLK: u16 = 0x0000;
const SELS_XT2CLK: u16 = 0x0050;
const SELM_XT2CLK: u16 = 0x0005;
const XT2OFFG: u16 = 0x0008;
const XT1LFOFFG: u16 = 0x0002;
const DCOFFG: u16 = 0x0001;
const OFIFG: u16 = 0x0002;

// Crystal pin functions
const P5SEL: *mut u8 = 0x024A as *mut u8;
const XT1_PINS: u8 = 0x30; // P5.4 / P5.5
const XT2_PINS: u8 = 0x0C; // P5.2 / P5.3

// Power manager
const PMMCTL0: *mut u16 = 0x0120 as *mut u16;
const PMMPW: u16 = 0xA500;
const PMMSWBOR: u16 = 0x0004;
const PMMCOREV_2: u16 = 0x0002;

// Debug LEDs: red on P1.0, green on P4.7
const P1OUT: *mut u8 = 0x0202 as *mut u8;
const P1DIR: *mut u8 = 0x0204 as *mut u8;
const P4OUT: *mut u8 = 0x0223 as *mut u8;
const P4DIR: *mut u8 = 0x0225 as *mut u8;
const RED_BIT: u8 = 0x01;
const GREEN_BIT: u8 = 0x80;

/// Stop the watchdog for the duration of the boot pass.
pub fn halt_watchdog() {
    unsafe {
        WDTCTL.write_volatile(WDTPW | WDTHOLD);
    }
}

/// Re-arm the watchdog with the long ACLK timeout (~256 s) before the
/// application takes over.
pub fn arm_watchdog_long() {
    unsafe {
        WDTCTL.write_volatile(WDTPW | WDT_SSEL_ACLK | WDT_IS_DIV_8192K);
    }
}

/// Bring up both crystals and route the clock tree.
pub fn configure_clocks() {
    unsafe {
        // Hand the crystal pins to the oscillator
        P5SEL.write_volatile(P5SEL.read_volatile() | XT1_PINS | XT2_PINS);

        let mut ctl6 = UCSCTL6.read_volatile();
        ctl6 &= !(XT1OFF | XT2OFF);
        ctl6 |= XCAP_3;
        UCSCTL6.write_volatile(ctl6);

        // FLL reference from XT1
        UCSCTL3.write_volatile(UCSCTL3.read_volatile() & !SELREF_MASK);

        // Loop until both crystals stabilize
        loop {
            UCSCTL7
                .write_volatile(UCSCTL7.read_volatile() & !(XT2OFFG | XT1LFOFFG | DCOFFG));
            SFRIFG1.write_volatile(SFRIFG1.read_volatile() & !OFIFG);
            if SFRIFG1.read_volatile() & OFIFG == 0 {
                break;
            }
        }

        // Drop drive strength now that the oscillators are stable
        UCSCTL6.write_volatile(UCSCTL6.read_volatile() & !(XT1DRIVE_MASK | XT2DRIVE_MASK));

        // ACLK = XT1, MCLK = SMCLK = XT2
        UCSCTL4
            .write_volatile(UCSCTL4.read_volatile() | SELA_XT1CLK | SELS_XT2CLK | SELM_XT2CLK);
    }
}

/// Configure the two debug LED pins as outputs, both off.
pub fn init_debug_leds() {
    unsafe {
        P1DIR.write_volatile(P1DIR.read_volatile() | RED_BIT);
        P1OUT.write_volatile(P1OUT.read_volatile() & !RED_BIT);
        P4DIR.write_volatile(P4DIR.read_volatile() | GREEN_BIT);
        P4OUT.write_volatile(P4OUT.read_volatile() & !GREEN_BIT);
    }
}

pub fn red_led(on: bool) {
    unsafe {
        let out = P1OUT.read_volatile();
        P1OUT.write_volatile(if on { out | RED_BIT } else { out & !RED_BIT });
    }
}

pub fn green_led(on: bool) {
    unsafe {
        let out = P4OUT.read_volatile();
        P4OUT.write_volatile(if on { out | GREEN_BIT } else { out & !GREEN_BIT });
    }
}

/// Request a brownout-style software reset. The device restarts at the
/// bootloader entry.
pub fn soft_reset() -> ! {
    unsafe {
        PMMCTL0.write_volatile(PMMPW | PMMSWBOR | PMMCOREV_2);
    }
    loop {
        core::hint::spin_loop();
    }
}
