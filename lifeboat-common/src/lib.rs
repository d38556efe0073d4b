// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Common types and logic for the lifeboat bootloader.
//!
//! This crate holds everything that does not touch real hardware: the flash
//! memory map, the image status lifecycle, the image-copy engine and the boot
//! decision logic. It compiles for both the target (`no_std`) and the host,
//! where the integration tests under `tests/` drive it against a simulated
//! flash controller.
//!
//! The `defmt` feature derives `defmt::Format` on the public enums for use
//! from the bootloader binary.

#![no_std]

pub mod app;
pub mod boot;
pub mod engine;
pub mod flash;
pub mod layout;
pub mod status;

// Re-export commonly used types
pub use boot::{plan_boot, run_boot_pass, BootPlan, PassOutcome, Procedure};
pub use engine::{recover, reflash, FlashError};
pub use flash::{erase_verify, EraseMode, FlashController, WriteSession};
pub use layout::{Region, BACKUP, DOWNLOAD, PROGRAM};
pub use layout::{APP_RESET_VECTOR_ADDR, HW_RESET_VECTOR_ADDR, INFO_SEGMENT_ADDR};
pub use status::{get_image_status, set_image_status, ImageStatus, InfoSegment};
