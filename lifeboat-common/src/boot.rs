// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Boot decision logic: what to do with the flash given the status flag.
//!
//! The transition table is a pure function of the status byte, kept free of
//! hardware so it can be tested on its own; [`run_boot_pass`] executes the
//! resulting plan against a [`FlashController`] and reports whether the
//! device should reset or jump into the application.

use crate::engine::{self, FlashError};
use crate::flash::FlashController;
use crate::layout::APP_RESET_VECTOR_ADDR;
use crate::status::{get_image_status, set_image_status, ImageStatus, InfoSegment};

/// The two flash-rewrite procedures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Procedure {
    Reflash,
    Recover,
}

/// What one boot pass does before handing control to the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootPlan {
    /// Nothing to do; go straight to the application.
    Proceed,
    /// Run a rewrite procedure and record its outcome in the status flag.
    Rewrite {
        procedure: Procedure,
        on_success: ImageStatus,
        on_failure: ImageStatus,
        /// Reset the MCU after recording the outcome, so the next pass
        /// dispatches on it from a clean state.
        reset_after: bool,
    },
    /// Acknowledge a validated image by clearing the flag.
    Clear,
}

/// The status transition table.
///
/// `PendingValidation` at boot means the freshly flashed application ran but
/// never validated itself before a reset; the plan is to restore the backup
/// and reset so the outcome is observed on a clean pass.
pub fn plan_boot(status: ImageStatus) -> BootPlan {
    match status {
        ImageStatus::Download => BootPlan::Rewrite {
            procedure: Procedure::Reflash,
            on_success: ImageStatus::PendingValidation,
            on_failure: ImageStatus::FlashingError,
            reset_after: false,
        },
        ImageStatus::PendingValidation => BootPlan::Rewrite {
            procedure: Procedure::Recover,
            on_success: ImageStatus::Recovered,
            on_failure: ImageStatus::FlashingError,
            reset_after: true,
        },
        ImageStatus::Validated => BootPlan::Clear,
        ImageStatus::None | ImageStatus::Recovered | ImageStatus::FlashingError => {
            BootPlan::Proceed
        }
    }
}

/// How a boot pass ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PassOutcome {
    /// Arm the watchdog and call the application entry.
    Jump(u16),
    /// Soft-reset the MCU.
    Reset,
}

/// Run one boot pass: read the status, execute its plan, and report how to
/// leave the bootloader.
///
/// `scratch` is the staging buffer for status rewrites. Without it nothing
/// is rewritten at all: no procedure runs, the flag keeps its value, and
/// the pass falls through to the application jump; whatever was pending is
/// retried on the next boot.
///
/// The application entry is read from [`APP_RESET_VECTOR_ADDR`] last, after
/// any rewrite, so a just-installed image jumps to its own entry.
pub fn run_boot_pass<F: FlashController>(
    flash: &mut F,
    mut scratch: Option<&mut InfoSegment>,
) -> PassOutcome {
    let status = get_image_status(flash);

    match plan_boot(status) {
        BootPlan::Proceed => {}
        BootPlan::Clear => {
            set_image_status(flash, scratch.as_deref_mut(), ImageStatus::None);
        }
        BootPlan::Rewrite {
            procedure,
            on_success,
            on_failure,
            reset_after,
        } => {
            // Without a buffer the outcome could not be recorded, so the
            // procedure itself is skipped too; the stale flag retries it
            // on the next boot.
            if scratch.is_some() {
                let result: Result<(), FlashError> = match procedure {
                    Procedure::Reflash => engine::reflash(flash),
                    Procedure::Recover => engine::recover(flash),
                };
                let outcome = match result {
                    Ok(()) => on_success,
                    Err(_) => on_failure,
                };
                set_image_status(flash, scratch.as_deref_mut(), outcome);
                if reset_after {
                    return PassOutcome::Reset;
                }
            }
        }
    }

    PassOutcome::Jump(flash.read_word(APP_RESET_VECTOR_ADDR))
}
