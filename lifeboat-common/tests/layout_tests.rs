// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Unit tests for the flash memory map.

use lifeboat_common::flash::segments_for;
use lifeboat_common::layout::{
    APP_RESET_VECTOR_ADDR, APP_SIZE, BACKUP, BANK_SIZE, DOWNLOAD, FIRST_BANK_ADDR,
    HW_RESET_VECTOR_ADDR, IMAGE_TOTAL_SIZE, INFO_SEGMENT_ADDR, INFO_SEGMENT_SIZE, PROGRAM,
    SEGMENT_SIZE, VECT_SIZE,
};

// --- Region base addresses ---

#[test]
fn test_program_region_addresses() {
    assert_eq!(PROGRAM.app_start, 0x5400);
    assert_eq!(PROGRAM.vect_start, 0xFF80);
}

#[test]
fn test_download_region_addresses() {
    assert_eq!(DOWNLOAD.app_start, 0x1_4400);
    assert_eq!(DOWNLOAD.vect_start, 0x1_C380);
}

#[test]
fn test_backup_region_addresses() {
    assert_eq!(BACKUP.app_start, 0x1_C400);
    assert_eq!(BACKUP.vect_start, 0x2_4380);
}

// --- Image geometry ---

#[test]
fn test_image_sizes() {
    assert_eq!(APP_SIZE, 32_640);
    assert_eq!(VECT_SIZE, 128);
    assert_eq!(IMAGE_TOTAL_SIZE, APP_SIZE + VECT_SIZE);
    assert_eq!(IMAGE_TOTAL_SIZE, BANK_SIZE);
}

#[test]
fn test_erase_units() {
    assert_eq!(SEGMENT_SIZE, 512);
    assert_eq!(BANK_SIZE, 32 * 1024);
    assert_eq!(FIRST_BANK_ADDR, 0x4400);
}

#[test]
fn test_reset_vector_slots() {
    assert_eq!(PROGRAM.reset_vector_slot(), 0xFFFE);
    assert_eq!(DOWNLOAD.reset_vector_slot(), 0x1_C3FE);
    assert_eq!(BACKUP.reset_vector_slot(), 0x2_43FE);
    assert_eq!(HW_RESET_VECTOR_ADDR, PROGRAM.reset_vector_slot());
}

#[test]
fn test_shadow_reset_vector_sits_in_the_program_gap() {
    // The application's true entry is stored just below the vector table,
    // inside the span the program erase wipes.
    assert_eq!(APP_RESET_VECTOR_ADDR, 0xFF7E);
    assert!(APP_RESET_VECTOR_ADDR >= PROGRAM.app_start + APP_SIZE);
    assert!(APP_RESET_VECTOR_ADDR < PROGRAM.vect_start);
}

#[test]
fn test_program_erase_span_covers_body_gap_and_vectors() {
    assert_eq!(PROGRAM.erase_span(), PROGRAM.vect_end() - PROGRAM.app_start);
    assert_eq!(PROGRAM.erase_span(), 0xAC00);
    assert_eq!(segments_for(PROGRAM.erase_span()), 86);
}

#[test]
fn test_segments_for_rounds_up() {
    assert_eq!(segments_for(1), 1);
    assert_eq!(segments_for(SEGMENT_SIZE), 1);
    assert_eq!(segments_for(SEGMENT_SIZE + 1), 2);
    assert_eq!(segments_for(2 * SEGMENT_SIZE), 2);
}

// --- Region relationships ---

#[test]
fn test_download_and_backup_images_are_contiguous() {
    assert_eq!(DOWNLOAD.vect_start, DOWNLOAD.app_start + APP_SIZE);
    assert_eq!(BACKUP.vect_start, BACKUP.app_start + APP_SIZE);
}

#[test]
fn test_regions_do_not_overlap() {
    assert!(PROGRAM.vect_end() <= DOWNLOAD.app_start);
    assert!(DOWNLOAD.vect_end() <= BACKUP.app_start);
}

#[test]
fn test_info_segment_is_outside_every_region() {
    assert_eq!(INFO_SEGMENT_ADDR, 0x1900);
    assert_eq!(INFO_SEGMENT_SIZE, 128);
    assert!(INFO_SEGMENT_ADDR + INFO_SEGMENT_SIZE as u32 <= PROGRAM.app_start);
}

#[test]
fn test_download_and_backup_start_on_bank_boundaries() {
    assert_eq!((DOWNLOAD.app_start - FIRST_BANK_ADDR) % BANK_SIZE, 0);
    assert_eq!((BACKUP.app_start - FIRST_BANK_ADDR) % BANK_SIZE, 0);
}
