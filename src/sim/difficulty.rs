//! Score-driven difficulty scheduler
//!
//! A pure function from cumulative score to the active parameter set. Seven
//! bands; each band fixes scroll speed, gap size, and spawn spacing together.
//! This is the sole source of truth for both spawn geometry and world speed.

use serde::{Deserialize, Serialize};

use crate::consts::{BASE_GAP, BASE_SPACING, BASE_SPEED, MIN_GEOMETRY};

/// Difficulty parameters active for a given score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    /// World scroll speed (obstacles move left this much per tick)
    pub speed: f32,
    /// Vertical gap between top and bottom barrier
    pub gap: f32,
    /// Horizontal distance between consecutive spawns
    pub spacing: f32,
}

/// Band table: (inclusive score threshold, speed mult, gap mult, spacing mult).
/// Speed only rises, gap and spacing only shrink.
const BANDS: [(u32, f32, f32, f32); 7] = [
    (0, 1.0, 1.0, 1.0),
    (20, 1.2, 0.886, 0.92),
    (50, 1.5, 0.773, 0.84),
    (70, 1.8, 0.659, 0.74),
    (85, 2.2, 0.568, 0.66),
    (92, 2.7, 0.5, 0.58),
    (97, 3.5, 0.432, 0.52),
];

/// Look up the difficulty tier for a score
///
/// Pure and side-effect free. Gap and spacing are floored at a small positive
/// constant so downstream geometry can never degenerate.
pub fn tier_for(score: u32) -> Tier {
    let (_, speed_mul, gap_mul, spacing_mul) = BANDS
        .iter()
        .rev()
        .find(|(threshold, ..)| score >= *threshold)
        .copied()
        .unwrap_or(BANDS[0]);

    Tier {
        speed: BASE_SPEED * speed_mul,
        gap: (BASE_GAP * gap_mul).max(MIN_GEOMETRY),
        spacing: (BASE_SPACING * spacing_mul).max(MIN_GEOMETRY),
    }
}
