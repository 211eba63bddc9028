//! Level-to-difficulty rules and size normalisation used by maze generation.

/// Upper bound on complexity no matter how far the player gets.
pub const MAX_COMPLEXITY: u32 = 5;

pub fn clamp_complexity(complexity: u32) -> u32 {
    complexity.min(MAX_COMPLEXITY)
}

/// Level 1 is a plain spanning tree; each later level adds more loops until the cap.
pub fn complexity_for_level(level: u32) -> u32 {
    clamp_complexity(level.saturating_sub(1))
}

/// Carving walks two cells at a time from odd coordinates, so sizes must be odd.
pub fn normalize_dimension(size: usize) -> usize {
    if size % 2 == 0 { size + 1 } else { size }
}
