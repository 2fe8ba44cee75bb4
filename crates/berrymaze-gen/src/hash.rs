//! Grid hashing for determinism checks.
//!
//! Uses FNV-1a for fast, deterministic hashing of generated grids. Not
//! cryptographically secure; meant for comparing generator output across
//! runs and processes.

use berrymaze_core::Position;

use crate::grid::MazeGrid;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_u32(mut hash: u64, v: u32) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

#[inline]
fn fnv1a_pos(hash: u64, p: Position) -> u64 {
    fnv1a_u32(fnv1a_u32(hash, p.x as u32), p.y as u32)
}

/// Hash a grid's dimensions, tiles, start and goal.
pub fn grid_hash(grid: &MazeGrid) -> u64 {
    let mut hash = FNV_OFFSET;
    hash = fnv1a_u32(hash, grid.width());
    hash = fnv1a_u32(hash, grid.height());
    for tile in grid.tiles() {
        hash = fnv1a_byte(hash, tile.ordinal());
    }
    hash = fnv1a_pos(hash, grid.start());
    fnv1a_pos(hash, grid.goal())
}
