// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tiling plan: how a convolution is cut into hardware-sized pieces.
//!
//! Three sequences are tiled independently:
//! - output channels, in tiles of at most `P` (rows of the operand matrix);
//! - output surface positions, in tiles of at most `N` (the vector feed);
//! - serialized vector positions, in slices of at most `P` (one pass).
//!
//! The final tile of each sequence may be shorter than nominal. The engine
//! still runs full-size passes and zero-fills the unused part.

use crate::{ConvGeometry, HwConfig};

/// A contiguous run `[start, start + len)` of a tiled sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Tile {
    /// First index covered by this tile.
    pub start: usize,
    /// Number of valid indices (at most the nominal tile size).
    pub len: usize,
}

impl Tile {
    /// One past the last index covered.
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Cuts `0..total` into consecutive tiles of at most `size` elements.
///
/// # Panics
/// Panics if `size == 0`.
pub fn tiles(total: usize, size: usize) -> impl Iterator<Item = Tile> {
    assert!(size > 0, "tile size must be positive");
    (0..total).step_by(size).map(move |start| Tile {
        start,
        len: size.min(total - start),
    })
}

/// Number of tiles of at most `size` needed to cover `total`.
fn tile_count(total: usize, size: usize) -> usize {
    total.div_ceil(size)
}

/// Tile counts for one (geometry, hardware) pair.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TilePlan {
    /// Channel tiles of at most `P` filters.
    pub channel_tiles: usize,
    /// Surface tiles of at most `N` positions.
    pub surface_tiles: usize,
    /// Slices of at most `P` serialized elements.
    pub slice_tiles: usize,
    /// Vector-feed slots left empty across all surface tiles of one channel tile.
    pub idle_feed_slots: usize,
    /// Operand rows left empty across all channel tiles.
    pub idle_operand_rows: usize,
}

impl TilePlan {
    /// Computes the plan for `geometry` on `config`.
    pub fn new(geometry: &ConvGeometry, config: HwConfig) -> Self {
        let n = config.vector_count();
        let p = config.matrix_dim();
        let surface_tiles = tile_count(geometry.surface_count(), n);
        let channel_tiles = tile_count(geometry.channels(), p);
        Self {
            channel_tiles,
            surface_tiles,
            slice_tiles: tile_count(geometry.serial_len(), p),
            idle_feed_slots: surface_tiles * n - geometry.surface_count(),
            idle_operand_rows: channel_tiles * p - geometry.channels(),
        }
    }

    /// Total number of emulated hardware passes.
    pub fn hardware_passes(&self) -> usize {
        self.channel_tiles * self.surface_tiles * self.slice_tiles
    }

    /// Returns a human-readable one-line summary.
    pub fn summary(&self) -> String {
        format!(
            "TilePlan: {} channel tiles x {} surface tiles x {} slices = {} passes \
             ({} idle feed slots, {} idle operand rows)",
            self.channel_tiles,
            self.surface_tiles,
            self.slice_tiles,
            self.hardware_passes(),
            self.idle_feed_slots,
            self.idle_operand_rows,
        )
    }
}
