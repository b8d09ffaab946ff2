//! Palette handling for indexed-color rasters
//!
//! TIFF stores the color map as three planes of 16-bit values (all reds,
//! then all greens, then all blues). Consumers want 8-bit RGBA tuples in
//! original index order, so the conversion happens once at model
//! construction.

use log::warn;

/// Ordered RGBA lookup table for indexed-color rasters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<[u8; 4]>,
}

impl Palette {
    /// Build the palette from a TIFF ColorMap
    ///
    /// The map must hold three equal planes; anything else is reported and
    /// treated as "no palette" rather than failing the whole raster.
    pub fn from_color_map(color_map: &[u16]) -> Option<Self> {
        if color_map.is_empty() || color_map.len() % 3 != 0 {
            warn!("Malformed color map of {} values, ignoring", color_map.len());
            return None;
        }

        let count = color_map.len() / 3;
        let entries = (0..count)
            .map(|i| {
                [
                    (color_map[i] >> 8) as u8,
                    (color_map[count + i] >> 8) as u8,
                    (color_map[2 * count + i] >> 8) as u8,
                    255,
                ]
            })
            .collect();

        Some(Palette { entries })
    }

    /// Number of palette entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the palette holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get an entry by index
    pub fn get(&self, index: usize) -> Option<[u8; 4]> {
        self.entries.get(index).copied()
    }

    /// All entries in original index order
    pub fn entries(&self) -> &[[u8; 4]] {
        &self.entries
    }

    /// Look up the color for a raw sample value
    ///
    /// Indices outside the table (negative or past the end) produce
    /// transparent black rather than failing mid-extraction.
    pub fn lookup(&self, value: f64) -> [u8; 4] {
        if value >= 0.0 && (value as usize) < self.entries.len() {
            self.entries[value as usize]
        } else {
            [0, 0, 0, 0]
        }
    }
}
