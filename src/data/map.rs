//! Placeholder geometry for the network map.
//!
//! Markers are spread by list position, not by coordinates. There is no
//! projection here; latitude and longitude are only shown as text.

/// Marker offset inside the map panel, in percent of its width/height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerPosition {
    pub left: u16,
    pub top: u16,
}

impl MarkerPosition {
    /// Translate the percentage offset into a cell inside a panel of the
    /// given size. The result is clamped to the panel.
    pub fn to_cell(self, width: u16, height: u16) -> (u16, u16) {
        let x = (u32::from(width) * u32::from(self.left) / 100) as u16;
        let y = (u32::from(height) * u32::from(self.top) / 100) as u16;
        (x.min(width.saturating_sub(1)), y.min(height.saturating_sub(1)))
    }
}

/// Position of the marker at `index`: columns step right by 15%, rows
/// alternate 10% above and below the 30% line.
pub fn marker_position(index: usize) -> MarkerPosition {
    let left = 20usize.saturating_add(index.saturating_mul(15)).min(u16::MAX as usize) as u16;
    let top = if index % 2 == 0 { 30 + 10 } else { 30 - 10 };
    MarkerPosition { left, top }
}
