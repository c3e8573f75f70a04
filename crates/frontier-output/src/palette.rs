//! Display colours for assets.
//!
//! Colours are assigned by asset position and wrap around the palette, so the
//! same column always gets the same colour.

/// Hex colours used for asset allocations, in assignment order.
pub const PALETTE: [&str; 8] = [
    "#6366f1", "#8b5cf6", "#06b6d4", "#10b981", "#f59e0b", "#ef4444", "#ec4899", "#84cc16",
];

/// Colour for the asset at `index`.
pub const fn asset_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_wrap() {
        assert_eq!(asset_color(0), "#6366f1");
        assert_eq!(asset_color(4), "#f59e0b");
        assert_eq!(asset_color(PALETTE.len()), asset_color(0));
        assert_eq!(asset_color(PALETTE.len() + 3), asset_color(3));
    }
}
