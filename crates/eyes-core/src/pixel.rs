use crate::constants::PIXEL_PALETTE;
use smallvec::SmallVec;

/// Cyclic cursor over the pixelation palette.
///
/// The published level is always a palette entry; before the first click it
/// is the first one.
#[derive(Clone, Debug)]
pub struct PixelToggle {
    palette: SmallVec<[f32; 4]>,
    cursor: usize,
}

impl Default for PixelToggle {
    fn default() -> Self {
        Self::new(&PIXEL_PALETTE)
    }
}

impl PixelToggle {
    /// An empty palette falls back to the default one.
    pub fn new(palette: &[f32]) -> Self {
        let palette: SmallVec<[f32; 4]> = if palette.is_empty() {
            SmallVec::from_slice(&PIXEL_PALETTE)
        } else {
            SmallVec::from_slice(palette)
        };
        Self { palette, cursor: 0 }
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn level(&self) -> f32 {
        self.palette[self.cursor]
    }

    pub fn palette(&self) -> &[f32] {
        &self.palette
    }

    /// Move to the next palette entry, wrapping after the last, and return it.
    pub fn advance(&mut self) -> f32 {
        self.cursor = (self.cursor + 1) % self.palette.len();
        self.level()
    }
}
