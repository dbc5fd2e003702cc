use crate::constants::HOVER_LERP;

/// Eases the clickable sprite between its idle and hovered scale.
#[derive(Clone, Debug)]
pub struct HoverScaler {
    pub base: f32,
    pub hovered: f32,
    pub lerp: f32,
    current: f32,
}

impl HoverScaler {
    pub fn new(base: f32, hovered: f32) -> Self {
        Self {
            base,
            hovered,
            lerp: HOVER_LERP,
            current: base,
        }
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn update(&mut self, is_hovered: bool) -> f32 {
        let target = if is_hovered { self.hovered } else { self.base };
        self.current += (target - self.current) * self.lerp;
        self.current
    }
}
