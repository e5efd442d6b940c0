//! Compositor Layer

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use super::LayerId;

/// A positioned, z-ordered drawing buffer
pub struct Layer {
    /// Layer identity
    pub id: LayerId,
    /// Position and size on screen
    pub bounds: Rect,
    /// Stacking order (higher is in front)
    pub z_index: i32,
    /// Hidden layers are not composited
    pub visible: bool,
    /// Layer content, in layer-local coordinates
    pub buffer: Buffer,
}

impl Layer {
    /// Create a visible, empty layer
    pub fn new(id: LayerId, bounds: Rect, z_index: i32) -> Self {
        Self {
            id,
            bounds,
            z_index,
            visible: true,
            buffer: Buffer::empty(Rect::new(0, 0, bounds.width, bounds.height)),
        }
    }

    /// Whether screen position (x, y) falls inside the layer
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.bounds.x
            && x < self.bounds.x.saturating_add(self.bounds.width)
            && y >= self.bounds.y
            && y < self.bounds.y.saturating_add(self.bounds.height)
    }
}
