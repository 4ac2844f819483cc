// Core display types
use image::GrayImage;
use serde::Serialize;

/// A monitor's bounding box in global screen-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayRect {
    pub origin_x: i32,
    pub origin_y: i32,
    pub width: u32,
    pub height: u32,
}

impl DisplayRect {
    pub fn new(origin_x: i32, origin_y: i32, width: u32, height: u32) -> Self {
        Self {
            origin_x,
            origin_y,
            width,
            height,
        }
    }

    /// Half-open containment test: `[origin, origin + size)` on both axes
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (x, y) = (x as i64, y as i64);
        let left = self.origin_x as i64;
        let top = self.origin_y as i64;
        x >= left && y >= top && x < left + self.width as i64 && y < top + self.height as i64
    }

    /// Translate a display-local point into global coordinates
    pub fn to_global(&self, local_x: u32, local_y: u32) -> (i32, i32) {
        (
            self.origin_x.saturating_add(local_x as i32),
            self.origin_y.saturating_add(local_y as i32),
        )
    }
}

/// Ordered displays for one scan session. Position in the sequence is the
/// display index, reported 1-based to users.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayTopology {
    displays: Vec<DisplayRect>,
}

impl DisplayTopology {
    pub fn new(displays: Vec<DisplayRect>) -> Self {
        Self { displays }
    }

    pub fn displays(&self) -> &[DisplayRect] {
        &self.displays
    }

    pub fn len(&self) -> usize {
        self.displays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.displays.is_empty()
    }

    /// 1-based index of the first display containing the point, 0 if none
    pub fn locate(&self, x: i32, y: i32) -> usize {
        self.displays
            .iter()
            .position(|rect| rect.contains(x, y))
            .map_or(0, |idx| idx + 1)
    }

    /// Display by 1-based index
    pub fn get(&self, display_index: usize) -> Option<&DisplayRect> {
        display_index
            .checked_sub(1)
            .and_then(|idx| self.displays.get(idx))
    }
}

/// One captured grayscale frame, tagged with the display it came from.
/// Lives only for the comparison round of a single scan pass.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pub display_index: usize,
    pub rect: DisplayRect,
    pub pixels: GrayImage,
}

impl FrameBuffer {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}
