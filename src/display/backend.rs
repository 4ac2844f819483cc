use super::types::{DisplayRect, DisplayTopology, FrameBuffer};
use crate::error::{AutomationError, AutomationResult};
use image::{DynamicImage, RgbaImage, imageops};

/// Trait defining display capabilities (xcap in production, fakes in tests)
pub trait ScreenSource {
    /// Physical displays in enumeration order. Never includes a combined
    /// virtual-desktop entry. May be empty.
    fn enumerate(&mut self) -> AutomationResult<DisplayTopology>;

    /// Capture one grayscale frame of the display at `display_index` (1-based)
    fn capture(&mut self, display_index: usize, rect: &DisplayRect)
    -> AutomationResult<FrameBuffer>;

    /// Like `enumerate`, but zero displays is reported as `TopologyEmpty`
    fn enumerate_required(&mut self) -> AutomationResult<DisplayTopology> {
        let topology = self.enumerate()?;
        if topology.is_empty() {
            return Err(AutomationError::TopologyEmpty);
        }
        Ok(topology)
    }
}

/// Screen source backed by `xcap`. Holds no monitor handles: every call
/// re-reads the monitor list so attach/detach is picked up on the next pass.
#[derive(Debug, Default)]
pub struct XcapScreen;

impl XcapScreen {
    pub fn new() -> Self {
        Self
    }

    fn monitor_rect(monitor: &xcap::Monitor) -> xcap::XCapResult<DisplayRect> {
        Ok(DisplayRect::new(
            monitor.x()?,
            monitor.y()?,
            monitor.width()?,
            monitor.height()?,
        ))
    }

    fn all_monitors() -> AutomationResult<Vec<xcap::Monitor>> {
        xcap::Monitor::all().map_err(|e| AutomationError::DisplayEnumerationFailed {
            reason: e.to_string(),
        })
    }
}

impl ScreenSource for XcapScreen {
    fn enumerate(&mut self) -> AutomationResult<DisplayTopology> {
        let mut displays = Vec::new();
        for monitor in Self::all_monitors()? {
            match Self::monitor_rect(&monitor) {
                Ok(rect) if rect.width > 0 && rect.height > 0 => displays.push(rect),
                Ok(rect) => log::debug!("🖥️ Ignoring zero-sized monitor {:?}", rect),
                Err(e) => log::warn!("⚠️ Could not read monitor geometry: {}", e),
            }
        }
        log::debug!("🖥️ Enumerated {} monitor(s): {:?}", displays.len(), displays);
        Ok(DisplayTopology::new(displays))
    }

    fn capture(
        &mut self,
        display_index: usize,
        rect: &DisplayRect,
    ) -> AutomationResult<FrameBuffer> {
        let capture_err = |reason: String| AutomationError::CaptureFailed {
            display_index,
            reason,
        };

        // Match by geometry rather than position so a re-ordered monitor list
        // never sends the frame of one display to the rectangle of another.
        let monitor = Self::all_monitors()?
            .into_iter()
            .find(|m| Self::monitor_rect(m).is_ok_and(|r| r == *rect))
            .ok_or_else(|| capture_err(format!("monitor {:?} no longer attached", rect)))?;

        let shot = monitor
            .capture_image()
            .map_err(|e| capture_err(e.to_string()))?;
        let (width, height) = shot.dimensions();
        let rgba = RgbaImage::from_raw(width, height, shot.into_raw())
            .ok_or_else(|| capture_err("capture buffer has unexpected length".to_string()))?;
        let mut pixels = DynamicImage::ImageRgba8(rgba).to_luma8();

        // HiDPI backends return more pixels than the logical rectangle; match
        // coordinates must be in the rectangle's space to click correctly.
        if pixels.width() != rect.width || pixels.height() != rect.height {
            log::debug!(
                "📐 Monitor #{} frame {}x{} rescaled to {}x{}",
                display_index,
                pixels.width(),
                pixels.height(),
                rect.width,
                rect.height
            );
            pixels = imageops::resize(
                &pixels,
                rect.width,
                rect.height,
                imageops::FilterType::Triangle,
            );
        }

        Ok(FrameBuffer {
            display_index,
            rect: *rect,
            pixels,
        })
    }
}
