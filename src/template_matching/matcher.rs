//! Template matching implementation
//!
//! Zero-mean normalized cross-correlation over every (display, template) pair
//! with a single best candidate per scan pass

use super::types::{LoadedTemplate, MatchCandidate, MatchHit, ScanResult};
use crate::display::{DisplayTopology, FrameBuffer, ScreenSource};
use crate::error::{AutomationError, AutomationResult};
use image::{GrayImage, Luma, imageops};
use imageproc::definitions::Image;
use imageproc::integral_image::{integral_image, integral_squared_image, sum_image_pixels};

/// Smallest coarse template side worth matching; below this the pyramid is skipped
const MIN_COARSE_SIDE: u32 = 8;

/// Maximum of a correlation surface and the offset where it first occurs
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    pub x: u32,
    pub y: u32,
    pub score: f32,
}

/// Computes the correlation peak of one template over one frame
pub trait Correlator {
    fn peak(&self, frame: &FrameBuffer, template: &LoadedTemplate) -> AutomationResult<Peak>;
}

/// Zero-mean normalized cross-correlation (scores in [-1, 1]). Window sums
/// come from `imageproc` integral images; the cross term is accumulated in
/// integers so near-flat windows cannot round above 1.
#[derive(Clone, Debug)]
pub struct NccCorrelator {
    /// Downscale factor for the coarse pass; 1 searches every offset at full resolution
    pyramid_factor: u32,
}

impl NccCorrelator {
    pub fn new(pyramid_factor: u32) -> Self {
        Self {
            pyramid_factor: pyramid_factor.max(1),
        }
    }

    /// Exhaustive search, first-seen offset wins ties
    fn exhaustive(image: &GrayImage, template: &GrayImage) -> Option<Peak> {
        Self::max_finite(&zncc_surface(image, template))
    }

    fn max_finite(surface: &Image<Luma<f32>>) -> Option<Peak> {
        let mut best: Option<Peak> = None;
        for (x, y, pixel) in surface.enumerate_pixels() {
            let score = pixel[0];
            // Flat windows have no variance and produce NaN
            if !score.is_finite() {
                continue;
            }
            if best.is_none_or(|b| score > b.score) {
                best = Some(Peak { x, y, score });
            }
        }
        best
    }

    /// Find the peak on downscaled copies, then search the full-resolution
    /// neighbourhood of the coarse peak.
    fn coarse_to_fine(&self, image: &GrayImage, template: &GrayImage) -> Option<Peak> {
        let factor = self.pyramid_factor;
        let small_image = imageops::resize(
            image,
            image.width() / factor,
            image.height() / factor,
            imageops::FilterType::Triangle,
        );
        let small_template = imageops::resize(
            template,
            template.width() / factor,
            template.height() / factor,
            imageops::FilterType::Triangle,
        );
        let coarse = Self::exhaustive(&small_image, &small_template)?;

        let margin = factor * 2;
        let x0 = (coarse.x * factor).saturating_sub(margin);
        let y0 = (coarse.y * factor).saturating_sub(margin);
        let x1 = (coarse.x * factor + margin + template.width()).min(image.width());
        let y1 = (coarse.y * factor + margin + template.height()).min(image.height());
        if x1 - x0 < template.width() || y1 - y0 < template.height() {
            return Self::exhaustive(image, template);
        }

        let region = imageops::crop_imm(image, x0, y0, x1 - x0, y1 - y0).to_image();
        Self::exhaustive(&region, template).map(|fine| Peak {
            x: x0 + fine.x,
            y: y0 + fine.y,
            score: fine.score,
        })
    }
}

impl Default for NccCorrelator {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Correlator for NccCorrelator {
    fn peak(&self, frame: &FrameBuffer, template: &LoadedTemplate) -> AutomationResult<Peak> {
        let (frame_width, frame_height) = (frame.width(), frame.height());
        let (template_width, template_height) = (template.width(), template.height());
        if template_width > frame_width || template_height > frame_height {
            return Err(AutomationError::TemplateTooLarge {
                template: template.spec.display_name(),
                template_width,
                template_height,
                frame_width,
                frame_height,
            });
        }

        let factor = self.pyramid_factor;
        let peak = if factor > 1
            && template_width / factor >= MIN_COARSE_SIDE
            && template_height / factor >= MIN_COARSE_SIDE
        {
            self.coarse_to_fine(&frame.pixels, &template.pixels)
        } else {
            Self::exhaustive(&frame.pixels, &template.pixels)
        };

        peak.ok_or_else(|| AutomationError::CorrelationUndefined {
            template: template.spec.display_name(),
            display_index: frame.display_index,
        })
    }
}

/// Zero-mean NCC at every offset. Windows (or templates) with zero variance
/// score NaN. Output rows are split across scoped threads.
pub fn zncc_surface(image: &GrayImage, template: &GrayImage) -> Image<Luma<f32>> {
    let (template_width, template_height) = template.dimensions();
    let out_width = image.width() - template_width + 1;
    let out_height = image.height() - template_height + 1;
    let mut surface: Image<Luma<f32>> = Image::new(out_width, out_height);

    let n = i128::from(template_width) * i128::from(template_height);
    let template_sum: u64 = template.as_raw().iter().map(|&v| u64::from(v)).sum();
    let template_squares: u64 = template.as_raw().iter().map(|&v| u64::from(v).pow(2)).sum();
    let template_var = n * i128::from(template_squares) - i128::from(template_sum).pow(2);
    if template_var <= 0 {
        surface.pixels_mut().for_each(|p| *p = Luma([f32::NAN]));
        return surface;
    }

    let sums = integral_image::<_, u64>(image);
    let squares = integral_squared_image::<_, u64>(image);
    let stride = image.width() as usize;
    let (tw, th) = (template_width as usize, template_height as usize);
    let raw = image.as_raw();
    let template_raw = template.as_raw();

    let score_at = |x: u32, y: u32| -> f32 {
        let (right, bottom) = (x + template_width - 1, y + template_height - 1);
        let [window_sum] = sum_image_pixels(&sums, x, y, right, bottom);
        let [window_squares] = sum_image_pixels(&squares, x, y, right, bottom);
        let window_var = n * i128::from(window_squares) - i128::from(window_sum).pow(2);
        if window_var <= 0 {
            return f32::NAN;
        }

        let mut cross = 0u64;
        for dy in 0..th {
            let start = (y as usize + dy) * stride + x as usize;
            let row = &raw[start..start + tw];
            let template_row = &template_raw[dy * tw..(dy + 1) * tw];
            cross += row
                .iter()
                .zip(template_row)
                .map(|(&a, &b)| u64::from(a) * u64::from(b))
                .sum::<u64>();
        }

        let numerator = n * i128::from(cross) - i128::from(template_sum) * i128::from(window_sum);
        let denominator = (template_var as f64 * window_var as f64).sqrt();
        ((numerator as f64 / denominator) as f32).clamp(-1.0, 1.0)
    };

    let row_len = out_width as usize;
    let workers = std::thread::available_parallelism().map_or(1, |count| count.get());
    let band_rows = (out_height as usize).div_ceil(workers).max(1);
    std::thread::scope(|scope| {
        for (band, chunk) in surface.chunks_mut(band_rows * row_len).enumerate() {
            let score_at = &score_at;
            scope.spawn(move || {
                for (offset, row) in chunk.chunks_mut(row_len).enumerate() {
                    let y = (band * band_rows + offset) as u32;
                    for (x, out) in row.iter_mut().enumerate() {
                        *out = score_at(x as u32, y);
                    }
                }
            });
        }
    });
    surface
}

/// Strict-greater fold: the maximum score wins and ties keep the earliest candidate
pub fn select_best<I>(candidates: I) -> Option<MatchCandidate>
where
    I: IntoIterator<Item = MatchCandidate>,
{
    candidates
        .into_iter()
        .fold(None, |best: Option<MatchCandidate>, candidate| match best {
            Some(current) if candidate.score > current.score => Some(candidate),
            Some(current) => Some(current),
            None => Some(candidate),
        })
}

/// Captures every display and searches it for every template
pub struct MatchEngine<C: Correlator = NccCorrelator> {
    correlator: C,
    threshold: f32,
}

impl<C: Correlator> MatchEngine<C> {
    pub fn new(correlator: C, threshold: f32) -> Self {
        Self {
            correlator,
            threshold,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// One scan pass. Per-display capture failures and per-pair correlation
    /// failures are logged and skipped. `should_stop` is polled before every
    /// capture and every correlation; once it returns true the pass ends as a miss.
    pub fn scan_once<S: ScreenSource + ?Sized>(
        &self,
        screen: &mut S,
        topology: &DisplayTopology,
        templates: &[LoadedTemplate],
        should_stop: &dyn Fn() -> bool,
    ) -> ScanResult {
        if templates.is_empty() {
            return ScanResult::Miss;
        }

        let mut candidates = Vec::with_capacity(topology.len() * templates.len());
        let mut captured = 0usize;

        for (idx, rect) in topology.displays().iter().enumerate() {
            if should_stop() {
                return ScanResult::Miss;
            }
            let display_index = idx + 1;
            let frame = match screen.capture(display_index, rect) {
                Ok(frame) => frame,
                Err(e) => {
                    log::warn!("⚠️ {}", e);
                    continue;
                }
            };
            captured += 1;

            for (template_index, template) in templates.iter().enumerate() {
                if should_stop() {
                    return ScanResult::Miss;
                }
                match self.correlator.peak(&frame, template) {
                    Ok(peak) => candidates.push(MatchCandidate {
                        template_index,
                        display_index,
                        local_x: peak.x,
                        local_y: peak.y,
                        template_width: template.width(),
                        template_height: template.height(),
                        score: peak.score,
                    }),
                    Err(e @ AutomationError::CorrelationUndefined { .. }) => log::debug!("{}", e),
                    Err(e) => log::warn!("⚠️ matchTemplate failed: {}", e),
                }
            }
        }

        if captured == 0 {
            log::debug!("👀 No monitor could be captured this pass");
            return ScanResult::Miss;
        }

        let Some(best) = select_best(candidates) else {
            return ScanResult::Miss;
        };
        if best.score < self.threshold {
            log::debug!(
                "👀 Best score {:.3} below threshold {:.3}",
                best.score,
                self.threshold
            );
            return ScanResult::Miss;
        }

        self.to_hit(&best, topology, templates)
            .map_or(ScanResult::Miss, ScanResult::Hit)
    }

    fn to_hit(
        &self,
        best: &MatchCandidate,
        topology: &DisplayTopology,
        templates: &[LoadedTemplate],
    ) -> Option<MatchHit> {
        let rect = topology.get(best.display_index)?;
        let template = templates.get(best.template_index)?;
        let (center_x, center_y) = best.local_center();
        let (global_x, global_y) = rect.to_global(center_x, center_y);
        Some(MatchHit {
            template_identity: template.spec.identity(),
            template_name: template.spec.display_name(),
            group: template.spec.group.clone(),
            post_action: template.spec.post_action.clone(),
            display_index: best.display_index,
            global_x,
            global_y,
            score: best.score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DisplayRect;
    use crate::template_matching::types::TemplateSpec;
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// Screen that returns blank frames sized to the rectangle, failing on request
    struct FakeScreen {
        failing: Vec<usize>,
        captures: usize,
    }

    impl FakeScreen {
        fn new(failing: Vec<usize>) -> Self {
            Self { failing, captures: 0 }
        }
    }

    impl ScreenSource for FakeScreen {
        fn enumerate(&mut self) -> AutomationResult<DisplayTopology> {
            Ok(DisplayTopology::default())
        }

        fn capture(&mut self, display_index: usize, rect: &DisplayRect) -> AutomationResult<FrameBuffer> {
            self.captures += 1;
            if self.failing.contains(&display_index) {
                return Err(AutomationError::CaptureFailed {
                    display_index,
                    reason: "grab refused".to_string(),
                });
            }
            Ok(FrameBuffer {
                display_index,
                rect: *rect,
                pixels: GrayImage::new(4, 4),
            })
        }
    }

    /// Correlator returning scripted peaks keyed by (display_index, template name)
    struct ScriptedCorrelator {
        peaks: HashMap<(usize, String), Peak>,
    }

    impl Correlator for ScriptedCorrelator {
        fn peak(&self, frame: &FrameBuffer, template: &LoadedTemplate) -> AutomationResult<Peak> {
            self.peaks
                .get(&(frame.display_index, template.spec.display_name()))
                .copied()
                .ok_or_else(|| AutomationError::CorrelationUndefined {
                    template: template.spec.display_name(),
                    display_index: frame.display_index,
                })
        }
    }

    /// Correlator that raises the stop flag on its first call
    struct StoppingCorrelator {
        calls: Cell<usize>,
        stopped: Rc<Cell<bool>>,
    }

    impl Correlator for StoppingCorrelator {
        fn peak(&self, _frame: &FrameBuffer, _template: &LoadedTemplate) -> AutomationResult<Peak> {
            self.calls.set(self.calls.get() + 1);
            self.stopped.set(true);
            Ok(Peak { x: 0, y: 0, score: 0.99 })
        }
    }

    fn template(name: &str, width: u32, height: u32) -> LoadedTemplate {
        LoadedTemplate::new(
            TemplateSpec::new(format!("Folder_Type_A/{name}"), "Folder_Type_A", None),
            GrayImage::new(width, height),
        )
    }

    fn never() -> bool {
        false
    }

    fn peak(x: u32, y: u32, score: f32) -> Peak {
        Peak { x, y, score }
    }

    fn dual_monitors() -> DisplayTopology {
        DisplayTopology::new(vec![
            DisplayRect::new(0, 0, 1920, 1080),
            DisplayRect::new(1920, 0, 1920, 1080),
        ])
    }

    fn candidate(display_index: usize, template_index: usize, score: f32) -> MatchCandidate {
        MatchCandidate {
            template_index,
            display_index,
            local_x: 0,
            local_y: 0,
            template_width: 10,
            template_height: 10,
            score,
        }
    }

    #[test]
    fn test_select_best_takes_maximum() {
        let best = select_best(vec![
            candidate(1, 0, 0.40),
            candidate(1, 1, 0.91),
            candidate(2, 0, 0.87),
        ])
        .unwrap();
        assert_eq!((best.display_index, best.template_index), (1, 1));
    }

    #[test]
    fn test_select_best_ties_keep_first_seen() {
        let best = select_best(vec![
            candidate(1, 1, 0.90),
            candidate(2, 0, 0.90),
            candidate(2, 1, 0.90),
        ])
        .unwrap();
        assert_eq!((best.display_index, best.template_index), (1, 1));
        assert!(select_best(Vec::new()).is_none());
    }

    #[test]
    fn test_hit_on_second_display_translates_to_global() {
        let correlator = ScriptedCorrelator {
            peaks: HashMap::from([
                ((1, "button.png".to_string()), peak(500, 500, 0.31)),
                ((2, "button.png".to_string()), peak(100, 50, 0.92)),
            ]),
        };
        let engine = MatchEngine::new(correlator, 0.85);
        let mut screen = FakeScreen::new(vec![]);

        let result = engine.scan_once(&mut screen, &dual_monitors(), &[template("button.png", 40, 20)], &never);
        match result {
            ScanResult::Hit(hit) => {
                assert_eq!(hit.display_index, 2);
                assert_eq!((hit.global_x, hit.global_y), (2040, 60));
                assert_eq!(hit.score, 0.92);
                assert_eq!(hit.template_name, "button.png");
            }
            ScanResult::Miss => panic!("expected a hit"),
        }
    }

    #[test]
    fn test_center_uses_integer_truncation() {
        let correlator = ScriptedCorrelator {
            peaks: HashMap::from([((1, "odd.png".to_string()), peak(10, 20, 0.99))]),
        };
        let engine = MatchEngine::new(correlator, 0.85);
        let topology = DisplayTopology::new(vec![DisplayRect::new(-1280, 0, 1280, 1024)]);
        let result = engine.scan_once(&mut FakeScreen::new(vec![]), &topology, &[template("odd.png", 41, 15)], &never);
        let ScanResult::Hit(hit) = result else {
            panic!("expected a hit");
        };
        // 10 + 41/2 = 30, 20 + 15/2 = 27
        assert_eq!((hit.global_x, hit.global_y), (-1250, 27));
    }

    #[test]
    fn test_below_threshold_is_miss() {
        let correlator = ScriptedCorrelator {
            peaks: HashMap::from([
                ((1, "a.png".to_string()), peak(1, 1, 0.80)),
                ((2, "a.png".to_string()), peak(1, 1, 0.79)),
                ((1, "b.png".to_string()), peak(1, 1, 0.12)),
            ]),
        };
        let engine = MatchEngine::new(correlator, 0.85);
        let result = engine.scan_once(
            &mut FakeScreen::new(vec![]),
            &dual_monitors(),
            &[template("a.png", 4, 4), template("b.png", 4, 4)],
            &never,
        );
        assert_eq!(result, ScanResult::Miss);
    }

    #[test]
    fn test_score_equal_to_threshold_is_hit() {
        let correlator = ScriptedCorrelator {
            peaks: HashMap::from([((1, "a.png".to_string()), peak(0, 0, 0.85))]),
        };
        let engine = MatchEngine::new(correlator, 0.85);
        let result = engine.scan_once(
            &mut FakeScreen::new(vec![]),
            &dual_monitors(),
            &[template("a.png", 2, 2)],
            &never,
        );
        assert!(result.is_hit());
    }

    #[test]
    fn test_tie_across_displays_prefers_first_display() {
        let correlator = ScriptedCorrelator {
            peaks: HashMap::from([
                ((1, "a.png".to_string()), peak(0, 0, 0.95)),
                ((2, "a.png".to_string()), peak(0, 0, 0.95)),
            ]),
        };
        let engine = MatchEngine::new(correlator, 0.85);
        let result = engine.scan_once(
            &mut FakeScreen::new(vec![]),
            &dual_monitors(),
            &[template("a.png", 2, 2)],
            &never,
        );
        let ScanResult::Hit(hit) = result else {
            panic!("expected a hit");
        };
        assert_eq!(hit.display_index, 1);
    }

    #[test]
    fn test_empty_template_set_skips_capture() {
        let engine = MatchEngine::new(NccCorrelator::default(), 0.85);
        let mut screen = FakeScreen::new(vec![]);
        assert_eq!(engine.scan_once(&mut screen, &dual_monitors(), &[], &never), ScanResult::Miss);
        assert_eq!(screen.captures, 0);
    }

    #[test]
    fn test_failed_display_is_skipped() {
        let correlator = ScriptedCorrelator {
            peaks: HashMap::from([
                ((1, "a.png".to_string()), peak(0, 0, 0.99)),
                ((2, "a.png".to_string()), peak(4, 6, 0.90)),
            ]),
        };
        let engine = MatchEngine::new(correlator, 0.85);
        let mut screen = FakeScreen::new(vec![1]);
        let result = engine.scan_once(&mut screen, &dual_monitors(), &[template("a.png", 2, 2)], &never);
        let ScanResult::Hit(hit) = result else {
            panic!("expected a hit");
        };
        assert_eq!(hit.display_index, 2);
        assert_eq!(screen.captures, 2);
    }

    #[test]
    fn test_all_displays_failing_is_miss() {
        let correlator = ScriptedCorrelator {
            peaks: HashMap::from([((1, "a.png".to_string()), peak(0, 0, 0.99))]),
        };
        let engine = MatchEngine::new(correlator, 0.85);
        let mut screen = FakeScreen::new(vec![1, 2]);
        let result = engine.scan_once(&mut screen, &dual_monitors(), &[template("a.png", 2, 2)], &never);
        assert_eq!(result, ScanResult::Miss);
    }

    // Deterministic noise so correlation has a single sharp peak
    fn noise_frame(width: u32, height: u32, seed: u32) -> GrayImage {
        let mut state = seed;
        GrayImage::from_fn(width, height, |_, _| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            Luma([(state >> 16) as u8])
        })
    }

    fn frame_of(pixels: GrayImage) -> FrameBuffer {
        FrameBuffer {
            display_index: 1,
            rect: DisplayRect::new(0, 0, pixels.width(), pixels.height()),
            pixels,
        }
    }

    fn cut(image: &GrayImage, x: u32, y: u32, width: u32, height: u32) -> LoadedTemplate {
        LoadedTemplate::new(
            TemplateSpec::new("patch.png", "test", None),
            imageops::crop_imm(image, x, y, width, height).to_image(),
        )
    }

    #[test]
    fn test_ncc_finds_embedded_patch_exhaustive() {
        let frame = noise_frame(64, 48, 7);
        let template = cut(&frame, 23, 17, 16, 12);
        let found = NccCorrelator::new(1).peak(&frame_of(frame), &template).unwrap();
        assert_eq!((found.x, found.y), (23, 17));
        assert!(found.score > 0.999, "exact patch should score ~1.0, got {}", found.score);
    }

    #[test]
    fn test_ncc_pyramid_refines_to_exact_offset() {
        let frame = noise_frame(128, 96, 42);
        let template = cut(&frame, 40, 30, 32, 24);
        let found = NccCorrelator::new(2).peak(&frame_of(frame), &template).unwrap();
        assert_eq!((found.x, found.y), (40, 30));
        assert!(found.score > 0.999);
    }

    #[test]
    fn test_ncc_rejects_template_larger_than_frame() {
        let frame = frame_of(noise_frame(10, 10, 1));
        let template = LoadedTemplate::new(TemplateSpec::new("big.png", "test", None), noise_frame(12, 4, 2));
        match NccCorrelator::new(1).peak(&frame, &template) {
            Err(AutomationError::TemplateTooLarge { frame_width, .. }) => assert_eq!(frame_width, 10),
            other => panic!("expected TemplateTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_stop_request_skips_remaining_pairs() {
        let stopped = Rc::new(Cell::new(false));
        let correlator = StoppingCorrelator {
            calls: Cell::new(0),
            stopped: stopped.clone(),
        };
        let engine = MatchEngine::new(correlator, 0.85);
        let mut screen = FakeScreen::new(vec![]);

        let result = engine.scan_once(
            &mut screen,
            &dual_monitors(),
            &[template("a.png", 2, 2), template("b.png", 2, 2)],
            &|| stopped.get(),
        );

        // The pair correlated before the stop does not turn into a click
        assert_eq!(result, ScanResult::Miss);
        assert_eq!(engine.correlator.calls.get(), 1);
        assert_eq!(screen.captures, 1);
    }

    #[test]
    fn test_stop_before_pass_captures_nothing() {
        let engine = MatchEngine::new(NccCorrelator::default(), 0.85);
        let mut screen = FakeScreen::new(vec![]);
        let result = engine.scan_once(&mut screen, &dual_monitors(), &[template("a.png", 2, 2)], &|| true);
        assert_eq!(result, ScanResult::Miss);
        assert_eq!(screen.captures, 0);
    }

    // Dark border around light and mid-grey stripes
    fn striped_button(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            if x < 2 || y < 2 || x >= width - 2 || y >= height - 2 {
                Luma([0])
            } else if (x / 4) % 2 == 0 {
                Luma([255])
            } else {
                Luma([200])
            }
        })
    }

    #[test]
    fn test_ncc_flat_frame_never_reaches_threshold() {
        let template = LoadedTemplate::new(TemplateSpec::new("button.png", "test", None), striped_button(64, 32));
        let flat = frame_of(GrayImage::from_pixel(320, 200, Luma([128])));

        match NccCorrelator::new(1).peak(&flat, &template) {
            Err(AutomationError::CorrelationUndefined { .. }) => {}
            other => panic!("flat frame must have no defined score, got {:?}", other),
        }

        let mut almost_flat = GrayImage::from_pixel(320, 200, Luma([128]));
        almost_flat.put_pixel(100, 60, Luma([129]));
        let found = NccCorrelator::new(1).peak(&frame_of(almost_flat), &template).unwrap();
        assert!(found.score < 0.85, "near-flat frame scored {}", found.score);
    }

    #[test]
    fn test_ncc_inverted_contrast_is_rejected() {
        let frame = noise_frame(64, 48, 7);
        let template = cut(&frame, 23, 17, 16, 12);
        let mut inverted = frame.clone();
        imageops::invert(&mut inverted);

        let found = NccCorrelator::new(1).peak(&frame_of(inverted), &template).unwrap();
        assert!(found.score < 0.85, "inverted frame scored {}", found.score);
    }

    #[test]
    fn test_ncc_ignores_brightness_and_contrast_change() {
        let frame = noise_frame(64, 48, 7);
        let template = cut(&frame, 23, 17, 16, 12);
        let dimmed = GrayImage::from_fn(64, 48, |x, y| Luma([frame.get_pixel(x, y)[0] / 2 + 100]));

        let found = NccCorrelator::new(1).peak(&frame_of(dimmed), &template).unwrap();
        assert_eq!((found.x, found.y), (23, 17));
        assert!(found.score > 0.99, "rescaled patch should still match, got {}", found.score);
    }

    #[test]
    fn test_zncc_surface_scores_stay_in_range() {
        let frame = noise_frame(40, 30, 3);
        let template = cut(&frame, 5, 5, 8, 6);
        let surface = zncc_surface(&frame, &template.pixels);
        assert_eq!(surface.dimensions(), (33, 25));
        assert!(surface.pixels().all(|p| (-1.0..=1.0).contains(&p[0])));
        assert_eq!(surface.get_pixel(5, 5)[0], 1.0);
    }
}
