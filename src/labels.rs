//! Label planning
//!
//! Decides which landmasses get a name, which size class the name is set
//! in, and where its text box lands on the canvas. Planning never touches
//! pixels; the renderer supplies a line-measuring closure so these
//! decisions stay independent of any particular font backend.

use rand_chacha::ChaCha8Rng;

use crate::config::MapConfig;
use crate::landmass::Landmass;
use crate::names::{NamePool, PoolExhausted};

/// Size class of a labeled landmass, driving its font metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeTier {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl SizeTier {
    /// Ascending classification order.
    pub const ALL: [SizeTier; 4] = [
        SizeTier::Small,
        SizeTier::Medium,
        SizeTier::Large,
        SizeTier::ExtraLarge,
    ];

    /// Upper area bound for this tier, as a fraction of total map area.
    fn area_fraction(self) -> f64 {
        match self {
            SizeTier::Small => 0.005,
            SizeTier::Medium => 0.01,
            SizeTier::Large => 0.05,
            SizeTier::ExtraLarge => 0.1,
        }
    }

    fn font_fraction(self) -> f64 {
        match self {
            SizeTier::Small => 0.02,
            SizeTier::Medium => 0.025,
            SizeTier::Large => 0.03,
            SizeTier::ExtraLarge => 0.06,
        }
    }

    /// Classify a landmass by cell count against the ascending area
    /// thresholds; anything past the last one is still ExtraLarge.
    pub fn classify(cells: usize, map_area: usize) -> SizeTier {
        for tier in SizeTier::ALL {
            if cells < (tier.area_fraction() * map_area as f64) as usize {
                return tier;
            }
        }
        SizeTier::ExtraLarge
    }

    /// Label font height in pixels for a given map side length.
    pub fn font_px(self, map_size: usize) -> u32 {
        ((self.font_fraction() * map_size as f64) as u32).max(1)
    }

    /// Extra pixels between the lines of a multi-line label.
    pub fn line_spacing(self, map_size: usize) -> i32 {
        (0.15 * self.font_px(map_size) as f64) as i32
    }

    /// Thickness of the white outline behind the label text.
    pub fn outline_px(self, map_size: usize) -> i32 {
        (0.05 * self.font_px(map_size) as f64) as i32
    }
}

/// A planned label: what to draw, in which size class, and where.
#[derive(Clone, Debug)]
pub struct LabelPlacement {
    pub name: String,
    pub tier: SizeTier,
    /// Top-left corner of the text box after centering and clamping.
    pub anchor: (i32, i32),
    /// Width and height of the text box.
    pub text_size: (i32, i32),
}

/// Plan a label for every landmass big enough to carry one.
///
/// Landmasses are processed in discovery order, which is what keeps name
/// assignment reproducible for a fixed seed. The minimum-size filter
/// compares cell count against half the map side length — cells against a
/// length, exactly as the tuning expects.
pub fn plan_labels(
    landmasses: &[Landmass],
    pool: &mut NamePool,
    cfg: &MapConfig,
    rng: &mut ChaCha8Rng,
    measure_line: &dyn Fn(&str, u32) -> i32,
) -> Result<Vec<LabelPlacement>, PoolExhausted> {
    let mut placements = Vec::new();

    for landmass in landmasses {
        if landmass.area() as f64 <= 0.5 * cfg.size as f64 {
            continue;
        }

        let tier = SizeTier::classify(landmass.area(), cfg.area());
        let name = pool.draw_unique(rng)?;

        let px = tier.font_px(cfg.size);
        let spacing = tier.line_spacing(cfg.size);
        let text_size = multiline_size(&name, px, spacing, measure_line);

        let (cx, cy) = landmass.centroid();
        let anchor = (cx as i32 - text_size.0 / 2, cy as i32 - text_size.1 / 2);
        let anchor = clamp_anchor(anchor, text_size, cfg.size as i32);

        placements.push(LabelPlacement {
            name,
            tier,
            anchor,
            text_size,
        });
    }

    Ok(placements)
}

/// Bounding box of a multi-line label: widest line by total line height,
/// with spacing between consecutive lines.
fn multiline_size(
    text: &str,
    px: u32,
    spacing: i32,
    measure_line: &dyn Fn(&str, u32) -> i32,
) -> (i32, i32) {
    let mut width = 0;
    let mut lines = 0;
    for line in text.lines() {
        width = width.max(measure_line(line, px));
        lines += 1;
    }
    let height = lines * px as i32 + (lines - 1).max(0) * spacing;
    (width, height)
}

/// Shift the anchor so the text box stays inside [0, map) on both axes.
///
/// Shifting never resizes the text; a box that cannot fit is pinned to the
/// low edge (the low-edge check runs first and wins).
fn clamp_anchor(anchor: (i32, i32), text_size: (i32, i32), map: i32) -> (i32, i32) {
    let clamp_axis = |start: i32, len: i32| {
        if start < 0 {
            0
        } else if start + len > map {
            start - (start + len - map)
        } else {
            start
        }
    };
    (
        clamp_axis(anchor.0, text_size.0),
        clamp_axis(anchor.1, text_size.1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    // Half a font-height per character, like a narrow monospace face.
    fn fake_measure(line: &str, px: u32) -> i32 {
        line.chars().count() as i32 * px as i32 / 2
    }

    fn strip(width: usize, y: usize) -> Landmass {
        Landmass {
            cells: (0..width).map(|x| (x + 20, y)).collect(),
        }
    }

    #[test]
    fn test_classify_tier_boundaries() {
        let area = 1_000_000; // side 1000
        assert_eq!(SizeTier::classify(4_999, area), SizeTier::Small);
        assert_eq!(SizeTier::classify(5_000, area), SizeTier::Medium);
        assert_eq!(SizeTier::classify(9_999, area), SizeTier::Medium);
        assert_eq!(SizeTier::classify(10_000, area), SizeTier::Large);
        assert_eq!(SizeTier::classify(49_999, area), SizeTier::Large);
        assert_eq!(SizeTier::classify(50_000, area), SizeTier::ExtraLarge);
        // Past every threshold is still ExtraLarge.
        assert_eq!(SizeTier::classify(500_000, area), SizeTier::ExtraLarge);
    }

    #[test]
    fn test_font_metrics_scale_with_map_side() {
        assert_eq!(SizeTier::Small.font_px(1000), 20);
        assert_eq!(SizeTier::Medium.font_px(1000), 25);
        assert_eq!(SizeTier::Large.font_px(1000), 30);
        assert_eq!(SizeTier::ExtraLarge.font_px(1000), 60);
        assert_eq!(SizeTier::Small.line_spacing(1000), 3);
        assert_eq!(SizeTier::ExtraLarge.line_spacing(1000), 9);
        assert_eq!(SizeTier::Small.outline_px(1000), 1);
        assert_eq!(SizeTier::ExtraLarge.outline_px(1000), 3);
    }

    #[test]
    fn test_clamp_anchor() {
        // Inside: untouched.
        assert_eq!(clamp_anchor((10, 10), (20, 20), 100), (10, 10));
        // Off the low edge: pinned to zero.
        assert_eq!(clamp_anchor((-5, 10), (20, 20), 100), (0, 10));
        // Off the high edge: shifted back just enough.
        assert_eq!(clamp_anchor((95, 90), (20, 20), 100), (80, 80));
        // Wider than the map: the low edge wins.
        assert_eq!(clamp_anchor((-10, 0), (120, 20), 100), (0, 0));
    }

    #[test]
    fn test_multiline_box() {
        let measure = fake_measure;
        // Single line: height is one font height.
        assert_eq!(multiline_size("Skull Rock", 20, 3, &measure), (100, 20));
        // Two lines: widest line wins, one spacing gap.
        let size = multiline_size("Isle of\nBroken Masts", 20, 3, &measure);
        assert_eq!(size, (120, 43));
    }

    #[test]
    fn test_small_landmasses_are_skipped() {
        let cfg = MapConfig::new(100, 0).unwrap();
        let mut pool = NamePool::parse("a\nb\nc");
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        // 50 cells is not strictly more than half the side length.
        let landmasses = vec![strip(50, 40)];
        let placements =
            plan_labels(&landmasses, &mut pool, &cfg, &mut rng, &fake_measure).unwrap();
        assert!(placements.is_empty());
        assert_eq!(pool.remaining(), 3);
    }

    #[test]
    fn test_placements_follow_discovery_order_with_unique_names() {
        let cfg = MapConfig::new(100, 0).unwrap();
        let mut pool = NamePool::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let landmasses = vec![strip(60, 10), strip(55, 50), strip(70, 90)];
        let placements =
            plan_labels(&landmasses, &mut pool, &cfg, &mut rng, &fake_measure).unwrap();

        assert_eq!(placements.len(), 3);
        assert_ne!(placements[0].name, placements[1].name);
        assert_ne!(placements[1].name, placements[2].name);
        assert_ne!(placements[0].name, placements[2].name);

        // Anchors track the landmasses in input order.
        assert!(placements[0].anchor.1 < placements[1].anchor.1);
        assert!(placements[1].anchor.1 < placements[2].anchor.1);
    }

    #[test]
    fn test_boxes_stay_on_canvas() {
        let cfg = MapConfig::new(100, 0).unwrap();
        let mut pool = NamePool::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        // Strips hugging the top and bottom edges force clamping.
        let landmasses = vec![strip(60, 0), strip(60, 99), strip(60, 45)];
        let placements =
            plan_labels(&landmasses, &mut pool, &cfg, &mut rng, &fake_measure).unwrap();

        for p in &placements {
            assert!(p.anchor.0 >= 0);
            assert!(p.anchor.1 >= 0);
            assert!(p.anchor.0 + p.text_size.0 <= 100);
            assert!(p.anchor.1 + p.text_size.1 <= 100);
        }
    }

    #[test]
    fn test_pool_exhaustion_surfaces_as_error() {
        let cfg = MapConfig::new(100, 0).unwrap();
        let mut pool = NamePool::parse("only");
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let landmasses = vec![strip(60, 20), strip(60, 70)];
        let err = plan_labels(&landmasses, &mut pool, &cfg, &mut rng, &fake_measure).unwrap_err();
        assert_eq!(err.pool_size, 1);
    }
}
