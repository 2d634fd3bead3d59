//! Elevation-to-color quantization
//!
//! The palette is a fixed table of 100 stops assembled from seven named
//! bands (three water depths, beach, forest, mountain, peak). Elevation is
//! truncated into a bucket index and clamped into the table, so values far
//! outside [0, 1] still map to the nearest end of the palette.

/// Total number of stops in every gradient.
pub const BUCKETS: usize = 100;

/// One band of the palette: a start/end color pair expanded into `len`
/// stops by HSL interpolation.
struct GradientBand {
    name: &'static str,
    start: [u8; 3],
    end: [u8; 3],
    len: usize,
}

const TERRAIN_BANDS: [GradientBand; 7] = [
    GradientBand { name: "water1",   start: [0x3e, 0xb5, 0xff], end: [0x3e, 0xb5, 0xff], len: 15 },
    GradientBand { name: "water2",   start: [0x3e, 0xb5, 0xff], end: [0x67, 0xd6, 0xff], len: 15 },
    GradientBand { name: "water3",   start: [0x67, 0xd6, 0xff], end: [0xcf, 0xee, 0xfc], len: 10 },
    GradientBand { name: "beach",    start: [0xf2, 0xe9, 0xda], end: [0x70, 0xbf, 0x48], len: 20 },
    GradientBand { name: "forest",   start: [0x70, 0xbf, 0x48], end: [0x00, 0x75, 0x17], len: 20 },
    GradientBand { name: "mountain", start: [0x00, 0x75, 0x17], end: [0x1a, 0x11, 0x00], len: 10 },
    GradientBand { name: "peak",     start: [0x29, 0x27, 0x27], end: [0x29, 0x27, 0x27], len: 10 },
];

/// A fully expanded 100-stop color table.
pub struct ColorGradient {
    stops: Vec<[u8; 3]>,
}

impl ColorGradient {
    /// The island terrain palette.
    pub fn terrain() -> Self {
        Self::from_bands(&TERRAIN_BANDS)
    }

    /// White-to-black elevation preview palette.
    pub fn grayscale() -> Self {
        Self::from_bands(&[GradientBand {
            name: "grayscale",
            start: [0xff, 0xff, 0xff],
            end: [0x00, 0x00, 0x00],
            len: BUCKETS,
        }])
    }

    fn from_bands(bands: &[GradientBand]) -> Self {
        let mut stops = Vec::with_capacity(BUCKETS);
        for band in bands {
            let (h0, s0, l0) = rgb_to_hsl(band.start);
            let (h1, s1, l1) = rgb_to_hsl(band.end);
            for i in 0..band.len {
                let t = if band.len > 1 {
                    i as f32 / (band.len - 1) as f32
                } else {
                    0.0
                };
                stops.push(hsl_to_rgb(
                    lerp(h0, h1, t),
                    lerp(s0, s1, t),
                    lerp(l0, l1, t),
                ));
            }
            assert!(
                stops.len() <= BUCKETS,
                "gradient band '{}' overflows the {}-stop table",
                band.name,
                BUCKETS
            );
        }
        assert_eq!(
            stops.len(),
            BUCKETS,
            "gradient bands must expand to exactly {} stops",
            BUCKETS
        );
        Self { stops }
    }

    /// Look up the color for an elevation value.
    ///
    /// Bucket index is trunc(elevation * 100) clamped into the table, so the
    /// mapping is total over all reals.
    pub fn color_for(&self, elevation: f64) -> [u8; 3] {
        let bucket = (elevation * BUCKETS as f64) as i64;
        self.stops[bucket.clamp(0, BUCKETS as i64 - 1) as usize]
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn rgb_to_hsl(rgb: [u8; 3]) -> (f32, f32, f32) {
    let r = rgb[0] as f32 / 255.0;
    let g = rgb[1] as f32 / 255.0;
    let b = rgb[2] as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let d = max - min;

    if d == 0.0 {
        return (0.0, 0.0, l);
    }

    let s = d / (1.0 - (2.0 * l - 1.0).abs());
    let h = if max == r {
        60.0 * (((g - b) / d).rem_euclid(6.0))
    } else if max == g {
        60.0 * ((b - r) / d + 2.0)
    } else {
        60.0 * ((r - g) / d + 4.0)
    };

    (h, s, l)
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [u8; 3] {
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    ]
}
