use indexmap::IndexMap;

use crate::error::DashResult;
use crate::render::Color;

/// Evenly spaced viridis anchors, interpolated linearly in RGB.
const VIRIDIS_STOPS: [&str; 9] = [
    "#440154", "#472d7b", "#3b528b", "#2c728e", "#21908c", "#27ad81", "#5dc863", "#aadc32",
    "#fde725",
];

/// Ordinal color lookup with an explicit fallback for unlisted categories.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPalette {
    entries: IndexMap<String, Color>,
    fallback: Color,
}

impl CategoryPalette {
    #[must_use]
    pub fn new(fallback: Color) -> Self {
        Self {
            entries: IndexMap::new(),
            fallback,
        }
    }

    /// Builds a palette from `(category, "#rrggbb")` pairs.
    pub fn from_hex<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
        fallback_hex: &str,
    ) -> DashResult<Self> {
        let mut palette = Self::new(Color::from_hex(fallback_hex)?);
        for (category, hex) in pairs {
            palette
                .entries
                .insert(category.to_owned(), Color::from_hex(hex)?);
        }
        Ok(palette)
    }

    /// Experience-level colors shared by the histogram bars and legend.
    pub fn experience_levels() -> DashResult<Self> {
        Self::from_hex(
            [
                ("EN", "#ff6361"),
                ("MI", "#ffa600"),
                ("SE", "#58508d"),
                ("EX", "#bc5090"),
            ],
            "#bc5090",
        )
    }

    /// Company-size colors for the line chart.
    pub fn company_sizes() -> DashResult<Self> {
        Self::from_hex([("S", "#0000ff"), ("M", "#ff0000"), ("L", "#008000")], "#808080")
    }

    #[must_use]
    pub fn color(&self, category: &str) -> Color {
        self.entries.get(category).copied().unwrap_or(self.fallback)
    }

    #[must_use]
    pub fn fallback(&self) -> Color {
        self.fallback
    }

    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.entries.contains_key(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Continuous color ramp over a numeric domain.
///
/// Inputs are normalized to `[0, 1]` and clamped. A flat domain maps to the
/// middle of the ramp; non-finite inputs take `unknown`.
#[derive(Debug, Clone, PartialEq)]
pub struct SequentialPalette {
    domain: (f64, f64),
    stops: Vec<Color>,
    unknown: Color,
}

impl SequentialPalette {
    pub fn viridis(domain: (f64, f64)) -> DashResult<Self> {
        let stops = VIRIDIS_STOPS
            .iter()
            .map(|hex| Color::from_hex(hex))
            .collect::<DashResult<Vec<_>>>()?;
        Ok(Self {
            domain,
            stops,
            unknown: Color::from_rgb8(0x80, 0x80, 0x80),
        })
    }

    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    #[must_use]
    pub fn unknown(&self) -> Color {
        self.unknown
    }

    /// Color at normalized position `t` in `[0, 1]`.
    #[must_use]
    pub fn interpolate(&self, t: f64) -> Color {
        if !t.is_finite() {
            return self.unknown;
        }
        let last = self.stops.len() - 1;
        let scaled = t.clamp(0.0, 1.0) * last as f64;
        let index = (scaled.floor() as usize).min(last.saturating_sub(1));
        self.stops[index].lerp(self.stops[index + 1], scaled - index as f64)
    }

    #[must_use]
    pub fn color(&self, value: f64) -> Color {
        if !value.is_finite() {
            return self.unknown;
        }
        let (start, end) = self.domain;
        let span = end - start;
        let t = if span == 0.0 {
            0.5
        } else {
            (value - start) / span
        };
        self.interpolate(t)
    }

    /// `count + 1` evenly spaced colors across the domain, for gradient legends.
    #[must_use]
    pub fn gradient_stops(&self, count: usize) -> Vec<Color> {
        let count = count.max(1);
        (0..=count)
            .map(|step| self.interpolate(step as f64 / count as f64))
            .collect()
    }
}
