//! Pixel/data translation for the two scatter plots.
//!
//! Pixel coordinates are relative to the plot's outer frame, with the origin at the
//! top-left corner. The drawable area is the frame minus its margin, and the Y axis
//! is inverted so larger data values sit higher on screen.

use cytogate_core::models::{Coord, Plot};
use serde::{Deserialize, Serialize};

/// Linear mapping from a data domain onto a pixel range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    pub domain: [f64; 2],
    pub range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    /// Map a data value to pixels
    pub fn apply(&self, value: f64) -> f64 {
        interpolate(value, self.domain, self.range)
    }

    /// Map a pixel position back to data
    pub fn invert(&self, pixel: f64) -> f64 {
        interpolate(pixel, self.range, self.domain)
    }
}

fn interpolate(value: f64, from: [f64; 2], to: [f64; 2]) -> f64 {
    let span = from[1] - from[0];
    if span == 0.0 {
        return to[0];
    }
    to[0] + (value - from[0]) / span * (to[1] - to[0])
}

/// Space reserved around the drawable area for axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self { top: 20.0, right: 20.0, bottom: 30.0, left: 40.0 }
    }
}

/// Outer pixel size of one plot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotFrame {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Default for PlotFrame {
    fn default() -> Self {
        Self { width: 400.0, height: 400.0, margin: Margin::default() }
    }
}

impl PlotFrame {
    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn inner_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    /// Whether a click lands inside the margin-adjusted drawable rectangle
    pub fn contains_pixel(&self, pixel: Coord) -> bool {
        let [x, y] = pixel;
        x >= self.margin.left
            && x <= self.width - self.margin.right
            && y >= self.margin.top
            && y <= self.height - self.margin.bottom
    }
}

/// Scales for plot A and plot B, which share the Y measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotLayout {
    pub frame: PlotFrame,
    pub a_x_domain: [f64; 2],
    pub b_x_domain: [f64; 2],
    pub y_domain: [f64; 2],
}

impl Default for PlotLayout {
    fn default() -> Self {
        Self {
            frame: PlotFrame::default(),
            a_x_domain: [200.0, 1000.0],
            b_x_domain: [0.0, 1000.0],
            y_domain: [0.0, 1000.0],
        }
    }
}

impl PlotLayout {
    pub fn x_scale(&self, plot: Plot) -> LinearScale {
        let domain = match plot {
            Plot::A => self.a_x_domain,
            Plot::B => self.b_x_domain,
        };
        let margin = &self.frame.margin;
        LinearScale::new(domain, [margin.left, self.frame.width - margin.right])
    }

    pub fn y_scale(&self) -> LinearScale {
        let margin = &self.frame.margin;
        LinearScale::new(self.y_domain, [self.frame.height - margin.bottom, margin.top])
    }

    /// Project a data coordinate of the given plot into pixels
    pub fn to_pixel(&self, plot: Plot, data: Coord) -> Coord {
        [self.x_scale(plot).apply(data[0]), self.y_scale().apply(data[1])]
    }

    /// Translate a click into data space, or `None` if it misses the drawable area
    pub fn to_data(&self, plot: Plot, pixel: Coord) -> Option<Coord> {
        if !self.frame.contains_pixel(pixel) {
            return None;
        }
        Some([self.x_scale(plot).invert(pixel[0]), self.y_scale().invert(pixel[1])])
    }
}
