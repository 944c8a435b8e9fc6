//! Geometric utilities for text-line regions.
//!
//! This module provides the point and polygon types used to describe ALTO
//! line shapes, the bounding-rectangle computation used for cropping, and the
//! scanline buffer used to rasterize polygons.

use crate::core::errors::PolygonError;
use imageproc::rect::Rect;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point {
    /// X-coordinate of the point.
    pub x: f32,
    /// Y-coordinate of the point.
    pub y: f32,
}

impl Point {
    /// Creates a new point with the given coordinates.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A closed polygon given by its vertices in order.
///
/// The closing edge from the last vertex back to the first is implicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// The vertices of the polygon.
    pub points: Vec<Point>,
}

impl Polygon {
    /// Creates a new polygon from a vector of points.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Parses an ALTO `POINTS` attribute.
    ///
    /// The attribute is a flat list of integers grouped pairwise into `(x, y)`
    /// vertices in the order given. Both `"0 0 10 0 10 10"` and
    /// `"0,0 10,0 10,10"` are accepted.
    ///
    /// # Errors
    ///
    /// * [`PolygonError::InvalidCoordinate`] if a token is not an integer
    /// * [`PolygonError::TooFewPoints`] if fewer than six integers are given
    /// * [`PolygonError::OddCoordinateCount`] if the integers cannot be paired
    pub fn parse_points(points: &str) -> Result<Self, PolygonError> {
        let coords = points
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<i32>()
                    .map_err(|_| PolygonError::InvalidCoordinate {
                        token: token.to_string(),
                    })
            })
            .collect::<Result<Vec<i32>, _>>()?;

        if coords.len() < 6 {
            return Err(PolygonError::TooFewPoints {
                count: coords.len() / 2,
            });
        }
        if coords.len() % 2 != 0 {
            return Err(PolygonError::OddCoordinateCount {
                count: coords.len(),
            });
        }

        let points = coords
            .into_iter()
            .tuples()
            .map(|(x, y)| Point::new(x as f32, y as f32))
            .collect();
        Ok(Self { points })
    }

    /// Gets the minimum x-coordinate of all vertices, or 0.0 if there are none.
    pub fn x_min(&self) -> f32 {
        if self.points.is_empty() {
            return 0.0;
        }
        self.points
            .iter()
            .map(|p| p.x)
            .fold(f32::INFINITY, f32::min)
    }

    /// Gets the minimum y-coordinate of all vertices, or 0.0 if there are none.
    pub fn y_min(&self) -> f32 {
        if self.points.is_empty() {
            return 0.0;
        }
        self.points
            .iter()
            .map(|p| p.y)
            .fold(f32::INFINITY, f32::min)
    }

    /// Gets the maximum x-coordinate of all vertices, or 0.0 if there are none.
    pub fn x_max(&self) -> f32 {
        if self.points.is_empty() {
            return 0.0;
        }
        self.points
            .iter()
            .map(|p| p.x)
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Gets the maximum y-coordinate of all vertices, or 0.0 if there are none.
    pub fn y_max(&self) -> f32 {
        if self.points.is_empty() {
            return 0.0;
        }
        self.points
            .iter()
            .map(|p| p.y)
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Returns the axis-aligned bounding rectangle of the vertices.
    ///
    /// The rectangle spans `[x_min, x_max) x [y_min, y_max)`, so a square with
    /// corners at 0 and 10 is 10 pixels wide. Returns `None` when the polygon
    /// has no area along either axis or does not fit an `i32` origin.
    pub fn bounding_rect(&self) -> Option<Rect> {
        let (left, top, right, bottom) = self.extents()?;
        Self::rect_from_extents(left, top, right, bottom)
    }

    /// Returns the bounding rectangle clipped to a `width` x `height` page.
    ///
    /// Returns `None` when the polygon lies entirely outside the page.
    pub fn clipped_rect(&self, width: u32, height: u32) -> Option<Rect> {
        let (left, top, right, bottom) = self.extents()?;
        let (width, height) = (i64::from(width), i64::from(height));
        Self::rect_from_extents(
            left.clamp(0, width),
            top.clamp(0, height),
            right.clamp(0, width),
            bottom.clamp(0, height),
        )
    }

    /// Integer extents `(left, top, right, bottom)` of the vertices.
    ///
    /// Computed in `i64` so the span of any two `i32` coordinates fits.
    fn extents(&self) -> Option<(i64, i64, i64, i64)> {
        if self.points.is_empty() {
            return None;
        }
        Some((
            self.x_min().floor() as i64,
            self.y_min().floor() as i64,
            self.x_max().ceil() as i64,
            self.y_max().ceil() as i64,
        ))
    }

    fn rect_from_extents(left: i64, top: i64, right: i64, bottom: i64) -> Option<Rect> {
        let width = u32::try_from(right - left).ok().filter(|w| *w > 0)?;
        let height = u32::try_from(bottom - top).ok().filter(|h| *h > 0)?;
        let left = i32::try_from(left).ok()?;
        let top = i32::try_from(top).ok()?;
        Some(Rect::at(left, top).of_size(width, height))
    }
}

/// A buffer for processing scanlines in polygon rasterization.
pub(crate) struct ScanlineBuffer {
    /// Intersections of the scanline with polygon edges.
    pub(crate) intersections: Vec<f32>,
}

impl ScanlineBuffer {
    /// Creates a new scanline buffer with the specified capacity.
    ///
    /// # Arguments
    ///
    /// * `max_polygon_points` - The maximum number of polygon points, used to pre-allocate memory.
    pub(crate) fn new(max_polygon_points: usize) -> Self {
        Self {
            intersections: Vec::with_capacity(max_polygon_points),
        }
    }

    /// Finds the x-coordinates where the horizontal line at `y` crosses the
    /// polygon edges, sorted ascending.
    ///
    /// Consecutive pairs of the returned slice delimit the spans of the line
    /// that are inside the polygon under the even-odd rule.
    pub(crate) fn intersections_at(&mut self, y: f32, polygon: &Polygon) -> &[f32] {
        self.intersections.clear();

        let n = polygon.points.len();
        for i in 0..n {
            let j = (i + 1) % n;
            let p1 = &polygon.points[i];
            let p2 = &polygon.points[j];

            // Half-open test so a vertex on the scanline is counted once
            if ((p1.y <= y && y < p2.y) || (p2.y <= y && y < p1.y))
                && (p2.y - p1.y).abs() > f32::EPSILON
            {
                let x = p1.x + (y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y);
                self.intersections.push(x);
            }
        }

        self.intersections
            .sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        &self.intersections
    }
}
