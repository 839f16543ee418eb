//! Shape pattern parameters
//!
//! Describes the point arrangement a shape resolver builds.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_RADIUS, MAX_ROTATION_DEGREES_PER_SECOND};
use crate::error::PatternError;

/// Geometry kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Geometry {
    #[default]
    Circle,
    Line,
    Arc,
    NGon,
    /// Star/gear: vertices alternate between max and min radius
    NGonComplex,
}

/// Authoring ranges for one geometry kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryLimits {
    pub min_points: u32,
    pub max_points: u32,
    /// Point count must be even
    pub even_points: bool,
    pub max_subdivisions: u32,
    pub max_spread_degrees: f32,
}

impl Geometry {
    pub const ALL: [Geometry; 5] = [
        Geometry::Circle,
        Geometry::Line,
        Geometry::Arc,
        Geometry::NGon,
        Geometry::NGonComplex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Geometry::Circle => "circle",
            Geometry::Line => "line",
            Geometry::Arc => "arc",
            Geometry::NGon => "n-gon",
            Geometry::NGonComplex => "n-gon-complex",
        }
    }

    pub fn limits(&self) -> GeometryLimits {
        match self {
            Geometry::Circle => GeometryLimits {
                min_points: 1,
                max_points: 20,
                even_points: false,
                max_subdivisions: 0,
                max_spread_degrees: 360.0,
            },
            Geometry::Line => GeometryLimits {
                min_points: 2,
                max_points: 2,
                even_points: false,
                max_subdivisions: 10,
                max_spread_degrees: 180.0,
            },
            Geometry::Arc => GeometryLimits {
                min_points: 2,
                max_points: 10,
                even_points: false,
                max_subdivisions: 10,
                max_spread_degrees: 180.0,
            },
            Geometry::NGon => GeometryLimits {
                min_points: 3,
                max_points: 20,
                even_points: false,
                max_subdivisions: 12,
                max_spread_degrees: 360.0,
            },
            Geometry::NGonComplex => GeometryLimits {
                min_points: 6,
                max_points: 20,
                even_points: true,
                max_subdivisions: 0,
                max_spread_degrees: 360.0,
            },
        }
    }
}

impl FromStr for Geometry {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "circle" => Ok(Geometry::Circle),
            "line" => Ok(Geometry::Line),
            "arc" => Ok(Geometry::Arc),
            "n-gon" | "ngon" | "n-sided" => Ok(Geometry::NGon),
            "n-gon-complex" | "ngon-complex" | "n-sided-complex" | "star" => {
                Ok(Geometry::NGonComplex)
            }
            _ => Err(PatternError::UnknownGeometry(s.to_string())),
        }
    }
}

/// Shape pattern parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapePattern {
    pub geometry: Geometry,
    /// Outer radius (every geometry)
    pub max_radius: f32,
    /// Inner radius (N-gon-complex odd vertices)
    pub min_radius: f32,
    /// Vertex count before subdivision
    pub point_count: u32,
    /// Interpolated points inserted on each edge (line, polygons)
    pub subdivisions_per_edge: u32,
    /// Angle of the pattern's forward axis (degrees)
    pub forward_rotation_degrees: f32,
    /// Continuous spin (degrees/s)
    pub rotation_degrees_per_second: f32,
    /// Spin clockwise instead of counter-clockwise
    pub reverse_rotation: bool,
    /// Angular spread for line and arc (degrees)
    pub spread_degrees: f32,
}

impl Default for ShapePattern {
    fn default() -> Self {
        Self {
            geometry: Geometry::Circle,
            max_radius: 1.0,
            min_radius: 0.2,
            point_count: 3,
            subdivisions_per_edge: 0,
            forward_rotation_degrees: 0.0,
            rotation_degrees_per_second: 0.0,
            reverse_rotation: false,
            spread_degrees: 35.0,
        }
    }
}

impl ShapePattern {
    /// Create a pattern of the given geometry with default parameters
    pub fn with_geometry(geometry: Geometry) -> Self {
        Self {
            geometry,
            ..Default::default()
        }
    }

    /// Copy with the builder minimums applied
    ///
    /// This is the only correction the engine makes on its own: point counts are
    /// raised to the geometry minimum (lines always have two anchors, complex
    /// polygons an even count) and complex polygons always span a full circle.
    pub fn coerced(&self) -> Self {
        let mut pattern = self.clone();
        let limits = self.geometry.limits();
        pattern.point_count = pattern.point_count.max(limits.min_points);
        match self.geometry {
            Geometry::Line => pattern.point_count = 2,
            Geometry::NGonComplex => {
                if pattern.point_count % 2 != 0 {
                    pattern.point_count += 1;
                }
                pattern.spread_degrees = 360.0;
            }
            Geometry::Circle | Geometry::Arc | Geometry::NGon => {}
        }
        pattern
    }

    /// Copy clamped to the authoring ranges
    ///
    /// For configuration arriving from outside an editor (files, scripts).
    pub fn clamped(&self) -> Self {
        let limits = self.geometry.limits();
        let mut pattern = self.clone();
        pattern.max_radius = pattern.max_radius.clamp(0.0, MAX_RADIUS);
        pattern.min_radius = pattern.min_radius.clamp(0.0, MAX_RADIUS);
        pattern.point_count = pattern
            .point_count
            .clamp(limits.min_points, limits.max_points);
        if limits.even_points && pattern.point_count % 2 != 0 {
            // Round up unless that would leave the range
            if pattern.point_count < limits.max_points {
                pattern.point_count += 1;
            } else {
                pattern.point_count -= 1;
            }
        }
        pattern.subdivisions_per_edge = pattern.subdivisions_per_edge.min(limits.max_subdivisions);
        pattern.rotation_degrees_per_second = pattern
            .rotation_degrees_per_second
            .clamp(-MAX_ROTATION_DEGREES_PER_SECOND, MAX_ROTATION_DEGREES_PER_SECOND);
        pattern.spread_degrees = pattern.spread_degrees.clamp(0.0, limits.max_spread_degrees);
        pattern
    }

    /// Number of points a build of this pattern produces
    pub fn built_point_count(&self) -> usize {
        let pattern = self.coerced();
        let vertices = pattern.point_count as usize;
        match pattern.geometry {
            Geometry::Circle | Geometry::Arc => vertices,
            Geometry::Line | Geometry::NGon | Geometry::NGonComplex => {
                vertices * (pattern.subdivisions_per_edge as usize + 1)
            }
        }
    }
}
