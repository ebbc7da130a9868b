//! Surface anchor points produced by an external mesh sampler

use crate::rand::RandomSource;
use morph_core::{Aabb, MorphError, Result, Vec3};
use std::path::Path;

/// Immutable, non-empty set of surface anchor points
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    points: Vec<Vec3>,
}

impl SampleSet {
    /// Wrap sampled points. Fails on an empty set or a non-finite point.
    pub fn new(points: Vec<Vec3>) -> Result<Self> {
        if points.is_empty() {
            return Err(MorphError::EmptySampleSet);
        }
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(MorphError::NonFiniteSample(i));
        }
        Ok(Self { points })
    }

    /// Parse a point list.
    ///
    /// Accepts OBJ vertex lines (`v x y z`) and bare `x y z` or `x,y,z`
    /// lines. Other OBJ records, blank lines and `#` comments are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut points = Vec::new();
        let mut skipped = 0usize;

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let coords = if let Some(rest) = line.strip_prefix("v ") {
                rest
            } else if line.starts_with(|c: char| c.is_ascii_alphabetic()) {
                // vn, vt, f, o, g, s, usemtl, mtllib ...
                skipped += 1;
                continue;
            } else {
                line
            };

            points.push(parse_xyz(coords, idx + 1)?);
        }

        if skipped > 0 {
            log::debug!("Skipped {skipped} non-vertex record(s) while reading samples");
        }
        Self::new(points)
    }

    /// Read and parse a point file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let set = Self::parse(&text)?;
        log::info!("Loaded {} sample point(s) from {}", set.len(), path.display());
        Ok(set)
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounds(&self) -> Aabb {
        // Non-empty by construction
        Aabb::from_points(&self.points).unwrap_or(Aabb {
            min: Vec3::ZERO,
            max: Vec3::ZERO,
        })
    }

    /// Copy translated so the bounding box center sits at the origin
    pub fn centered(&self) -> Self {
        let center = self.bounds().center();
        Self {
            points: self.points.iter().map(|&p| p - center).collect(),
        }
    }

    /// Draw `count` points with replacement.
    ///
    /// Stand-in for a real surface sampler when only a fixed vertex list is
    /// available. A zero count yields a single point, keeping the set non-empty.
    pub fn resample(&self, count: usize, rng: &mut impl RandomSource) -> Self {
        let count = count.max(1);
        let points = (0..count)
            .map(|_| self.points[rng.index(self.points.len())])
            .collect();
        Self { points }
    }
}

fn parse_xyz(s: &str, line: usize) -> Result<Vec3> {
    let values: Vec<f32> = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<f32>().map_err(|e| MorphError::ParseError {
                line,
                message: format!("invalid number '{t}': {e}"),
            })
        })
        .collect::<Result<_>>()?;

    // OBJ allows an optional fourth (w) component
    if values.len() < 3 || values.len() > 4 {
        return Err(MorphError::ParseError {
            line,
            message: format!("expected 3 coordinates, got {}", values.len()),
        });
    }
    Ok(Vec3::new(values[0], values[1], values[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rand::ShellRng;

    #[test]
    fn empty_set_is_rejected() {
        assert!(matches!(
            SampleSet::new(Vec::new()),
            Err(MorphError::EmptySampleSet)
        ));
        assert!(matches!(
            SampleSet::parse("# nothing here\n\n"),
            Err(MorphError::EmptySampleSet)
        ));
    }

    #[test]
    fn non_finite_point_is_rejected() {
        let pts = vec![Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 0.0)];
        assert!(matches!(
            SampleSet::new(pts),
            Err(MorphError::NonFiniteSample(1))
        ));
    }

    #[test]
    fn parse_obj_vertices() {
        let obj = "\
# teeth
o Mesh
v 1.0 2.0 3.0
vn 0 1 0
v -1 -2 -3 1.0
f 1 2 3
";
        let set = SampleSet::parse(obj).unwrap();
        assert_eq!(
            set.points(),
            &[Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, -2.0, -3.0)]
        );
    }

    #[test]
    fn parse_bare_and_comma_lines() {
        let set = SampleSet::parse("0 0 0\n1.5,2.5,3.5\n").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.points()[1], Vec3::new(1.5, 2.5, 3.5));
    }

    #[test]
    fn parse_error_reports_line() {
        let err = SampleSet::parse("0 0 0\n1 two 3\n").unwrap_err();
        assert!(matches!(err, MorphError::ParseError { line: 2, .. }));
        let err = SampleSet::parse("1 2\n").unwrap_err();
        assert!(matches!(err, MorphError::ParseError { line: 1, .. }));
    }

    #[test]
    fn centered_moves_bounds_to_origin() {
        let set = SampleSet::new(vec![Vec3::new(10.0, 0.0, 0.0), Vec3::new(20.0, 4.0, 2.0)])
            .unwrap()
            .centered();
        assert_eq!(set.bounds().center(), Vec3::ZERO);
        assert_eq!(set.points()[0], Vec3::new(-5.0, -2.0, -1.0));
    }

    #[test]
    fn resample_draws_from_source() {
        let src = SampleSet::new(vec![Vec3::X, Vec3::UP, Vec3::Z]).unwrap();
        let mut rng = ShellRng::new(5);
        let drawn = src.resample(100, &mut rng);
        assert_eq!(drawn.len(), 100);
        assert!(drawn.points().iter().all(|p| src.points().contains(p)));
        assert_eq!(src.resample(0, &mut rng).len(), 1);
    }
}
