use glam::Vec3;

/// A segmented plane in the XY plane, centred on the origin.
#[derive(Debug, Clone)]
pub struct PlaneGrid {
    /// Row-major vertex positions, top row first.
    pub positions: Vec<Vec3>,
    /// Line-list indices covering every triangle edge exactly once.
    pub line_indices: Vec<u32>,
    /// Vertices per row.
    pub columns: usize,
}

impl PlaneGrid {
    /// `width` x `height` plane split into `segments_x` x `segments_y`
    /// quads, each quad drawn as two triangles in wireframe.
    #[must_use]
    pub fn new(width: f32, height: f32, segments_x: usize, segments_y: usize) -> Self {
        let segments_x = segments_x.max(1);
        let segments_y = segments_y.max(1);
        let columns = segments_x + 1;
        let rows = segments_y + 1;
        let step_x = width / segments_x as f32;
        let step_y = height / segments_y as f32;

        let mut positions = Vec::with_capacity(columns * rows);
        for iy in 0..rows {
            let y = height / 2.0 - iy as f32 * step_y;
            for ix in 0..columns {
                positions.push(Vec3::new(ix as f32 * step_x - width / 2.0, y, 0.0));
            }
        }

        let index = |ix: usize, iy: usize| (ix + columns * iy) as u32;
        let mut line_indices = Vec::new();
        for iy in 0..rows {
            for ix in 0..columns {
                if ix + 1 < columns {
                    line_indices.extend([index(ix, iy), index(ix + 1, iy)]);
                }
                if iy + 1 < rows {
                    line_indices.extend([index(ix, iy), index(ix, iy + 1)]);
                }
                // Quad diagonal shared by its two triangles.
                if ix + 1 < columns && iy + 1 < rows {
                    line_indices.extend([index(ix, iy + 1), index(ix + 1, iy)]);
                }
            }
        }

        Self {
            positions,
            line_indices,
            columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_dimensions() {
        let plane = PlaneGrid::new(100.0, 100.0, 50, 50);
        assert_eq!(plane.positions.len(), 51 * 51);
        assert_eq!(plane.columns, 51);
        // 51 rows of 50 horizontals, 51 columns of 50 verticals, 2500 diagonals
        assert_eq!(plane.line_indices.len() / 2, 51 * 50 * 2 + 50 * 50);
    }

    #[test]
    fn corners_span_the_extent() {
        let plane = PlaneGrid::new(100.0, 60.0, 4, 3);
        assert_eq!(plane.positions[0], Vec3::new(-50.0, 30.0, 0.0));
        assert_eq!(*plane.positions.last().unwrap(), Vec3::new(50.0, -30.0, 0.0));
    }

    #[test]
    fn indices_stay_in_range() {
        let plane = PlaneGrid::new(10.0, 10.0, 3, 2);
        let max = plane.positions.len() as u32;
        assert!(plane.line_indices.iter().all(|&i| i < max));
    }
}
