use std::f32::consts::FRAC_PI_3;

use glam::{Mat4, Vec3};

use crate::geometry::PlaneGrid;
use crate::palette::Rgb;

const PLANE_SIZE: f32 = 100.0;
const PLANE_SEGMENTS: usize = 50;
const PLANE_DEPTH: f32 = -30.0;

/// The rippling wireframe backdrop. Never recolored by palette changes.
#[derive(Debug, Clone)]
pub struct WavePlane {
    grid: PlaneGrid,
    original: Option<Vec<Vec3>>,
    color: Rgb,
    dirty: bool,
}

impl WavePlane {
    /// 100 x 100 plane with 50 x 50 segments in a fixed color.
    #[must_use]
    pub fn new(color: Rgb) -> Self {
        Self {
            grid: PlaneGrid::new(
                PLANE_SIZE,
                PLANE_SIZE,
                PLANE_SEGMENTS,
                PLANE_SEGMENTS,
            ),
            original: None,
            color,
            dirty: true,
        }
    }

    pub(crate) fn advance(&mut self, time: f32, amplitude: f32) {
        let original = self
            .original
            .get_or_insert_with(|| self.grid.positions.clone());
        for (p, o) in self.grid.positions.iter_mut().zip(original.iter()) {
            p.z = o.z
                + ((o.x + time * 5.0) * 0.05).sin()
                    * ((o.y + time * 3.0) * 0.05).cos()
                    * amplitude;
        }
        self.dirty = true;
    }

    /// Current vertex positions (object space).
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.grid.positions
    }

    /// Snapshot of the flat plane, taken on the first animated frame.
    #[must_use]
    pub fn original_positions(&self) -> Option<&[Vec3]> {
        self.original.as_deref()
    }

    /// Wireframe line-list indices.
    #[must_use]
    pub fn line_indices(&self) -> &[u32] {
        &self.grid.line_indices
    }

    /// Fixed base color.
    #[must_use]
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Tilted back by 60 degrees and pushed behind the other layers.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, PLANE_DEPTH))
            * Mat4::from_rotation_x(-FRAC_PI_3)
    }

    /// Returns and clears the "needs upload" flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
