use glam::{EulerRot, Mat4, Vec3};
use rand::Rng;

use crate::geometry::PolyhedronKind;
use crate::options::MotionOptions;
use crate::palette::{Palette, Rgb};

/// Shape, circumradius and subdivision detail of each floating solid, in
/// scene order.
pub const SOLID_SHAPES: [(PolyhedronKind, f32, u32); 4] = [
    (PolyhedronKind::Icosahedron, 2.0, 4),
    (PolyhedronKind::Tetrahedron, 2.0, 0),
    (PolyhedronKind::Octahedron, 2.0, 0),
    (PolyhedronKind::Dodecahedron, 1.5, 0),
];

/// Upper bounds of the random per-axis spin, in radians per frame.
const MAX_SPIN: Vec3 = Vec3::new(0.002, 0.003, 0.002);

/// One of the rotating, bobbing polyhedra.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingSolid {
    index: usize,
    kind: PolyhedronKind,
    color: Rgb,
    rest: Vec3,
    position: Vec3,
    rotation: Vec3,
    spin: Vec3,
}

impl FloatingSolid {
    pub(crate) fn spawn(
        index: usize,
        kind: PolyhedronKind,
        palette: &Palette,
        spread: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let rest = Vec3::new(
            (rng.random::<f32>() - 0.5) * spread,
            (rng.random::<f32>() - 0.5) * spread,
            (rng.random::<f32>() - 0.5) * spread,
        );
        let spin = Vec3::new(
            rng.random::<f32>(),
            rng.random::<f32>(),
            rng.random::<f32>(),
        ) * MAX_SPIN;
        Self {
            index,
            kind,
            color: palette.color(index),
            rest,
            position: rest,
            rotation: Vec3::ZERO,
            spin,
        }
    }

    pub(crate) fn recolor(&mut self, palette: &Palette) {
        self.color = palette.color(self.index);
    }

    pub(crate) fn advance(&mut self, time: f32, motion: &MotionOptions) {
        self.rotation += self.spin;
        let phase = self.index as f32;
        self.position = Vec3::new(
            self.rest.x + (time + phase * 0.5).cos() * motion.solid_sway,
            self.rest.y + (time * 1.5 + phase).sin() * motion.solid_bob,
            self.rest.z,
        );
    }

    /// Position in the scene's solid list.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Shape of this solid.
    #[must_use]
    pub fn kind(&self) -> PolyhedronKind {
        self.kind
    }

    /// Current color (also used as the emissive tint).
    #[must_use]
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Resting position the solid bobs around.
    #[must_use]
    pub fn rest(&self) -> Vec3 {
        self.rest
    }

    /// Current world position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Accumulated Euler rotation.
    #[must_use]
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Per-frame rotation increment.
    #[must_use]
    pub fn spin(&self) -> Vec3 {
        self.spin
    }

    /// Object-to-world transform.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_euler(
                EulerRot::XYZ,
                self.rotation.x,
                self.rotation.y,
                self.rotation.z,
            )
    }
}
