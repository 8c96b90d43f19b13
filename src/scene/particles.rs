use glam::{EulerRot, Mat4, Vec3};
use rand::Rng;

use crate::options::MotionOptions;
use crate::palette::{Palette, Rgb, PALETTE_SIZE};

/// Per-particle instance data uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    /// Object-space center of the sprite.
    pub position: [f32; 3],
    /// Linear RGB color.
    pub color: [f32; 3],
}

/// The ambient sprite field: points scattered through a cube, rotating as
/// one body while each point drifts vertically on its own phase.
#[derive(Debug, Clone)]
pub struct ParticleCloud {
    positions: Vec<Vec3>,
    colors: Vec<Rgb>,
    rotation: Vec3,
    positions_dirty: bool,
    colors_dirty: bool,
}

impl ParticleCloud {
    /// `count` points uniform in a cube of edge `spread`, each colored from
    /// a random slot of `palette`.
    pub fn scatter(
        count: usize,
        spread: f32,
        palette: &Palette,
        rng: &mut impl Rng,
    ) -> Self {
        let positions = (0..count)
            .map(|_| {
                Vec3::new(
                    (rng.random::<f32>() - 0.5) * spread,
                    (rng.random::<f32>() - 0.5) * spread,
                    (rng.random::<f32>() - 0.5) * spread,
                )
            })
            .collect();
        let mut cloud = Self {
            positions,
            colors: Vec::with_capacity(count),
            rotation: Vec3::ZERO,
            positions_dirty: true,
            colors_dirty: true,
        };
        cloud.recolor(palette, rng);
        cloud
    }

    /// Re-sample every particle's color independently from `palette`.
    pub fn recolor(&mut self, palette: &Palette, rng: &mut impl Rng) {
        self.colors = (0..self.positions.len())
            .map(|_| palette.color(rng.random_range(0..PALETTE_SIZE)))
            .collect();
        self.colors_dirty = true;
    }

    pub(crate) fn advance(&mut self, time: f32, motion: &MotionOptions) {
        self.rotation.x += motion.cloud_rotation * 0.5;
        self.rotation.y += motion.cloud_rotation;
        // Phase steps by 3 per particle, the offset of its packed xyz.
        for (i, p) in self.positions.iter_mut().enumerate() {
            p.y += (time * 2.0 + (i * 3) as f32).sin() * motion.particle_bob;
        }
        self.positions_dirty = true;
    }

    /// Number of particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the cloud is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Object-space positions.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Current colors, one per particle.
    #[must_use]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Accumulated Euler rotation of the whole cloud.
    #[must_use]
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Object-to-world transform.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Packed instance data for upload.
    #[must_use]
    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.positions
            .iter()
            .zip(&self.colors)
            .map(|(p, c)| ParticleInstance {
                position: p.to_array(),
                color: c.to_linear(),
            })
            .collect()
    }

    /// Returns and clears the "needs upload" flag. Positions and colors
    /// share one instance buffer, so either change dirties it.
    pub fn take_dirty(&mut self) -> bool {
        let dirty = self.positions_dirty || self.colors_dirty;
        self.positions_dirty = false;
        self.colors_dirty = false;
        dirty
    }
}
