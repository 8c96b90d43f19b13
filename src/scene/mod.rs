//! The owned CPU-side scene.
//!
//! [`SceneState`] is the single owner of everything that moves or changes
//! color: the particle cloud, the four floating solids and the wave plane,
//! plus the scene clock, the camera and the active palette. It has three
//! mutation entry points, [`advance_frame`](SceneState::advance_frame),
//! [`apply_palette`](SceneState::apply_palette) and
//! [`resize`](SceneState::resize); the renderer only reads it and drains
//! its dirty flags when uploading.

mod particles;
mod solids;
mod wave;

use rand::rngs::StdRng;
use rand::SeedableRng;

pub use particles::{ParticleCloud, ParticleInstance};
pub use solids::{FloatingSolid, SOLID_SHAPES};
pub use wave::WavePlane;

use crate::camera::Camera;
use crate::error::BackdropError;
use crate::options::{MotionOptions, Options};
use crate::palette::{PaletteId, Rgb};

/// Everything the renderer draws, and the clock that animates it.
#[derive(Debug, Clone)]
pub struct SceneState {
    time: f32,
    frames: u64,
    palette: PaletteId,
    camera: Camera,
    viewport: (u32, u32),
    point_light_colors: [Rgb; 2],
    particles: ParticleCloud,
    solids: Vec<FloatingSolid>,
    wave: WavePlane,
    motion: MotionOptions,
    rng: StdRng,
}

impl SceneState {
    /// Scene for a `width` x `height` viewport, randomized from the OS
    /// entropy source.
    #[must_use]
    pub fn new(options: &Options, width: u32, height: u32) -> Self {
        Self::with_rng(
            options,
            width,
            height,
            StdRng::from_rng(&mut rand::rng()),
        )
    }

    /// Scene randomized from a caller-supplied generator; a seeded `rng`
    /// makes the layout reproducible.
    #[must_use]
    pub fn with_rng(
        options: &Options,
        width: u32,
        height: u32,
        mut rng: StdRng,
    ) -> Self {
        let palette = PaletteId::default();
        let colors = palette.palette();

        let particles = ParticleCloud::scatter(
            options.scene.particle_count as usize,
            options.scene.particle_spread,
            colors,
            &mut rng,
        );
        let solids = SOLID_SHAPES
            .iter()
            .enumerate()
            .map(|(index, &(kind, _, _))| {
                FloatingSolid::spawn(
                    index,
                    kind,
                    colors,
                    options.scene.solid_spread,
                    &mut rng,
                )
            })
            .collect();

        Self {
            time: 0.0,
            frames: 0,
            palette,
            camera: Camera::new(&options.camera, width, height),
            viewport: (width, height),
            point_light_colors: [colors.color(0), colors.color(2)],
            particles,
            solids,
            wave: WavePlane::new(Rgb(options.scene.wave_color)),
            motion: options.motion.clone(),
            rng,
        }
    }

    /// Step the scene clock by one fixed increment and move every layer.
    pub fn advance_frame(&mut self) {
        self.time += self.motion.time_step;
        self.frames += 1;
        let time = self.time;

        self.particles.advance(time, &self.motion);
        self.wave.advance(time, self.motion.wave_amplitude);
        for solid in &mut self.solids {
            solid.advance(time, &self.motion);
        }
    }

    /// Switch the active palette: every particle color is re-sampled at
    /// random, solid `i` takes slot `i mod 4`, the wave plane is untouched.
    pub fn apply_palette(&mut self, id: PaletteId) {
        let palette = id.palette();
        self.palette = id;
        self.particles.recolor(palette, &mut self.rng);
        for solid in &mut self.solids {
            solid.recolor(palette);
        }
    }

    /// [`apply_palette`](Self::apply_palette) from a string key.
    ///
    /// # Errors
    ///
    /// Returns [`BackdropError::UnknownPalette`] for a key that names no
    /// palette; the scene is left unchanged.
    pub fn apply_palette_key(
        &mut self,
        key: &str,
    ) -> Result<PaletteId, BackdropError> {
        let id = key.parse()?;
        self.apply_palette(id);
        Ok(id)
    }

    /// Track a new viewport size; the camera aspect becomes exactly
    /// `width / height`.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.viewport = (width, height);
            self.camera.set_viewport(width, height);
        }
    }

    /// Scene clock.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Frames advanced since construction.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Palette currently applied.
    #[must_use]
    pub fn palette(&self) -> PaletteId {
        self.palette
    }

    /// The viewing camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Viewport size in physical pixels.
    #[must_use]
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Colors of the two point lights, fixed from the palette active at
    /// construction.
    #[must_use]
    pub fn point_light_colors(&self) -> [Rgb; 2] {
        self.point_light_colors
    }

    /// The particle cloud.
    #[must_use]
    pub fn particles(&self) -> &ParticleCloud {
        &self.particles
    }

    /// The four floating solids, in [`SOLID_SHAPES`] order.
    #[must_use]
    pub fn solids(&self) -> &[FloatingSolid] {
        &self.solids
    }

    /// The wave plane.
    #[must_use]
    pub fn wave(&self) -> &WavePlane {
        &self.wave
    }

    pub(crate) fn particles_mut(&mut self) -> &mut ParticleCloud {
        &mut self.particles
    }

    pub(crate) fn wave_mut(&mut self) -> &mut WavePlane {
        &mut self.wave
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn seeded(seed: u64) -> SceneState {
        SceneState::with_rng(
            &Options::default(),
            1280,
            720,
            StdRng::seed_from_u64(seed),
        )
    }

    #[test]
    fn initial_layout() {
        let scene = seeded(1);
        assert_eq!(scene.particles().len(), 200);
        assert_eq!(scene.solids().len(), 4);
        assert_eq!(scene.palette(), PaletteId::Palette1);
        assert_eq!(scene.time(), 0.0);

        for p in scene.particles().positions() {
            assert!(p.abs().max_element() <= 50.0);
        }
        for solid in scene.solids() {
            assert!(solid.rest().abs().max_element() <= 30.0);
            assert_eq!(solid.position(), solid.rest());
            let spin = solid.spin();
            assert!(spin.x >= 0.0 && spin.x < 0.002);
            assert!(spin.y >= 0.0 && spin.y < 0.003);
            assert!(spin.z >= 0.0 && spin.z < 0.002);
        }
    }

    #[test]
    fn particle_colors_come_from_the_palette() {
        let mut scene = seeded(2);
        scene.apply_palette(PaletteId::Palette5);
        let colors = PaletteId::Palette5.palette().colors;
        assert!(scene
            .particles()
            .colors()
            .iter()
            .all(|c| colors.contains(c)));
    }

    #[test]
    fn solids_take_palette_slot_by_index() {
        let mut scene = seeded(3);
        for id in PaletteId::ALL {
            scene.apply_palette(id);
            for (i, solid) in scene.solids().iter().enumerate() {
                assert_eq!(solid.color(), id.palette().colors[i % 4]);
            }
            // Applying the same palette twice leaves solids unchanged.
            let before: Vec<Rgb> =
                scene.solids().iter().map(FloatingSolid::color).collect();
            scene.apply_palette(id);
            let after: Vec<Rgb> =
                scene.solids().iter().map(FloatingSolid::color).collect();
            assert_eq!(before, after);
        }
    }

    #[test]
    fn wave_and_lights_keep_their_colors() {
        let mut scene = seeded(4);
        let lights = scene.point_light_colors();
        scene.apply_palette(PaletteId::Palette4);
        assert_eq!(scene.wave().color(), Rgb(0x66_7eea));
        assert_eq!(scene.point_light_colors(), lights);
    }

    #[test]
    fn unknown_key_changes_nothing() {
        let mut scene = seeded(5);
        scene.apply_palette(PaletteId::Palette2);
        let colors = scene.particles().colors().to_vec();

        let err = scene.apply_palette_key("palette0").unwrap_err();
        assert!(matches!(err, BackdropError::UnknownPalette(_)));
        assert_eq!(scene.palette(), PaletteId::Palette2);
        assert_eq!(scene.particles().colors(), colors.as_slice());

        assert_eq!(
            scene.apply_palette_key("palette3").unwrap(),
            PaletteId::Palette3
        );
        assert_eq!(scene.palette(), PaletteId::Palette3);
    }

    #[test]
    fn advance_steps_the_clock() {
        let mut scene = seeded(6);
        for _ in 0..10 {
            scene.advance_frame();
        }
        assert!((scene.time() - 0.01).abs() < 1e-6);
        assert_eq!(scene.frames(), 10);
    }

    #[test]
    fn cloud_rotates_at_fixed_rate() {
        let mut scene = seeded(7);
        scene.advance_frame();
        scene.advance_frame();
        let rotation = scene.particles().rotation();
        assert!((rotation.y - 0.001).abs() < 1e-7);
        assert!((rotation.x - 0.0005).abs() < 1e-7);
        assert_eq!(rotation.z, 0.0);
    }

    #[test]
    fn particles_bob_vertically_only() {
        let mut scene = seeded(8);
        let before = scene.particles().positions().to_vec();
        scene.advance_frame();
        let time = scene.time();
        for (i, (a, b)) in
            before.iter().zip(scene.particles().positions()).enumerate()
        {
            assert_eq!(a.x, b.x);
            assert_eq!(a.z, b.z);
            let expected = (time * 2.0 + (i * 3) as f32).sin() * 0.01;
            assert!((b.y - a.y - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn solids_bob_and_sway_around_rest() {
        let mut scene = seeded(9);
        scene.advance_frame();
        let time = scene.time();
        for (i, solid) in scene.solids().iter().enumerate() {
            let phase = i as f32;
            let expected = Vec3::new(
                solid.rest().x + (time + phase * 0.5).cos() * 2.0,
                solid.rest().y + (time * 1.5 + phase).sin() * 3.0,
                solid.rest().z,
            );
            assert!((solid.position() - expected).length() < 1e-5);
            assert_eq!(solid.rotation(), solid.spin());
        }
    }

    #[test]
    fn wave_snapshots_once_and_ripples() {
        let mut scene = seeded(10);
        assert!(scene.wave().original_positions().is_none());
        let flat = scene.wave().positions().to_vec();

        scene.advance_frame();
        scene.advance_frame();
        let time = scene.time();
        let original = scene.wave().original_positions().unwrap();
        assert_eq!(original, flat.as_slice());

        for (p, o) in scene.wave().positions().iter().zip(original) {
            let expected = ((o.x + time * 5.0) * 0.05).sin()
                * ((o.y + time * 3.0) * 0.05).cos()
                * 2.0;
            assert!((p.z - expected).abs() < 1e-5);
            assert_eq!((p.x, p.y), (o.x, o.y));
        }
    }

    #[test]
    fn resize_sets_exact_aspect() {
        let mut scene = seeded(11);
        scene.resize(1000, 300);
        assert_eq!(scene.viewport(), (1000, 300));
        assert_eq!(scene.camera().aspect, 1000.0 / 300.0);
        scene.resize(0, 300);
        assert_eq!(scene.viewport(), (1000, 300));
    }

    #[test]
    fn dirty_flags_drain() {
        let mut scene = seeded(12);
        assert!(scene.particles_mut().take_dirty());
        assert!(!scene.particles_mut().take_dirty());
        scene.apply_palette(PaletteId::Palette2);
        assert!(scene.particles_mut().take_dirty());

        assert!(scene.wave_mut().take_dirty());
        assert!(!scene.wave_mut().take_dirty());
        scene.advance_frame();
        assert!(scene.wave_mut().take_dirty());
    }
}
