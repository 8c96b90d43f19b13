//! Uniform blocks shared by every scene shader.
//!
//! Both structs mirror `assets/shaders/modules/frame.wgsl` and are built
//! only from `vec4`/`mat4` members so the Rust and WGSL layouts agree
//! without explicit padding.

use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::options::Options;
use crate::palette::Rgb;
use crate::scene::SceneState;

/// Per-frame camera, fog and light data (group 0).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera position (w unused).
    pub eye: [f32; 4],
    /// Camera forward direction (w unused).
    pub forward: [f32; 4],
    /// Screen-right axis for sprites (w unused).
    pub right: [f32; 4],
    /// Screen-up axis for sprites (w unused).
    pub up: [f32; 4],
    /// Linear fog color (w unused).
    pub fog_color: [f32; 4],
    /// Fog near, fog far, sRGB-encode flag, unused.
    pub fog_range: [f32; 4],
    /// Ambient radiance (w unused).
    pub ambient: [f32; 4],
    /// Point light positions, range in w.
    pub point_position: [[f32; 4]; 2],
    /// Point light radiance (w unused).
    pub point_color: [[f32; 4]; 2],
    /// Unit vector toward the directional light (w unused).
    pub directional_dir: [f32; 4],
    /// Directional light radiance (w unused).
    pub directional_color: [f32; 4],
}

impl FrameUniform {
    /// Snapshot the camera and light rig of `scene`.
    #[must_use]
    pub fn new(scene: &SceneState, options: &Options, encode_srgb: bool) -> Self {
        let camera = scene.camera();
        let (right, up) = camera.billboard_axes();
        let lighting = &options.lighting;
        let [light1, light2] = scene.point_light_colors();
        let point_color = |c: Rgb| rgb_scaled(c, lighting.point_intensity, 0.0);
        let point_position = |p: [f32; 3]| [p[0], p[1], p[2], lighting.point_range];

        Self {
            view_proj: camera.build_matrix().to_cols_array_2d(),
            eye: camera.eye.extend(1.0).to_array(),
            forward: camera.forward().extend(0.0).to_array(),
            right: right.extend(0.0).to_array(),
            up: up.extend(0.0).to_array(),
            fog_color: rgb_scaled(Rgb(options.scene.fog_color), 1.0, 1.0),
            fog_range: [
                options.scene.fog_near,
                options.scene.fog_far,
                if encode_srgb { 1.0 } else { 0.0 },
                0.0,
            ],
            ambient: [lighting.ambient, lighting.ambient, lighting.ambient, 1.0],
            point_position: [
                point_position(lighting.point_positions[0]),
                point_position(lighting.point_positions[1]),
            ],
            point_color: [point_color(light1), point_color(light2)],
            directional_dir: Vec3::from_array(lighting.directional_position)
                .normalize_or(Vec3::Y)
                .extend(0.0)
                .to_array(),
            directional_color: [
                lighting.directional,
                lighting.directional,
                lighting.directional,
                0.0,
            ],
        }
    }
}

/// Per-draw transform and material (group 1).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniform {
    /// Object-to-world transform.
    pub model: [[f32; 4]; 4],
    /// Linear base color, opacity in w.
    pub color: [f32; 4],
    /// Linear emissive radiance (w unused).
    pub emissive: [f32; 4],
    /// Shininess, sprite size, unused, unused.
    pub params: [f32; 4],
}

impl DrawUniform {
    /// Phong material with `emissive_strength` of the base color added as
    /// self-illumination.
    #[must_use]
    pub fn lit(
        model: Mat4,
        color: Rgb,
        opacity: f32,
        emissive_strength: f32,
        shininess: f32,
    ) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: rgb_scaled(color, 1.0, opacity),
            emissive: rgb_scaled(color, emissive_strength, 0.0),
            params: [shininess, 0.0, 0.0, 0.0],
        }
    }

    /// Unlit sprites of edge `size`; colors come from the instances.
    #[must_use]
    pub fn sprites(model: Mat4, size: f32, opacity: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: [1.0, 1.0, 1.0, opacity],
            emissive: [0.0; 4],
            params: [0.0, size, 0.0, 0.0],
        }
    }
}

fn rgb_scaled(color: Rgb, scale: f32, w: f32) -> [f32; 4] {
    let [r, g, b] = color.to_linear();
    [r * scale, g * scale, b * scale, w]
}

/// Layout of a single uniform buffer at binding 0, visible to both stages.
pub fn uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

/// A uniform buffer plus the bind group exposing it.
pub struct UniformSlot<T> {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    _marker: std::marker::PhantomData<T>,
}

impl<T: bytemuck::Pod> UniformSlot<T> {
    /// Allocate the buffer initialized to `value`, bound through `layout`.
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        value: &T,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(value),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self {
            buffer,
            bind_group,
            _marker: std::marker::PhantomData,
        }
    }

    /// Upload a new value.
    pub fn write(&self, queue: &wgpu::Queue, value: &T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(value));
    }

    /// Bind group for `set_bind_group`.
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn layouts_are_vec4_aligned() {
        assert_eq!(size_of::<FrameUniform>(), 272);
        assert_eq!(size_of::<DrawUniform>(), 112);
        assert_eq!(size_of::<FrameUniform>() % 16, 0);
    }

    #[test]
    fn frame_uniform_carries_fog_and_lights() {
        let options = Options::default();
        let scene =
            SceneState::with_rng(&options, 800, 600, StdRng::seed_from_u64(1));
        let frame = FrameUniform::new(&scene, &options, true);

        assert_eq!(frame.fog_range, [100.0, 1000.0, 1.0, 0.0]);
        assert_eq!(frame.eye, [0.0, 0.0, 30.0, 1.0]);
        assert_eq!(frame.point_position[0], [20.0, 30.0, 20.0, 100.0]);
        let purple = Rgb(0x66_7eea).to_linear();
        assert_eq!(&frame.point_color[0][..3], &purple[..]);
        let len = Vec3::from_slice(&frame.directional_dir[..3]).length();
        assert!((len - 1.0).abs() < 1e-6);
    }

    #[test]
    fn lit_material_scales_emissive() {
        let draw = DrawUniform::lit(Mat4::IDENTITY, Rgb(0xff_ffff), 0.7, 0.3, 100.0);
        assert_eq!(draw.color[3], 0.7);
        assert!((draw.emissive[0] - 0.3).abs() < 1e-6);
        assert_eq!(draw.params[0], 100.0);
    }
}
