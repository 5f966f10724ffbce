//! The six walls of the box.
//!
//! The end walls (`z = min` and `z = max`) are lit white; the side, top and
//! bottom walls are black, so the room reads as a tunnel between two bright
//! panels.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::DEPTH_FORMAT;
use crate::math::Point3;
use crate::motion::Bounds;

pub const END_WALL_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const SIDE_WALL_COLOR: [f32; 3] = [0.0, 0.0, 0.0];

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct WallVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

pub const WALL_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    viewport: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) color: vec3<f32>,
) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(position, 1.0);
    out.color = color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color, 1.0);
}
"#;

/// Triangle-list vertices for the six walls of `bounds`, two triangles each.
pub fn wall_vertices(bounds: &Bounds) -> Vec<WallVertex> {
    let (lo, hi) = (bounds.min, bounds.max);
    let corner = |x: f32, y: f32, z: f32| Point3::new(x, y, z);

    let quads = [
        // z = min
        (
            [
                corner(lo.x(), lo.y(), lo.z()),
                corner(lo.x(), hi.y(), lo.z()),
                corner(hi.x(), hi.y(), lo.z()),
                corner(hi.x(), lo.y(), lo.z()),
            ],
            END_WALL_COLOR,
        ),
        // z = max
        (
            [
                corner(lo.x(), lo.y(), hi.z()),
                corner(lo.x(), hi.y(), hi.z()),
                corner(hi.x(), hi.y(), hi.z()),
                corner(hi.x(), lo.y(), hi.z()),
            ],
            END_WALL_COLOR,
        ),
        // x = min
        (
            [
                corner(lo.x(), lo.y(), lo.z()),
                corner(lo.x(), lo.y(), hi.z()),
                corner(lo.x(), hi.y(), hi.z()),
                corner(lo.x(), hi.y(), lo.z()),
            ],
            SIDE_WALL_COLOR,
        ),
        // x = max
        (
            [
                corner(hi.x(), lo.y(), lo.z()),
                corner(hi.x(), lo.y(), hi.z()),
                corner(hi.x(), hi.y(), hi.z()),
                corner(hi.x(), hi.y(), lo.z()),
            ],
            SIDE_WALL_COLOR,
        ),
        // y = max
        (
            [
                corner(lo.x(), hi.y(), hi.z()),
                corner(hi.x(), hi.y(), hi.z()),
                corner(hi.x(), hi.y(), lo.z()),
                corner(lo.x(), hi.y(), lo.z()),
            ],
            SIDE_WALL_COLOR,
        ),
        // y = min
        (
            [
                corner(lo.x(), lo.y(), hi.z()),
                corner(hi.x(), lo.y(), hi.z()),
                corner(hi.x(), lo.y(), lo.z()),
                corner(lo.x(), lo.y(), lo.z()),
            ],
            SIDE_WALL_COLOR,
        ),
    ];

    quads
        .iter()
        .flat_map(|(corners, color)| {
            [0, 1, 2, 0, 2, 3].map(|i| WallVertex {
                position: corners[i].to_vec3().to_array(),
                color: *color,
            })
        })
        .collect()
}

/// Static wall geometry and its pipeline.
pub struct WallRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl WallRenderer {
    pub fn new(
        device: &wgpu::Device,
        uniform_layout: &wgpu::BindGroupLayout,
        surface_format: wgpu::TextureFormat,
        bounds: &Bounds,
    ) -> Self {
        let vertices = wall_vertices(bounds);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Wall Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Wall Shader"),
            source: wgpu::ShaderSource::Wgsl(WALL_SHADER.into()),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Wall Pipeline Layout"),
            bind_group_layouts: &[uniform_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Wall Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<WallVertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            vertex_buffer,
            vertex_count: vertices.len() as u32,
        }
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, uniform_bind_group: &wgpu::BindGroup) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, uniform_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.draw(0..self.vertex_count, 0..1);
    }
}
