//! Rendering system for the solar system view
//!
//! Bodies are instanced circles, trails are line strips. Everything is drawn
//! in pixel space around the window centre; [`DisplayConfig`] does the
//! meters-to-pixels conversion.

use common::{
    create_dynamic_vertex_buffer, create_uniform_buffer, Camera2D, CameraUniform, GraphicsContext,
    Vertex,
};
use wgpu::util::DeviceExt;

use crate::display::DisplayConfig;
use solar_system::Body;

/// Upper bound on trail vertices uploaded per frame
const MAX_TRAIL_VERTICES: usize = 200_000;

/// Instance data for one body
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BodyInstance {
    pub position: [f32; 3],
    pub radius: f32,
    pub color: [f32; 4],
}

impl BodyInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        2 => Float32x3,
        3 => Float32,
        4 => Float32x4,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BodyInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Quad vertex for instanced rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
}

impl QuadVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

// Unit quad vertices
const QUAD_VERTICES: &[QuadVertex] = &[
    QuadVertex { position: [-1.0, -1.0] },
    QuadVertex { position: [1.0, -1.0] },
    QuadVertex { position: [1.0, 1.0] },
    QuadVertex { position: [-1.0, -1.0] },
    QuadVertex { position: [1.0, 1.0] },
    QuadVertex { position: [-1.0, 1.0] },
];

/// Draw ranges produced by [`Renderer::update`]
pub struct FrameData {
    pub body_count: u32,
    pub trail_ranges: Vec<(u32, u32)>,
}

pub struct Renderer {
    body_pipeline: wgpu::RenderPipeline,
    trail_pipeline: wgpu::RenderPipeline,
    quad_buffer: wgpu::Buffer,
    body_buffer: wgpu::Buffer,
    trail_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    max_bodies: usize,
}

impl Renderer {
    pub fn new(ctx: &GraphicsContext, max_bodies: usize) -> Self {
        let device = &ctx.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Orbit Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/orbit.wgsl").into()),
        });

        let camera = Camera2D::pixel_space(ctx.size.width, ctx.size.height);
        let camera_buffer = create_uniform_buffer(device, &CameraUniform::from_camera_2d(&camera));

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Orbit Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout],
            push_constant_ranges: &[],
        });

        let color_target = [Some(wgpu::ColorTargetState {
            format: ctx.config.format,
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            write_mask: wgpu::ColorWrites::ALL,
        })];

        let body_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Body Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_body",
                buffers: &[QuadVertex::layout(), BodyInstance::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_body",
                targets: &color_target,
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let trail_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Trail Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_trail",
                buffers: &[Vertex::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_trail",
                targets: &color_target,
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineStrip,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Buffer"),
            contents: bytemuck::cast_slice(QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let body_buffer =
            create_dynamic_vertex_buffer::<BodyInstance>(device, "Body Buffer", max_bodies);
        let trail_buffer =
            create_dynamic_vertex_buffer::<Vertex>(device, "Trail Buffer", MAX_TRAIL_VERTICES);

        Self {
            body_pipeline,
            trail_pipeline,
            quad_buffer,
            body_buffer,
            trail_buffer,
            camera_buffer,
            camera_bind_group,
            max_bodies,
        }
    }

    pub fn update_camera(&self, queue: &wgpu::Queue, camera: &Camera2D) {
        let uniform = CameraUniform::from_camera_2d(camera);
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Upload body instances and trail strips for the current frame
    pub fn update(
        &self,
        queue: &wgpu::Queue,
        bodies: &[Body],
        colors: &[[f32; 4]],
        display: &DisplayConfig,
    ) -> FrameData {
        let instances: Vec<BodyInstance> = bodies
            .iter()
            .zip(colors)
            .take(self.max_bodies)
            .map(|(body, color)| BodyInstance {
                position: pixel_position(display, body.position()),
                radius: display.body_radius_px(body),
                color: *color,
            })
            .collect();

        if !instances.is_empty() {
            queue.write_buffer(&self.body_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let mut trail_vertices: Vec<Vertex> = Vec::new();
        let mut trail_ranges = Vec::new();

        for (body, color) in bodies.iter().zip(colors) {
            let trail = body.trail();
            if trail.len() < 2 {
                continue;
            }

            let room = MAX_TRAIL_VERTICES - trail_vertices.len();
            if trail.len() > room {
                log::debug!("Trail of '{}' does not fit this frame", body.name());
                continue;
            }

            let start = trail_vertices.len() as u32;
            let len = trail.len() as f32;
            for (i, point) in trail.iter().enumerate() {
                let alpha = 0.2 + 0.8 * (i as f32 + 1.0) / len;
                trail_vertices.push(Vertex::new(
                    pixel_position(display, *point),
                    [color[0], color[1], color[2], alpha],
                ));
            }
            trail_ranges.push((start, trail.len() as u32));
        }

        if !trail_vertices.is_empty() {
            queue.write_buffer(&self.trail_buffer, 0, bytemuck::cast_slice(&trail_vertices));
        }

        FrameData {
            body_count: instances.len() as u32,
            trail_ranges,
        }
    }

    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        frame: &FrameData,
        show_trails: bool,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Orbit Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        if show_trails && !frame.trail_ranges.is_empty() {
            render_pass.set_pipeline(&self.trail_pipeline);
            render_pass.set_vertex_buffer(0, self.trail_buffer.slice(..));
            for (start, count) in &frame.trail_ranges {
                render_pass.draw(*start..(*start + *count), 0..1);
            }
        }

        if frame.body_count > 0 {
            render_pass.set_pipeline(&self.body_pipeline);
            render_pass.set_vertex_buffer(0, self.quad_buffer.slice(..));
            render_pass.set_vertex_buffer(1, self.body_buffer.slice(..));
            render_pass.draw(0..6, 0..frame.body_count);
        }
    }
}

/// World position for the pixel-space camera: screen y points down, camera y up
fn pixel_position(display: &DisplayConfig, position: glam::DVec2) -> [f32; 3] {
    let offset = display.project(position);
    [offset.x, -offset.y, 0.0]
}
