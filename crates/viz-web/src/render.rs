//! WebGPU backend. Three pipelines share one camera: instanced billboard
//! sprites (trajectory particles and floating symbols), a lit triangle mesh
//! (the tube), and a line list (proximity edges). The canvas clears to
//! transparent so the page background shows through.

use glam::{Mat4, Vec3};
use web_sys as web;
use wgpu::util::DeviceExt;

use viz_core::constants::{CAMERA_FOVY_DEGREES, CAMERA_ZFAR, CAMERA_ZNEAR};
use viz_core::TubeMesh;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
}

/// One billboard quad. `kind` selects the fragment mask: 0 disc, 1 bar,
/// 2 ring. `angle` spins the quad in screen space.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 3],
    pub scale: f32,
    pub color: [f32; 4],
    pub angle: f32,
    pub kind: f32,
}

pub struct SpriteSet {
    instance_vb: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    count: u32,
    capacity: u32,
}

pub struct MeshSet {
    vertex_vb: wgpu::Buffer,
    index_ib: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    index_count: u32,
}

pub struct LineSet {
    vertex_vb: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    vertex_count: u32,
    capacity_vertices: u32,
}

pub enum Draw<'a> {
    Sprites(&'a SpriteSet, Mat4),
    Mesh(&'a MeshSet, Mat4),
    Lines(&'a LineSet, Mat4),
}

const SPRITE_SHADER: &str = r#"
struct Uniforms {
  view: mat4x4<f32>,
  proj: mat4x4<f32>,
  model: mat4x4<f32>,
};
@group(0) @binding(0) var<uniform> u: Uniforms;

struct VsOut {
  @builtin(position) pos: vec4<f32>,
  @location(0) color: vec4<f32>,
  @location(1) local: vec2<f32>,
  @location(2) kind: f32,
};

@vertex
fn vs_main(
  @location(0) v_pos: vec2<f32>,
  @location(1) i_pos: vec3<f32>,
  @location(2) i_scale: f32,
  @location(3) i_color: vec4<f32>,
  @location(4) i_angle: f32,
  @location(5) i_kind: f32,
) -> VsOut {
  // Billboard: transform the center into view space, offset by the spun
  // quad corner there, then project.
  let center = u.view * u.model * vec4<f32>(i_pos, 1.0);
  let c = cos(i_angle);
  let s = sin(i_angle);
  let spun = vec2<f32>(c * v_pos.x - s * v_pos.y, s * v_pos.x + c * v_pos.y);
  var out: VsOut;
  out.pos = u.proj * (center + vec4<f32>(spun * i_scale, 0.0, 0.0));
  out.color = i_color;
  out.local = v_pos;
  out.kind = i_kind;
  return out;
}

@fragment
fn fs_main(inf: VsOut) -> @location(0) vec4<f32> {
  let r = length(inf.local);
  var shape = 0.0;
  if (inf.kind < 0.5) {
    // disc
    shape = 1.0 - smoothstep(0.45, 0.5, r);
  } else if (inf.kind < 1.5) {
    // thin bar
    shape = step(abs(inf.local.y), 0.0625) * step(abs(inf.local.x), 0.5);
  } else {
    // ring
    shape = smoothstep(0.28, 0.33, r) * (1.0 - smoothstep(0.45, 0.5, r));
  }
  if (shape <= 0.001) {
    discard;
  }
  return vec4<f32>(inf.color.rgb, inf.color.a * shape);
}
"#;

const MESH_SHADER: &str = r#"
struct Uniforms {
  view: mat4x4<f32>,
  proj: mat4x4<f32>,
  model: mat4x4<f32>,
};
@group(0) @binding(0) var<uniform> u: Uniforms;

struct VsOut {
  @builtin(position) pos: vec4<f32>,
  @location(0) normal: vec3<f32>,
};

@vertex
fn vs_main(@location(0) v_pos: vec3<f32>, @location(1) v_nrm: vec3<f32>) -> VsOut {
  var out: VsOut;
  out.pos = u.proj * u.view * u.model * vec4<f32>(v_pos, 1.0);
  out.normal = normalize((u.model * vec4<f32>(v_nrm, 0.0)).xyz);
  return out;
}

@fragment
fn fs_main(inf: VsOut) -> @location(0) vec4<f32> {
  let base = vec3<f32>(0.431, 0.337, 0.812);
  let emissive = vec3<f32>(0.165, 0.102, 0.424);
  let light_dir = normalize(vec3<f32>(1.0, 1.0, 1.0));
  let diffuse = max(dot(normalize(inf.normal), light_dir), 0.0);
  let rgb = emissive + base * (0.25 + diffuse);
  return vec4<f32>(rgb, 0.8);
}
"#;

const LINE_SHADER: &str = r#"
struct Uniforms {
  view: mat4x4<f32>,
  proj: mat4x4<f32>,
  model: mat4x4<f32>,
};
@group(0) @binding(0) var<uniform> u: Uniforms;

@vertex
fn vs_main(@location(0) v_pos: vec3<f32>) -> @builtin(position) vec4<f32> {
  return u.proj * u.view * u.model * vec4<f32>(v_pos, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
  return vec4<f32>(0.431, 0.337, 0.812, 0.2);
}
"#;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    sprite_pipeline: wgpu::RenderPipeline,
    mesh_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    quad_vb: wgpu::Buffer,
    camera_z: f32,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, camera_z: f32) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera_bgl"),
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
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let sprite_vertex_buffers = [
            // slot 0: quad corners
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            // slot 1: per-instance data
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<SpriteInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 1,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32,
                        offset: 12,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 16,
                        shader_location: 3,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32,
                        offset: 32,
                        shader_location: 4,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32,
                        offset: 36,
                        shader_location: 5,
                    },
                ],
            },
        ];
        let mesh_vertex_buffers = [wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 6) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        }];
        let line_vertex_buffers = [wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 3) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            }],
        }];

        let sprite_pipeline = build_pipeline(
            &device,
            &pipeline_layout,
            format,
            "sprite_pipeline",
            SPRITE_SHADER,
            &sprite_vertex_buffers,
            wgpu::PrimitiveTopology::TriangleList,
        );
        let mesh_pipeline = build_pipeline(
            &device,
            &pipeline_layout,
            format,
            "mesh_pipeline",
            MESH_SHADER,
            &mesh_vertex_buffers,
            wgpu::PrimitiveTopology::TriangleList,
        );
        let line_pipeline = build_pipeline(
            &device,
            &pipeline_layout,
            format,
            "line_pipeline",
            LINE_SHADER,
            &line_vertex_buffers,
            wgpu::PrimitiveTopology::LineList,
        );

        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            sprite_pipeline,
            mesh_pipeline,
            line_pipeline,
            bind_group_layout,
            quad_vb,
            camera_z,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn view(&self) -> Mat4 {
        Mat4::look_at_rh(Vec3::new(0.0, 0.0, self.camera_z), Vec3::ZERO, Vec3::Y)
    }

    fn proj(&self) -> Mat4 {
        let aspect = self.width as f32 / (self.height as f32).max(1.0);
        Mat4::perspective_rh(
            CAMERA_FOVY_DEGREES.to_radians(),
            aspect,
            CAMERA_ZNEAR,
            CAMERA_ZFAR,
        )
    }

    fn uniform_binding(&self) -> (wgpu::Buffer, wgpu::BindGroup) {
        let uniform_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg"),
            layout: &self.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        (uniform_buffer, bind_group)
    }

    pub fn create_sprite_set(&self, instances: &[SpriteInstance], capacity: usize) -> SpriteSet {
        let capacity = capacity.max(instances.len()).max(1);
        let instance_vb = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sprite_instances"),
            size: (std::mem::size_of::<SpriteInstance>() * capacity) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        self.queue
            .write_buffer(&instance_vb, 0, bytemuck::cast_slice(instances));
        let (uniform_buffer, bind_group) = self.uniform_binding();
        SpriteSet {
            instance_vb,
            uniform_buffer,
            bind_group,
            count: instances.len() as u32,
            capacity: capacity as u32,
        }
    }

    pub fn update_sprite_set(&self, set: &mut SpriteSet, instances: &[SpriteInstance]) {
        let n = (instances.len() as u32).min(set.capacity);
        self.queue.write_buffer(
            &set.instance_vb,
            0,
            bytemuck::cast_slice(&instances[..n as usize]),
        );
        set.count = n;
    }

    pub fn create_tube_mesh(&self, mesh: &TubeMesh) -> MeshSet {
        let vertex_vb = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("tube_vertices"),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_ib = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("tube_indices"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        let (uniform_buffer, bind_group) = self.uniform_binding();
        MeshSet {
            vertex_vb,
            index_ib,
            uniform_buffer,
            bind_group,
            index_count: mesh.indices.len() as u32,
        }
    }

    pub fn create_line_set(&self, capacity_segments: usize) -> LineSet {
        let capacity_vertices = (capacity_segments.max(1) * 2) as u32;
        let vertex_vb = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("line_vertices"),
            size: (std::mem::size_of::<[f32; 3]>() as u32 * capacity_vertices) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let (uniform_buffer, bind_group) = self.uniform_binding();
        LineSet {
            vertex_vb,
            uniform_buffer,
            bind_group,
            vertex_count: 0,
            capacity_vertices,
        }
    }

    /// Replace the line geometry with the given segment endpoints. Called
    /// only when the proximity graph was rebuilt; between rebuilds the lines
    /// keep the endpoints captured here.
    pub fn update_line_set(&self, set: &mut LineSet, segments: &[(Vec3, Vec3)]) {
        let max_segments = (set.capacity_vertices / 2) as usize;
        if segments.len() > max_segments {
            log::warn!(
                "line set over capacity: {} segments, keeping {}",
                segments.len(),
                max_segments
            );
        }
        let mut data: Vec<[f32; 3]> = Vec::with_capacity(segments.len().min(max_segments) * 2);
        for &(a, b) in segments.iter().take(max_segments) {
            data.push(a.to_array());
            data.push(b.to_array());
        }
        self.queue
            .write_buffer(&set.vertex_vb, 0, bytemuck::cast_slice(&data));
        set.vertex_count = data.len() as u32;
    }

    pub fn render(&mut self, draws: &[Draw]) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view_tex = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        let view = self.view().to_cols_array_2d();
        let proj = self.proj().to_cols_array_2d();
        for draw in draws {
            let (buffer, model) = match draw {
                Draw::Sprites(set, model) => (&set.uniform_buffer, model),
                Draw::Mesh(set, model) => (&set.uniform_buffer, model),
                Draw::Lines(set, model) => (&set.uniform_buffer, model),
            };
            self.queue.write_buffer(
                buffer,
                0,
                bytemuck::bytes_of(&Uniforms {
                    view,
                    proj,
                    model: model.to_cols_array_2d(),
                }),
            );
        }

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("rpass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view_tex,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        for draw in draws {
            match draw {
                Draw::Sprites(set, _) => {
                    if set.count == 0 {
                        continue;
                    }
                    rpass.set_pipeline(&self.sprite_pipeline);
                    rpass.set_bind_group(0, &set.bind_group, &[]);
                    rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
                    rpass.set_vertex_buffer(1, set.instance_vb.slice(..));
                    rpass.draw(0..6, 0..set.count);
                }
                Draw::Mesh(set, _) => {
                    rpass.set_pipeline(&self.mesh_pipeline);
                    rpass.set_bind_group(0, &set.bind_group, &[]);
                    rpass.set_vertex_buffer(0, set.vertex_vb.slice(..));
                    rpass.set_index_buffer(set.index_ib.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..set.index_count, 0, 0..1);
                }
                Draw::Lines(set, _) => {
                    if set.vertex_count == 0 {
                        continue;
                    }
                    rpass.set_pipeline(&self.line_pipeline);
                    rpass.set_bind_group(0, &set.bind_group, &[]);
                    rpass.set_vertex_buffer(0, set.vertex_vb.slice(..));
                    rpass.draw(0..set.vertex_count, 0..1);
                }
            }
        }
        drop(rpass);
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn build_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    label: &str,
    shader_src: &str,
    vertex_buffers: &[wgpu::VertexBufferLayout],
    topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(shader_src.into()),
    });
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: vertex_buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology,
            ..wgpu::PrimitiveState::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}
