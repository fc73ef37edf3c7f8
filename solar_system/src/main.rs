//! Solar System
//!
//! The Sun and eight planets under Newtonian gravity, advanced one simulated
//! day per frame at 60 frames per second and rendered with wgpu. Each planet
//! leaves a trail and shows its distance from the Sun.
//!
//! Controls:
//! - Arrow keys: Grow/shrink the window by 100 px
//! - +/- or scroll: Zoom the orbit scale
//! - [ / ]: Shrink/grow body sizes
//! - Space: Pause/resume simulation
//! - T: Toggle trails
//! - E: Toggle equations panel
//! - R: Restart from the initial configuration
//!
//! Set `RUST_LOG` to change the log level (default `info`).

mod display;
mod equations_ui;
mod renderer;

use std::time::{Duration, Instant};

use common::{Camera2D, GraphicsContext};
use display::DisplayConfig;
use equations_ui::{draw_distance_readouts, draw_equations_sidebar, ORBIT_EQUATIONS, ORBIT_VARIABLES};
use renderer::Renderer;
use solar_system::{presets, PhysicsConfig, Simulation};
use winit::{
    event::{ElementState, Event, KeyEvent, MouseScrollDelta, WindowEvent},
    event_loop::ControlFlow,
    keyboard::{KeyCode, PhysicalKey},
};

const FRAME_RATE: u32 = 60;
const WINDOW_SIZE: u32 = 800;
const RESIZE_STEP: i64 = 100;
const ZOOM_STEP: f64 = 1.25;
const SIZE_STEP: f64 = 1.25;

struct EguiState {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

struct App {
    ctx: GraphicsContext,
    renderer: Renderer,
    camera: Camera2D,
    simulation: Simulation,
    colors: Vec<[f32; 4]>,
    display: DisplayConfig,
    paused: bool,
    show_trails: bool,
    show_equations: bool,
    halted: Option<String>,
    /// Set by the frame clock; OS-initiated redraws do not advance physics
    tick_due: bool,
    egui: EguiState,
}

/// Build the default system: the Sun followed by its planets
fn load_system(config: PhysicsConfig) -> (Simulation, Vec<[f32; 4]>) {
    let preset = presets::solar_system(&config).expect("Built-in solar system is invalid");
    let colors = preset.iter().map(|p| p.color).collect();
    let bodies = preset.into_iter().map(|p| p.body).collect();
    let simulation = Simulation::new(bodies, config).expect("Built-in solar system is invalid");
    (simulation, colors)
}

impl App {
    fn new(ctx: GraphicsContext) -> Self {
        let (simulation, colors) = load_system(PhysicsConfig::default());
        let renderer = Renderer::new(&ctx, simulation.bodies().len());
        let camera = Camera2D::pixel_space(ctx.size.width, ctx.size.height);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &ctx.window,
            Some(ctx.window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&ctx.device, ctx.config.format, None, 1);

        Self {
            ctx,
            renderer,
            camera,
            simulation,
            colors,
            display: DisplayConfig::default(),
            paused: false,
            show_trails: true,
            show_equations: true,
            halted: None,
            tick_due: false,
            egui: EguiState {
                ctx: egui_ctx,
                state: egui_state,
                renderer: egui_renderer,
            },
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
        self.camera.fit_pixels(self.ctx.size.width, self.ctx.size.height);
    }

    /// One frame, one tick
    fn update(&mut self) {
        if !std::mem::take(&mut self.tick_due) || self.paused || self.halted.is_some() {
            return;
        }

        if let Err(err) = self.simulation.step() {
            log::error!("Simulation stopped after {} ticks: {err}", self.simulation.ticks());
            self.halted = Some(err.to_string());
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.update_camera(&self.ctx.queue, &self.camera);
        let frame = self.renderer.update(
            &self.ctx.queue,
            self.simulation.bodies(),
            &self.colors,
            &self.display,
        );

        let width = self.ctx.size.width as f32;
        let height = self.ctx.size.height as f32;

        let raw_input = self.egui.state.take_egui_input(&self.ctx.window);
        let full_output = self.egui.ctx.run(raw_input, |ctx| {
            if self.show_equations {
                draw_equations_sidebar(ctx, "Solar System", ORBIT_EQUATIONS, ORBIT_VARIABLES);
            }

            egui::TopBottomPanel::top("status").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let days = self.simulation.elapsed() / 86_400.0;
                    ui.label(format!("Day {:.0}", days));
                    ui.separator();
                    ui.label(format!(
                        "Scale: {:.3e} m/px",
                        self.display.orbit_scale()
                    ));
                    ui.separator();
                    ui.label(format!("Size: {:.2}x", self.display.size_scale()));
                    ui.separator();
                    if let Some(err) = &self.halted {
                        ui.label(egui::RichText::new(format!("STOPPED: {err}")).color(egui::Color32::RED));
                    } else if self.paused {
                        ui.label(egui::RichText::new("PAUSED").color(egui::Color32::YELLOW));
                    } else {
                        ui.label(egui::RichText::new("RUNNING").color(egui::Color32::GREEN));
                    }
                });
            });

            draw_distance_readouts(ctx, self.simulation.bodies(), &self.display, width, height);
        });

        self.egui
            .state
            .handle_platform_output(&self.ctx.window, full_output.platform_output);
        let tris = self
            .egui
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui
                .renderer
                .update_texture(&self.ctx.device, &self.ctx.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.ctx.size.width, self.ctx.size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer
            .render(&mut encoder, &view, &frame, self.show_trails);

        self.egui.renderer.update_buffers(
            &self.ctx.device,
            &self.ctx.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui
                .renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui.renderer.free_texture(id);
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        if state != ElementState::Pressed {
            return;
        }

        let width = self.ctx.size.width as i64;
        let height = self.ctx.size.height as i64;

        match key {
            KeyCode::ArrowUp => self.resize_window(width, height + RESIZE_STEP),
            KeyCode::ArrowDown => self.resize_window(width, height - RESIZE_STEP),
            KeyCode::ArrowLeft => self.resize_window(width - RESIZE_STEP, height),
            KeyCode::ArrowRight => self.resize_window(width + RESIZE_STEP, height),
            KeyCode::Equal | KeyCode::NumpadAdd => self.zoom(ZOOM_STEP),
            KeyCode::Minus | KeyCode::NumpadSubtract => self.zoom(1.0 / ZOOM_STEP),
            KeyCode::BracketRight => self.scale_sizes(SIZE_STEP),
            KeyCode::BracketLeft => self.scale_sizes(1.0 / SIZE_STEP),
            KeyCode::Space => self.paused = !self.paused,
            KeyCode::KeyT => self.show_trails = !self.show_trails,
            KeyCode::KeyE => self.show_equations = !self.show_equations,
            KeyCode::KeyR => self.restart(),
            _ => {}
        }
    }

    fn resize_window(&mut self, width: i64, height: i64) {
        if let Some(applied) = self.ctx.request_resize(width, height) {
            self.resize(applied);
        }
    }

    fn handle_scroll(&mut self, delta: f32) {
        self.zoom(ZOOM_STEP.powf(delta as f64));
    }

    fn zoom(&mut self, factor: f64) {
        if let Err(err) = self.display.zoom(factor) {
            log::warn!("Ignoring zoom: {err}");
        }
    }

    fn scale_sizes(&mut self, factor: f64) {
        let scale = self.display.size_scale() * factor;
        if let Err(err) = self.display.set_size_scale(scale) {
            log::warn!("Ignoring size change: {err}");
        }
    }

    fn restart(&mut self) {
        let (simulation, colors) = load_system(*self.simulation.config());
        self.simulation = simulation;
        self.colors = colors;
        self.halted = None;
        log::info!("Simulation restarted");
    }

    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.egui
            .state
            .on_window_event(&self.ctx.window, event)
            .consumed
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (ctx, event_loop) = pollster::block_on(GraphicsContext::new(
        "Solar System",
        WINDOW_SIZE,
        WINDOW_SIZE,
    ));

    let mut app = App::new(ctx);
    let frame_time = Duration::from_secs(1) / FRAME_RATE;
    let mut next_frame = Instant::now();

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { ref event, .. } => {
                let consumed = app.handle_window_event(event);

                match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Resized(size) => app.resize(*size),
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                physical_key: PhysicalKey::Code(key),
                                state,
                                ..
                            },
                        ..
                    } if !consumed => app.handle_key(*key, *state),
                    WindowEvent::MouseWheel { delta, .. } if !consumed => {
                        let scroll = match delta {
                            MouseScrollDelta::LineDelta(_, y) => *y,
                            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                        };
                        app.handle_scroll(scroll);
                    }
                    WindowEvent::RedrawRequested => {
                        app.update();
                        match app.render() {
                            Ok(_) => {}
                            Err(wgpu::SurfaceError::Lost) => app.resize(app.ctx.size),
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                log::error!("GPU out of memory");
                                elwt.exit();
                            }
                            Err(e) => log::warn!("Render error: {:?}", e),
                        }
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                // 60 Hz frame clock; every frame advances exactly one fixed tick
                let now = Instant::now();
                if now >= next_frame {
                    app.tick_due = true;
                    app.ctx.window.request_redraw();
                    next_frame += frame_time;
                    if next_frame < now {
                        next_frame = now + frame_time;
                    }
                }
                elwt.set_control_flow(ControlFlow::WaitUntil(next_frame));
            }
            _ => {}
        })
        .expect("Event loop error");
}
