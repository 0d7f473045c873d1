//! Effect state, the tick loop, and the windowed runner.

use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::canvas::{Canvas, Surface};
use crate::color::Color;
use crate::config::Config;
use crate::error::{ConfigError, RunError};
use crate::gpu::GpuState;
use crate::project::Projection;
use crate::render;
use crate::spawn::{self, Spawner, MAX_RESPAWN_ATTEMPTS};
use crate::store::{Particle, PointStore};
use crate::time::{TickStats, TickTimer};

const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;

/// Observer invoked once per tick with timing stats.
pub type TickObserver = Box<dyn FnMut(TickStats)>;

/// A starfield effect builder.
///
/// Use method chaining to configure, then call `.run()` to open a window,
/// or `.build()` for an [`Effect`] you drive against your own surface.
pub struct Starfield {
    config: Config,
    observer: Option<TickObserver>,
    seed: Option<u64>,
    title: String,
}

impl Starfield {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            observer: None,
            seed: None,
            title: "Stardrift".to_string(),
        }
    }

    /// Base point size in pixels before projection.
    pub fn with_point_size(mut self, size: f32) -> Self {
        self.config.point_size = size;
        self
    }

    /// Number of simulated particles.
    pub fn with_num_points(mut self, count: usize) -> Self {
        self.config.num_points = count;
        self
    }

    /// Focal length of the pinhole camera.
    pub fn with_focal_length(mut self, focal_length: f32) -> Self {
        self.config.focal_length = focal_length;
        self
    }

    /// Depth at which recycled particles respawn.
    pub fn with_start_distance(mut self, distance: f32) -> Self {
        self.config.start_distance = distance;
        self
    }

    /// Full width of the lateral spawn window.
    pub fn with_start_spread(mut self, spread: f32) -> Self {
        self.config.start_spread = spread;
        self
    }

    /// Depth units travelled per unit of simulated time.
    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.config.velocity = velocity;
        self
    }

    /// Simulated time increment per tick.
    pub fn with_time_step(mut self, time_step: f32) -> Self {
        self.config.time_step = time_step;
        self
    }

    /// Wall-clock interval between ticks.
    pub fn with_step_interval(mut self, interval: Duration) -> Self {
        self.config.step_interval = interval;
        self
    }

    /// Background fill color.
    pub fn with_bg_color(mut self, color: Color) -> Self {
        self.config.bg_color = color;
        self
    }

    /// Palette sampled uniformly at spawn time. Must be non-empty.
    pub fn with_point_colors(mut self, colors: Vec<Color>) -> Self {
        self.config.point_colors = colors;
        self
    }

    /// Window title for `.run()`.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Fix the RNG seed for a reproducible field.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Observe every tick. The classic use is an FPS logger.
    pub fn with_tick_observer<F>(mut self, observer: F) -> Self
    where
        F: FnMut(TickStats) + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Validate the configuration and build a free-standing effect.
    pub fn build(self) -> Result<Effect, ConfigError> {
        self.config.validate()?;

        let palette = self.config.point_colors.clone();
        let spawner = match self.seed {
            Some(seed) => Spawner::with_seed(
                self.config.start_distance,
                self.config.start_spread,
                palette,
                seed,
            ),
            None => Spawner::new(
                self.config.start_distance,
                self.config.start_spread,
                palette,
            ),
        };

        Ok(Effect::new(self.config, spawner, self.observer))
    }

    /// Open a window and run the effect until the window closes.
    ///
    /// Dropping out of this call cancels the tick schedule and tears the
    /// effect down.
    pub fn run(self) -> Result<(), RunError> {
        let interval = self.config.step_interval;
        let title = self.title.clone();
        let effect = self.build()?;

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(effect, interval, title);
        event_loop.run_app(&mut app)?;
        app.into_result()
    }
}

impl Default for Starfield {
    fn default() -> Self {
        Self::new()
    }
}

/// A running starfield: the point store plus everything needed to advance
/// it one tick at a time.
///
/// The store is owned exclusively; nothing outside the effect holds an
/// index into it.
pub struct Effect {
    config: Config,
    store: PointStore,
    spawner: Spawner,
    timer: TickTimer,
    observer: Option<TickObserver>,
}

impl Effect {
    /// Build the initial field: every slot spawned fresh, then given a
    /// random depth in (0, 1) so the particles are not in lock-step.
    pub(crate) fn new(config: Config, mut spawner: Spawner, observer: Option<TickObserver>) -> Self {
        let points = (0..config.num_points)
            .map(|_| {
                let mut particle = spawner.spawn();
                particle.depth = spawner.initial_depth();
                particle
            })
            .collect();

        Self {
            config,
            store: PointStore::new(points),
            spawner,
            timer: TickTimer::new(),
            observer,
        }
    }

    /// The resolved configuration this effect runs with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read-only view of the particle field.
    pub fn store(&self) -> &PointStore {
        &self.store
    }

    /// Ticks completed so far.
    pub fn frame(&self) -> u64 {
        self.timer.frame()
    }

    /// Advance the simulation by one tick, painting into `surface`.
    ///
    /// Clears the surface, then for each particle in index order:
    /// project, recycle until the projection is in view, draw, and step
    /// the depth forward by `velocity * time_step`. The depth step also
    /// applies to particles spawned this tick.
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let started = Instant::now();

        surface.clear(self.config.bg_color);

        for i in 0..self.store.len() {
            let mut particle = self.store.get(i);
            let mut projection = self.projection_of(&particle);

            if spawn::needs_recycle(&projection) {
                (particle, projection) = self.recycle(i, projection);
            }

            render::draw_point(surface, &projection, particle.color);

            particle.depth -= self.config.velocity * self.config.time_step;
            self.store.set(i, particle);
        }

        let stats = self.timer.record(started.elapsed());
        if let Some(observer) = self.observer.as_mut() {
            observer(stats);
        }
    }

    fn projection_of(&self, particle: &Particle) -> Projection {
        Projection::of(particle, self.config.focal_length, self.config.point_size)
    }

    /// Rejection-sample a replacement for particle `index` until it
    /// projects in view. Bounded: after `MAX_RESPAWN_ATTEMPTS` the
    /// particle is forced onto the view axis so the loop cannot spin
    /// forever on a pathological configuration.
    fn recycle(&mut self, index: usize, mut projection: Projection) -> (Particle, Projection) {
        let mut particle = self.store.get(index);
        let mut attempts = 0;

        while spawn::needs_recycle(&projection) {
            if attempts >= MAX_RESPAWN_ATTEMPTS {
                log::warn!(
                    "particle {} failed to respawn in view after {} attempts, forcing to center",
                    index,
                    attempts
                );
                particle = self.spawner.fallback();
                projection = self.projection_of(&particle);
                break;
            }
            particle = self.spawner.spawn();
            projection = self.projection_of(&particle);
            attempts += 1;
        }

        self.store.set(index, particle);
        (particle, projection)
    }
}

/// Winit application driving an [`Effect`] at a fixed tick interval.
struct App {
    effect: Effect,
    canvas: Canvas,
    interval: Duration,
    title: String,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    next_tick: Instant,
    error: Option<RunError>,
}

impl App {
    fn new(effect: Effect, interval: Duration, title: String) -> Self {
        Self {
            effect,
            canvas: Canvas::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
            interval,
            title,
            window: None,
            gpu: None,
            next_tick: Instant::now(),
            error: None,
        }
    }

    fn into_result(self) -> Result<(), RunError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: RunError) {
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                DEFAULT_WINDOW_WIDTH,
                DEFAULT_WINDOW_HEIGHT,
            ));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, RunError::Window(e)),
        };

        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));
        self.canvas.resize(width, height);

        match pollster::block_on(GpuState::new(window.clone(), width, height)) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => return self.fail(event_loop, RunError::Gpu(e)),
        }

        self.window = Some(window);
        self.next_tick = Instant::now();
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.window.clone() else {
            return;
        };

        let now = Instant::now();
        if now >= self.next_tick {
            self.effect.step(&mut self.canvas);
            window.request_redraw();
            // An overrunning tick pushes the next one back; ticks are
            // delayed, never dropped, never overlapping.
            self.next_tick = now + self.interval;
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                let (width, height) = (size.width.max(1), size.height.max(1));
                self.canvas.resize(width, height);
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(width, height);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(gpu) = &mut self.gpu {
                    match gpu.render(&self.canvas) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            gpu.resize(self.canvas.width(), self.canvas.height());
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("GPU surface out of memory");
                            event_loop.exit();
                        }
                        Err(e) => log::warn!("render error: {:?}", e),
                    }
                }
            }
            _ => {}
        }
    }
}
