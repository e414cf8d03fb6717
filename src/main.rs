//! Demo binary: open a window, run the device/swapchain setup, idle until
//! the window is closed.

use anyhow::{Context, Result};
use log::{error, info};
use vulkan_bootstrap_demo::{SetupConfig, VulkanContext};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

struct App {
    config: SetupConfig,
    // Declared before the window so it is dropped first; the surface must
    // not outlive the window it was created from.
    context: Option<VulkanContext>,
    window: Option<Window>,
    failure: Option<anyhow::Error>,
}

impl App {
    fn new(config: SetupConfig) -> Self {
        Self {
            config,
            context: None,
            window: None,
            failure: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (width, height) = self.config.window_size;
        let window = event_loop
            .create_window(
                Window::default_attributes()
                    .with_title(self.config.app_name.clone())
                    .with_inner_size(winit::dpi::PhysicalSize::new(width, height))
                    .with_resizable(false),
            )
            .context("failed to create window")?;

        let context = VulkanContext::new(&window, &self.config)
            .context("device/swapchain setup failed")?;

        let config = context.swapchain_config();
        let (graphics, present) = context.queue_family_indices();
        info!(
            "ready: queues ({graphics}, {present}), {:?} {}x{}",
            config.format, config.extent.width, config.extent.height
        );

        self.window = Some(window);
        self.context = Some(context);
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            error!("{err:#}");
            self.failure = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::CloseRequested = event {
            // Tear the context down before the window it presents to.
            self.context.take();
            event_loop.exit();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(SetupConfig::default());
    event_loop.run_app(&mut app)?;

    match app.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
