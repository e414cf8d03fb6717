//! Vulkan driver glue: the fixed-sequence object lifecycle
//!
//! Every module here is a thin layer of capability queries and
//! handle-creation calls; the decisions themselves come from
//! [`crate::select`]. [`VulkanContext`] strings the sequence together and
//! tears everything down in reverse creation order on drop.

pub mod debug;
pub mod device;
pub mod instance;
pub mod swapchain;

use ash::{vk, Entry, Instance};
use log::info;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use winit::window::Window;

use crate::array::GrowableList;
use crate::config::SetupConfig;
use crate::error::{SetupError, SetupResult};
use crate::select::SwapchainConfig;

/// Owns the full chain of setup objects, from loader entry to swapchain
/// image views.
///
/// The surface borrows the window only during creation; the caller must
/// keep the window alive for as long as the context exists.
pub struct VulkanContext {
    _entry: Entry,
    instance: Instance,
    debug_messenger: Option<debug::DebugMessenger>,
    surface_fns: ash::khr::surface::Instance,
    surface: vk::SurfaceKHR,
    physical_device: vk::PhysicalDevice,
    device: ash::Device,
    graphics_queue_family: u32,
    present_queue_family: u32,
    graphics_queue: vk::Queue,
    present_queue: vk::Queue,
    swapchain_fns: ash::khr::swapchain::Device,
    swapchain: vk::SwapchainKHR,
    swapchain_config: SwapchainConfig,
    _images: GrowableList<vk::Image>,
    image_views: GrowableList<vk::ImageView>,
}

impl VulkanContext {
    /// Run the whole setup sequence: instance, debug messenger, surface,
    /// device selection, logical device, swapchain, image views.
    ///
    /// Any failure along the way propagates out unchanged; there is no
    /// degraded mode, a renderer without a device and swapchain cannot run.
    pub fn new(window: &Window, config: &SetupConfig) -> SetupResult<Self> {
        let display_handle = window.display_handle()?.as_raw();
        let window_handle = window.window_handle()?.as_raw();

        let entry = unsafe { Entry::load()? };
        let instance = instance::create_instance(&entry, display_handle, config)?;

        let debug_messenger = if config.validation.enabled {
            Some(debug::DebugMessenger::new(&entry, &instance)?)
        } else {
            None
        };

        let surface_fns = ash::khr::surface::Instance::new(&entry, &instance);
        let surface = unsafe {
            ash_window::create_surface(&entry, &instance, display_handle, window_handle, None)?
        };

        let selected = device::pick_physical_device(&instance, &surface_fns, surface, config)?;
        let (graphics_family, present_family) = selected
            .queue_families
            .complete()
            .ok_or(SetupError::IncompleteQueueFamilies)?;

        let (device, graphics_queue, present_queue) =
            device::create_logical_device(&instance, &selected, config)?;

        let support =
            swapchain::query_surface_support(&surface_fns, selected.physical_device, surface)?;
        let size = window.inner_size();

        let swapchain_fns = ash::khr::swapchain::Device::new(&instance, &device);
        let bundle = swapchain::create_swapchain(
            &swapchain_fns,
            &device,
            &support,
            surface,
            (graphics_family, present_family),
            (size.width, size.height),
        )?;

        info!(
            "setup complete: graphics queue family {graphics_family}, present queue family {present_family}"
        );

        Ok(Self {
            _entry: entry,
            instance,
            debug_messenger,
            surface_fns,
            surface,
            physical_device: selected.physical_device,
            device,
            graphics_queue_family: graphics_family,
            present_queue_family: present_family,
            graphics_queue,
            present_queue,
            swapchain_fns,
            swapchain: bundle.swapchain,
            swapchain_config: bundle.config,
            _images: bundle.images,
            image_views: bundle.image_views,
        })
    }

    pub fn physical_device(&self) -> vk::PhysicalDevice {
        self.physical_device
    }

    /// The `(graphics, present)` queue family indices; they may be equal.
    pub fn queue_family_indices(&self) -> (u32, u32) {
        (self.graphics_queue_family, self.present_queue_family)
    }

    pub fn graphics_queue(&self) -> vk::Queue {
        self.graphics_queue
    }

    pub fn present_queue(&self) -> vk::Queue {
        self.present_queue
    }

    /// The negotiated presentation configuration.
    pub fn swapchain_config(&self) -> SwapchainConfig {
        self.swapchain_config
    }
}

impl Drop for VulkanContext {
    fn drop(&mut self) {
        unsafe {
            for &view in &self.image_views {
                self.device.destroy_image_view(view, None);
            }
            self.swapchain_fns.destroy_swapchain(self.swapchain, None);
            self.device.destroy_device(None);
            if let Some(messenger) = self.debug_messenger.as_mut() {
                messenger.destroy();
            }
            self.surface_fns.destroy_surface(self.surface, None);
            self.instance.destroy_instance(None);
        }
    }
}
