//! Vulkan device and swapchain bootstrap
//!
//! This library prepares a graphics device and a presentable image chain:
//! it enumerates GPU-capable devices, validates required layers and
//! extensions, scores and selects a device with a graphics/presentation
//! queue pair, and negotiates a swapchain configuration (format, present
//! mode, extent, image count) compatible with both device and surface.
//!
//! The decision logic lives in [`select`] and is pure over enumerated
//! records; [`vulkan`] supplies the driver glue and the [`VulkanContext`]
//! that runs the whole startup sequence. [`array::GrowableList`] is the
//! uniform container behind every enumeration step.

pub mod array;
pub mod config;
pub mod error;
pub mod select;
pub mod vulkan;

pub use array::GrowableList;
pub use config::{SetupConfig, ValidationConfig};
pub use error::{SetupError, SetupResult};
pub use vulkan::VulkanContext;
