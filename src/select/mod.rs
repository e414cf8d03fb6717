//! Selection and negotiation logic for device and swapchain setup
//!
//! Everything in this module is a pure decision procedure over records the
//! driver layer has already enumerated: it never calls into Vulkan itself,
//! which is what makes it testable with synthetic input. The glue that feeds
//! it real driver data lives in [`crate::vulkan`].

pub mod capability;
pub mod device;
pub mod queue;
pub mod swapchain;

pub use capability::ensure_supported;
pub use device::{rate_suitability, select_best, DeviceTraits, ViabilityGates};
pub use queue::{resolve_queue_families, QueueFamilyIndices};
pub use swapchain::{negotiate, SurfaceSupport, SwapchainConfig};
