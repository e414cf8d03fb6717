//! Error types for the library

use ash::vk;
use thiserror::Error;

/// Errors that can end the device and swapchain setup sequence.
///
/// Setup is all-or-nothing: every variant is fatal to initialization and is
/// propagated unchanged to the top-level handler in `main`.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("required capability not available: {0}")]
    MissingCapability(String),

    #[error("no viable graphics device found among {0} enumerated devices")]
    NoViableDevice(usize),

    #[error("selected device has no complete graphics/presentation queue family pair")]
    IncompleteQueueFamilies,

    #[error("capability name contains an interior NUL byte: {0}")]
    InvalidCapabilityName(#[from] std::ffi::NulError),

    #[error("failed to load Vulkan library: {0}")]
    Loading(#[from] ash::LoadingError),

    #[error("Vulkan call failed: {0}")]
    Vk(#[from] vk::Result),

    #[error("window handle unavailable: {0}")]
    WindowHandle(#[from] raw_window_handle::HandleError),
}

/// Convenience type alias for Results with [`SetupError`]
pub type SetupResult<T> = std::result::Result<T, SetupError>;
