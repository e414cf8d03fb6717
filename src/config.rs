//! Startup configuration
//!
//! Everything that used to be ambient, process-wide state (validation
//! toggle, layer and extension name tables) is carried as an explicit value
//! instead, so both the enabled and disabled paths can be exercised in the
//! same process.

/// Validation-layer settings for instance creation.
#[derive(Clone, Debug)]
pub struct ValidationConfig {
    pub enabled: bool,
    /// Layer names that must all be available when validation is enabled.
    pub layers: Vec<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enabled: cfg!(debug_assertions),
            layers: vec!["VK_LAYER_KHRONOS_validation".to_string()],
        }
    }
}

/// Configuration for the whole setup sequence.
#[derive(Clone, Debug)]
pub struct SetupConfig {
    pub app_name: String,
    /// Requested framebuffer size, used when the surface leaves the extent
    /// up to the application.
    pub window_size: (u32, u32),
    pub validation: ValidationConfig,
    /// Device extensions every viable device must support.
    pub device_extensions: Vec<String>,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            app_name: "Hello Triangle".to_string(),
            window_size: (800, 600),
            validation: ValidationConfig::default(),
            device_extensions: vec!["VK_KHR_swapchain".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_require_the_swapchain_extension() {
        let config = SetupConfig::default();
        assert_eq!(config.device_extensions, vec!["VK_KHR_swapchain"]);
        assert_eq!(config.window_size, (800, 600));
    }

    #[test]
    fn validation_can_be_toggled_per_value() {
        let mut config = SetupConfig::default();
        config.validation.enabled = false;
        assert!(!config.validation.enabled);

        config.validation.enabled = true;
        config.validation.layers.push("VK_LAYER_MESA_overlay".to_string());
        assert_eq!(config.validation.layers.len(), 2);
    }
}
