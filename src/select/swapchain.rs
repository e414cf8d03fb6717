//! Swapchain parameter negotiation
//!
//! Derives a concrete presentation configuration from what the device and
//! surface report as supported. Works on plain `ash::vk` value types so the
//! whole negotiation can run, and be tested, without a live driver.

use ash::vk;

use crate::array::GrowableList;

/// Everything the surface reports as supported for one device, queried fresh
/// per device+surface pair at negotiation time.
pub struct SurfaceSupport {
    pub capabilities: vk::SurfaceCapabilitiesKHR,
    pub formats: GrowableList<vk::SurfaceFormatKHR>,
    pub present_modes: GrowableList<vk::PresentModeKHR>,
}

impl SurfaceSupport {
    /// A device with no formats or no present modes cannot present at all.
    pub fn is_adequate(&self) -> bool {
        !self.formats.is_empty() && !self.present_modes.is_empty()
    }
}

/// The negotiated presentation configuration, the sole output artifact of
/// the selection core. Immutable once produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapchainConfig {
    pub format: vk::Format,
    pub color_space: vk::ColorSpaceKHR,
    pub present_mode: vk::PresentModeKHR,
    pub extent: vk::Extent2D,
    pub image_count: u32,
}

/// Negotiate a full swapchain configuration.
///
/// Every sub-selection has a guaranteed fallback, so negotiation cannot fail
/// on well-formed capability input. `framebuffer_size` is only queried when
/// the surface leaves the extent up to the application. Identical inputs
/// always produce an identical configuration.
///
/// Requires `support.is_adequate()`; the selector's viability gates filter
/// out devices that would violate that.
pub fn negotiate(
    support: &SurfaceSupport,
    framebuffer_size: impl FnOnce() -> (u32, u32),
) -> SwapchainConfig {
    let surface_format = choose_surface_format(&support.formats);
    let present_mode = choose_present_mode(&support.present_modes);
    let extent = choose_extent(&support.capabilities, framebuffer_size);
    let image_count = choose_image_count(&support.capabilities);

    SwapchainConfig {
        format: surface_format.format,
        color_space: surface_format.color_space,
        present_mode,
        extent,
        image_count,
    }
}

/// Prefer 8-bit BGRA with the standard non-linear color space; otherwise the
/// first listed pair. The fallback is arbitrary but deterministic, not a
/// quality ranking.
fn choose_surface_format(formats: &GrowableList<vk::SurfaceFormatKHR>) -> vk::SurfaceFormatKHR {
    formats
        .iter()
        .copied()
        .find(|candidate| {
            candidate.format == vk::Format::B8G8R8A8_SRGB
                && candidate.color_space == vk::ColorSpaceKHR::SRGB_NONLINEAR
        })
        .unwrap_or(formats[0])
}

/// Prefer low-latency mailbox; fall back to FIFO, which the specification
/// guarantees to be available.
fn choose_present_mode(modes: &GrowableList<vk::PresentModeKHR>) -> vk::PresentModeKHR {
    if modes.iter().any(|&mode| mode == vk::PresentModeKHR::MAILBOX) {
        vk::PresentModeKHR::MAILBOX
    } else {
        vk::PresentModeKHR::FIFO
    }
}

/// Use the surface-dictated extent verbatim unless its width carries the
/// "undefined" sentinel, in which case the requested framebuffer size is
/// clamped per dimension into the supported range.
fn choose_extent(
    capabilities: &vk::SurfaceCapabilitiesKHR,
    framebuffer_size: impl FnOnce() -> (u32, u32),
) -> vk::Extent2D {
    if capabilities.current_extent.width != u32::MAX {
        return capabilities.current_extent;
    }

    let (width, height) = framebuffer_size();
    vk::Extent2D {
        width: width.clamp(
            capabilities.min_image_extent.width,
            capabilities.max_image_extent.width,
        ),
        height: height.clamp(
            capabilities.min_image_extent.height,
            capabilities.max_image_extent.height,
        ),
    }
}

/// One image above the reported minimum avoids stalling on the driver;
/// a declared, non-zero maximum caps it (zero means no upper bound).
fn choose_image_count(capabilities: &vk::SurfaceCapabilitiesKHR) -> u32 {
    let mut count = capabilities.min_image_count + 1;
    if capabilities.max_image_count > 0 && count > capabilities.max_image_count {
        count = capabilities.max_image_count;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(format: vk::Format, color_space: vk::ColorSpaceKHR) -> vk::SurfaceFormatKHR {
        vk::SurfaceFormatKHR {
            format,
            color_space,
        }
    }

    fn capabilities() -> vk::SurfaceCapabilitiesKHR {
        vk::SurfaceCapabilitiesKHR {
            min_image_count: 2,
            max_image_count: 8,
            current_extent: vk::Extent2D {
                width: 640,
                height: 480,
            },
            min_image_extent: vk::Extent2D {
                width: 100,
                height: 100,
            },
            max_image_extent: vk::Extent2D {
                width: 2000,
                height: 2000,
            },
            ..Default::default()
        }
    }

    fn support_with(
        capabilities: vk::SurfaceCapabilitiesKHR,
        formats: Vec<vk::SurfaceFormatKHR>,
        present_modes: Vec<vk::PresentModeKHR>,
    ) -> SurfaceSupport {
        SurfaceSupport {
            capabilities,
            formats: GrowableList::from_vec(formats),
            present_modes: GrowableList::from_vec(present_modes),
        }
    }

    #[test]
    fn preferred_bgra_srgb_pair_wins() {
        let support = support_with(
            capabilities(),
            vec![
                format(vk::Format::R8G8B8A8_UNORM, vk::ColorSpaceKHR::SRGB_NONLINEAR),
                format(vk::Format::B8G8R8A8_SRGB, vk::ColorSpaceKHR::SRGB_NONLINEAR),
            ],
            vec![vk::PresentModeKHR::FIFO],
        );

        let config = negotiate(&support, || (800, 600));
        assert_eq!(config.format, vk::Format::B8G8R8A8_SRGB);
        assert_eq!(config.color_space, vk::ColorSpaceKHR::SRGB_NONLINEAR);
    }

    #[test]
    fn format_falls_back_to_first_entry() {
        let support = support_with(
            capabilities(),
            vec![
                format(vk::Format::R8G8B8A8_UNORM, vk::ColorSpaceKHR::SRGB_NONLINEAR),
                format(vk::Format::B8G8R8A8_UNORM, vk::ColorSpaceKHR::SRGB_NONLINEAR),
            ],
            vec![vk::PresentModeKHR::FIFO],
        );

        let config = negotiate(&support, || (800, 600));
        assert_eq!(config.format, vk::Format::R8G8B8A8_UNORM);
    }

    #[test]
    fn bgra_format_with_wrong_color_space_is_not_preferred() {
        let support = support_with(
            capabilities(),
            vec![
                format(vk::Format::R8G8B8A8_SRGB, vk::ColorSpaceKHR::SRGB_NONLINEAR),
                format(
                    vk::Format::B8G8R8A8_SRGB,
                    vk::ColorSpaceKHR::EXTENDED_SRGB_LINEAR_EXT,
                ),
            ],
            vec![vk::PresentModeKHR::FIFO],
        );

        let config = negotiate(&support, || (800, 600));
        assert_eq!(config.format, vk::Format::R8G8B8A8_SRGB);
    }

    #[test]
    fn mailbox_present_mode_is_preferred() {
        let support = support_with(
            capabilities(),
            vec![format(vk::Format::B8G8R8A8_SRGB, vk::ColorSpaceKHR::SRGB_NONLINEAR)],
            vec![
                vk::PresentModeKHR::FIFO,
                vk::PresentModeKHR::MAILBOX,
                vk::PresentModeKHR::IMMEDIATE,
            ],
        );

        let config = negotiate(&support, || (800, 600));
        assert_eq!(config.present_mode, vk::PresentModeKHR::MAILBOX);
    }

    #[test]
    fn present_mode_falls_back_to_fifo() {
        let support = support_with(
            capabilities(),
            vec![format(vk::Format::B8G8R8A8_SRGB, vk::ColorSpaceKHR::SRGB_NONLINEAR)],
            vec![vk::PresentModeKHR::IMMEDIATE],
        );

        let config = negotiate(&support, || (800, 600));
        assert_eq!(config.present_mode, vk::PresentModeKHR::FIFO);
    }

    #[test]
    fn surface_dictated_extent_is_used_verbatim() {
        let support = support_with(
            capabilities(),
            vec![format(vk::Format::B8G8R8A8_SRGB, vk::ColorSpaceKHR::SRGB_NONLINEAR)],
            vec![vk::PresentModeKHR::FIFO],
        );

        // The provider must not even be consulted.
        let config = negotiate(&support, || panic!("framebuffer size queried"));
        assert_eq!(
            config.extent,
            vk::Extent2D {
                width: 640,
                height: 480
            }
        );
    }

    #[test]
    fn undefined_extent_clamps_each_dimension_independently() {
        let mut caps = capabilities();
        caps.current_extent.width = u32::MAX;
        let support = support_with(
            caps,
            vec![format(vk::Format::B8G8R8A8_SRGB, vk::ColorSpaceKHR::SRGB_NONLINEAR)],
            vec![vk::PresentModeKHR::FIFO],
        );

        let config = negotiate(&support, || (50, 3000));
        assert_eq!(
            config.extent,
            vk::Extent2D {
                width: 100,
                height: 2000
            }
        );
    }

    #[test]
    fn image_count_is_min_plus_one() {
        let support = support_with(
            capabilities(),
            vec![format(vk::Format::B8G8R8A8_SRGB, vk::ColorSpaceKHR::SRGB_NONLINEAR)],
            vec![vk::PresentModeKHR::FIFO],
        );

        assert_eq!(negotiate(&support, || (800, 600)).image_count, 3);
    }

    #[test]
    fn image_count_clamps_to_declared_maximum() {
        let mut caps = capabilities();
        caps.min_image_count = 4;
        caps.max_image_count = 4;
        let support = support_with(
            caps,
            vec![format(vk::Format::B8G8R8A8_SRGB, vk::ColorSpaceKHR::SRGB_NONLINEAR)],
            vec![vk::PresentModeKHR::FIFO],
        );

        assert_eq!(negotiate(&support, || (800, 600)).image_count, 4);
    }

    #[test]
    fn zero_maximum_means_unbounded() {
        let mut caps = capabilities();
        caps.min_image_count = 6;
        caps.max_image_count = 0;
        let support = support_with(
            caps,
            vec![format(vk::Format::B8G8R8A8_SRGB, vk::ColorSpaceKHR::SRGB_NONLINEAR)],
            vec![vk::PresentModeKHR::FIFO],
        );

        assert_eq!(negotiate(&support, || (800, 600)).image_count, 7);
    }

    #[test]
    fn negotiation_is_idempotent() {
        let mut caps = capabilities();
        caps.current_extent.width = u32::MAX;
        let build = || {
            support_with(
                caps,
                vec![
                    format(vk::Format::R8G8B8A8_UNORM, vk::ColorSpaceKHR::SRGB_NONLINEAR),
                    format(vk::Format::B8G8R8A8_SRGB, vk::ColorSpaceKHR::SRGB_NONLINEAR),
                ],
                vec![vk::PresentModeKHR::MAILBOX, vk::PresentModeKHR::FIFO],
            )
        };

        let first = negotiate(&build(), || (1280, 720));
        let second = negotiate(&build(), || (1280, 720));
        assert_eq!(first, second);
    }

    #[test]
    fn adequacy_requires_formats_and_present_modes() {
        let empty_formats = support_with(capabilities(), vec![], vec![vk::PresentModeKHR::FIFO]);
        assert!(!empty_formats.is_adequate());

        let empty_modes = support_with(
            capabilities(),
            vec![format(vk::Format::B8G8R8A8_SRGB, vk::ColorSpaceKHR::SRGB_NONLINEAR)],
            vec![],
        );
        assert!(!empty_modes.is_adequate());
    }
}
