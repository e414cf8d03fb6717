//! Surface-support queries and swapchain creation

use ash::vk;
use log::info;

use crate::array::GrowableList;
use crate::error::SetupResult;
use crate::select::{negotiate, SurfaceSupport, SwapchainConfig};

/// The created swapchain with its negotiated configuration and per-image
/// views.
pub struct SwapchainBundle {
    pub swapchain: vk::SwapchainKHR,
    pub config: SwapchainConfig,
    pub images: GrowableList<vk::Image>,
    pub image_views: GrowableList<vk::ImageView>,
}

/// Query everything the surface supports for one device. Queried fresh per
/// device+surface pair; results are never reused across devices.
pub fn query_surface_support(
    surface_fns: &ash::khr::surface::Instance,
    device: vk::PhysicalDevice,
    surface: vk::SurfaceKHR,
) -> SetupResult<SurfaceSupport> {
    let capabilities =
        unsafe { surface_fns.get_physical_device_surface_capabilities(device, surface)? };
    let formats = GrowableList::from_vec(unsafe {
        surface_fns.get_physical_device_surface_formats(device, surface)?
    });
    let present_modes = GrowableList::from_vec(unsafe {
        surface_fns.get_physical_device_surface_present_modes(device, surface)?
    });

    Ok(SurfaceSupport {
        capabilities,
        formats,
        present_modes,
    })
}

/// Negotiate the configuration and create the swapchain plus one 2D color
/// view per image.
///
/// Images are shared across queue families only when graphics and
/// presentation resolved to different indices.
pub fn create_swapchain(
    swapchain_fns: &ash::khr::swapchain::Device,
    device: &ash::Device,
    support: &SurfaceSupport,
    surface: vk::SurfaceKHR,
    queue_families: (u32, u32),
    framebuffer_size: (u32, u32),
) -> SetupResult<SwapchainBundle> {
    let config = negotiate(support, || framebuffer_size);
    info!(
        "swapchain: {:?} {:?} {:?} {}x{} x{} images",
        config.format,
        config.color_space,
        config.present_mode,
        config.extent.width,
        config.extent.height,
        config.image_count
    );

    let (graphics, present) = queue_families;
    let family_indices = [graphics, present];

    let mut create_info = vk::SwapchainCreateInfoKHR::default()
        .surface(surface)
        .min_image_count(config.image_count)
        .image_format(config.format)
        .image_color_space(config.color_space)
        .image_extent(config.extent)
        .image_array_layers(1)
        .image_usage(vk::ImageUsageFlags::COLOR_ATTACHMENT)
        .pre_transform(support.capabilities.current_transform)
        .composite_alpha(vk::CompositeAlphaFlagsKHR::OPAQUE)
        .present_mode(config.present_mode)
        .clipped(true);

    if graphics != present {
        create_info = create_info
            .image_sharing_mode(vk::SharingMode::CONCURRENT)
            .queue_family_indices(&family_indices);
    } else {
        create_info = create_info.image_sharing_mode(vk::SharingMode::EXCLUSIVE);
    }

    let swapchain = unsafe { swapchain_fns.create_swapchain(&create_info, None)? };
    let images =
        GrowableList::from_vec(unsafe { swapchain_fns.get_swapchain_images(swapchain)? });

    let mut image_views = GrowableList::new();
    image_views.set_capacity(images.len());
    for &image in &images {
        image_views.push(create_image_view(device, image, config.format)?);
    }

    Ok(SwapchainBundle {
        swapchain,
        config,
        images,
        image_views,
    })
}

fn create_image_view(
    device: &ash::Device,
    image: vk::Image,
    format: vk::Format,
) -> SetupResult<vk::ImageView> {
    let create_info = vk::ImageViewCreateInfo::default()
        .image(image)
        .view_type(vk::ImageViewType::TYPE_2D)
        .format(format)
        .components(vk::ComponentMapping::default())
        .subresource_range(
            vk::ImageSubresourceRange::default()
                .aspect_mask(vk::ImageAspectFlags::COLOR)
                .base_mip_level(0)
                .level_count(1)
                .base_array_layer(0)
                .layer_count(1),
        );

    let view = unsafe { device.create_image_view(&create_info, None)? };
    Ok(view)
}
