//! Physical-device selection and logical-device creation

use std::ffi::{c_char, CStr, CString};

use ash::{vk, Instance};
use log::{debug, info};

use super::swapchain::query_surface_support;
use crate::array::GrowableList;
use crate::config::SetupConfig;
use crate::error::{SetupError, SetupResult};
use crate::select::{
    ensure_supported, rate_suitability, resolve_queue_families, select_best, DeviceTraits,
    QueueFamilyIndices, ViabilityGates,
};

/// The chosen physical device together with its resolved queue families.
pub struct SelectedDevice {
    pub physical_device: vk::PhysicalDevice,
    pub queue_families: QueueFamilyIndices,
}

/// Enumerate all physical devices, score each against the target surface,
/// and keep the best viable one.
pub fn pick_physical_device(
    instance: &Instance,
    surface_fns: &ash::khr::surface::Instance,
    surface: vk::SurfaceKHR,
    config: &SetupConfig,
) -> SetupResult<SelectedDevice> {
    let devices =
        GrowableList::from_vec(unsafe { instance.enumerate_physical_devices()? });

    let physical_device = select_best(&devices, |device| {
        rate_device(instance, surface_fns, surface, device, &config.device_extensions)
            .unwrap_or(0)
    })?;

    // Re-resolve on the winner; scoring guaranteed completeness, but the
    // indices themselves were discarded with the per-candidate state.
    let queue_families = device_queue_families(instance, surface_fns, surface, physical_device)?;
    if !queue_families.is_complete() {
        return Err(SetupError::IncompleteQueueFamilies);
    }

    let properties = unsafe { instance.get_physical_device_properties(physical_device) };
    let name = unsafe { CStr::from_ptr(properties.device_name.as_ptr()) }.to_string_lossy();
    info!("selected device: {name} ({:?})", properties.device_type);

    Ok(SelectedDevice {
        physical_device,
        queue_families,
    })
}

/// Score one candidate: heuristic traits from its properties and features,
/// viability gates from queue resolution, extension support, and surface
/// support. Driver errors during the probes surface as a 0 score at the
/// call site, never as an abort of the whole scan.
fn rate_device(
    instance: &Instance,
    surface_fns: &ash::khr::surface::Instance,
    surface: vk::SurfaceKHR,
    device: vk::PhysicalDevice,
    required_extensions: &[String],
) -> SetupResult<i32> {
    let properties = unsafe { instance.get_physical_device_properties(device) };
    let features = unsafe { instance.get_physical_device_features(device) };

    let traits = DeviceTraits {
        discrete: properties.device_type == vk::PhysicalDeviceType::DISCRETE_GPU,
        max_image_dimension_2d: properties.limits.max_image_dimension2_d,
        geometry_shader: features.geometry_shader == vk::TRUE,
    };

    let queue_families = device_queue_families(instance, surface_fns, surface, device)?;
    let extensions = available_device_extensions(instance, device)?;
    let support = query_surface_support(surface_fns, device, surface)?;

    let gates = ViabilityGates {
        queues_complete: queue_families.is_complete(),
        extensions_supported: ensure_supported(required_extensions, &extensions).is_ok(),
        has_surface_formats: !support.formats.is_empty(),
        has_present_modes: !support.present_modes.is_empty(),
    };

    let score = rate_suitability(traits, gates);
    let name = unsafe { CStr::from_ptr(properties.device_name.as_ptr()) }.to_string_lossy();
    debug!("candidate device {name}: score {score}");
    Ok(score)
}

/// Resolve graphics/presentation queue families for one device, probing
/// presentation support against the target surface per family index.
pub fn device_queue_families(
    instance: &Instance,
    surface_fns: &ash::khr::surface::Instance,
    surface: vk::SurfaceKHR,
    device: vk::PhysicalDevice,
) -> SetupResult<QueueFamilyIndices> {
    let families = GrowableList::from_vec(unsafe {
        instance.get_physical_device_queue_family_properties(device)
    });

    Ok(resolve_queue_families(&families, |index| unsafe {
        surface_fns
            .get_physical_device_surface_support(device, index, surface)
            .unwrap_or(false)
    }))
}

fn available_device_extensions(
    instance: &Instance,
    device: vk::PhysicalDevice,
) -> SetupResult<GrowableList<String>> {
    let properties = unsafe { instance.enumerate_device_extension_properties(device)? };

    let mut extensions = GrowableList::new();
    extensions.set_capacity(properties.len());
    for extension in &properties {
        extensions.push(
            unsafe { CStr::from_ptr(extension.extension_name.as_ptr()) }
                .to_string_lossy()
                .into_owned(),
        );
    }
    Ok(extensions)
}

/// Create the logical device with one queue (priority 1.0) per unique
/// family index, then fetch both queues. The portability-subset extension
/// is enabled only when the device actually exposes it.
pub fn create_logical_device(
    instance: &Instance,
    selected: &SelectedDevice,
    config: &SetupConfig,
) -> SetupResult<(ash::Device, vk::Queue, vk::Queue)> {
    let (graphics, present) = selected
        .queue_families
        .complete()
        .ok_or(SetupError::IncompleteQueueFamilies)?;

    let mut unique_families = GrowableList::new();
    unique_families.push(graphics);
    if present != graphics {
        unique_families.push(present);
    }

    let queue_priority = [1.0f32];
    let queue_infos: Vec<vk::DeviceQueueCreateInfo> = unique_families
        .iter()
        .map(|&family| {
            vk::DeviceQueueCreateInfo::default()
                .queue_family_index(family)
                .queue_priorities(&queue_priority)
        })
        .collect();

    let mut extension_names: Vec<CString> = config
        .device_extensions
        .iter()
        .map(|name| CString::new(name.as_str()))
        .collect::<Result<_, _>>()?;

    let available = available_device_extensions(instance, selected.physical_device)?;
    let portability = ash::khr::portability_subset::NAME;
    if available
        .iter()
        .any(|name| name.as_bytes() == portability.to_bytes())
    {
        extension_names.push(portability.to_owned());
    }

    let extension_name_ptrs: Vec<*const c_char> =
        extension_names.iter().map(|name| name.as_ptr()).collect();

    let features = vk::PhysicalDeviceFeatures::default();
    let create_info = vk::DeviceCreateInfo::default()
        .queue_create_infos(&queue_infos)
        .enabled_features(&features)
        .enabled_extension_names(&extension_name_ptrs);

    let device = unsafe {
        instance.create_device(selected.physical_device, &create_info, None)?
    };

    let graphics_queue = unsafe { device.get_device_queue(graphics, 0) };
    let present_queue = unsafe { device.get_device_queue(present, 0) };

    Ok((device, graphics_queue, present_queue))
}
