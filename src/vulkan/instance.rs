//! Instance creation: required extensions, layer validation, portability

use std::ffi::{c_char, CStr, CString};

use ash::{vk, Entry, Instance};
use log::debug;
use raw_window_handle::RawDisplayHandle;

use crate::array::GrowableList;
use crate::config::SetupConfig;
use crate::error::SetupResult;
use crate::select::ensure_supported;

/// Create the Vulkan instance.
///
/// The window system dictates part of the required extension set; the rest
/// is the portability plumbing the original enables unconditionally, plus
/// debug utils when validation is on. Requested validation layers are
/// checked against what the loader actually offers before creation, so a
/// missing layer fails with its name instead of a generic driver error.
pub fn create_instance(
    entry: &Entry,
    display_handle: RawDisplayHandle,
    config: &SetupConfig,
) -> SetupResult<Instance> {
    let app_name = CString::new(config.app_name.as_str())?;
    let engine_name = CString::new("No Engine")?;

    let app_info = vk::ApplicationInfo::default()
        .application_name(&app_name)
        .application_version(vk::make_api_version(0, 1, 0, 0))
        .engine_name(&engine_name)
        .engine_version(vk::make_api_version(0, 1, 0, 0))
        .api_version(vk::API_VERSION_1_0);

    let mut extension_names: Vec<*const c_char> =
        ash_window::enumerate_required_extensions(display_handle)?.to_vec();
    extension_names.push(ash::khr::portability_enumeration::NAME.as_ptr());
    extension_names.push(ash::khr::get_physical_device_properties2::NAME.as_ptr());
    if config.validation.enabled {
        extension_names.push(ash::ext::debug_utils::NAME.as_ptr());
    }

    let available_extensions = available_instance_extensions(entry)?;
    debug!("instance extension support:");
    for name in &available_extensions {
        debug!("  {name}");
    }

    let layer_names: Vec<CString> = config
        .validation
        .layers
        .iter()
        .map(|layer| CString::new(layer.as_str()))
        .collect::<Result<_, _>>()?;
    let layer_name_ptrs: Vec<*const c_char> =
        layer_names.iter().map(|name| name.as_ptr()).collect();

    if config.validation.enabled {
        let available_layers = available_instance_layers(entry)?;
        ensure_supported(&config.validation.layers, &available_layers)?;
    }

    let mut debug_info = super::debug::messenger_create_info();
    let mut create_info = vk::InstanceCreateInfo::default()
        .application_info(&app_info)
        .enabled_extension_names(&extension_names)
        .flags(vk::InstanceCreateFlags::ENUMERATE_PORTABILITY_KHR);

    if config.validation.enabled {
        create_info = create_info
            .enabled_layer_names(&layer_name_ptrs)
            .push_next(&mut debug_info);
    }

    let instance = unsafe { entry.create_instance(&create_info, None)? };
    Ok(instance)
}

fn available_instance_layers(entry: &Entry) -> SetupResult<GrowableList<String>> {
    let properties = unsafe { entry.enumerate_instance_layer_properties()? };

    let mut layers = GrowableList::new();
    layers.set_capacity(properties.len());
    for layer in &properties {
        layers.push(
            unsafe { CStr::from_ptr(layer.layer_name.as_ptr()) }
                .to_string_lossy()
                .into_owned(),
        );
    }
    Ok(layers)
}

fn available_instance_extensions(entry: &Entry) -> SetupResult<GrowableList<String>> {
    let properties = unsafe { entry.enumerate_instance_extension_properties(None)? };

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
