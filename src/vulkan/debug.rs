//! Debug-utils messenger that forwards driver messages to the logger

use std::ffi::{c_void, CStr};

use ash::{vk, Entry, Instance};
use log::{debug, error, warn};

use crate::error::SetupResult;

/// Owns the validation messenger and the extension function table needed to
/// destroy it.
pub struct DebugMessenger {
    fns: ash::ext::debug_utils::Instance,
    messenger: vk::DebugUtilsMessengerEXT,
}

impl DebugMessenger {
    pub fn new(entry: &Entry, instance: &Instance) -> SetupResult<Self> {
        let fns = ash::ext::debug_utils::Instance::new(entry, instance);
        let messenger =
            unsafe { fns.create_debug_utils_messenger(&messenger_create_info(), None)? };
        Ok(Self { fns, messenger })
    }

    /// Must be called before the owning instance is destroyed.
    pub fn destroy(&mut self) {
        unsafe {
            self.fns.destroy_debug_utils_messenger(self.messenger, None);
        }
    }
}

/// Create-info shared between messenger creation and the instance-creation
/// `pNext` chain, so messages during instance setup are captured too.
pub fn messenger_create_info() -> vk::DebugUtilsMessengerCreateInfoEXT<'static> {
    vk::DebugUtilsMessengerCreateInfoEXT::default()
        .message_severity(
            vk::DebugUtilsMessageSeverityFlagsEXT::VERBOSE
                | vk::DebugUtilsMessageSeverityFlagsEXT::WARNING
                | vk::DebugUtilsMessageSeverityFlagsEXT::ERROR,
        )
        .message_type(
            vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
                | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE
                | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION,
        )
        .pfn_user_callback(Some(debug_callback))
}

unsafe extern "system" fn debug_callback(
    severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    _types: vk::DebugUtilsMessageTypeFlagsEXT,
    callback_data: *const vk::DebugUtilsMessengerCallbackDataEXT<'_>,
    _user_data: *mut c_void,
) -> vk::Bool32 {
    if callback_data.is_null() {
        return vk::FALSE;
    }

    let message = (*callback_data).p_message;
    let message = if message.is_null() {
        String::new()
    } else {
        CStr::from_ptr(message).to_string_lossy().into_owned()
    };

    if severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::ERROR) {
        error!("validation layer: {message}");
    } else if severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::WARNING) {
        warn!("validation layer: {message}");
    } else {
        debug!("validation layer: {message}");
    }

    vk::FALSE
}
