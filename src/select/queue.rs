//! Queue family resolution for graphics and presentation

use ash::vk;

use crate::array::GrowableList;

/// Queue family indices found for a device, each populated independently.
///
/// Graphics and presentation support are separate capabilities and may land
/// on the same family or on different ones; the indices are only meaningful
/// for the enumeration they came from and must never be carried across
/// devices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueueFamilyIndices {
    pub graphics: Option<u32>,
    pub present: Option<u32>,
}

impl QueueFamilyIndices {
    /// Whether both a graphics-capable and a presentation-capable family
    /// were found.
    pub fn is_complete(&self) -> bool {
        self.graphics.is_some() && self.present.is_some()
    }

    /// The `(graphics, present)` pair, if the resolution is complete.
    pub fn complete(self) -> Option<(u32, u32)> {
        Some((self.graphics?, self.present?))
    }
}

/// Scan the reported queue families once, in index order.
///
/// The graphics capability comes from the family's own flags; presentation
/// support against the target surface is an external query, supplied here as
/// a probe so the scan stays driver-agnostic. Exits early once both indices
/// are known.
pub fn resolve_queue_families(
    families: &GrowableList<vk::QueueFamilyProperties>,
    mut supports_present: impl FnMut(u32) -> bool,
) -> QueueFamilyIndices {
    let mut indices = QueueFamilyIndices::default();

    for (index, family) in families.iter().enumerate() {
        let index = index as u32;

        if family.queue_flags.contains(vk::QueueFlags::GRAPHICS) {
            indices.graphics = Some(index);
        }
        if supports_present(index) {
            indices.present = Some(index);
        }
        if indices.is_complete() {
            break;
        }
    }

    indices
}
