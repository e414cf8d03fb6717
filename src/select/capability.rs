//! Named-capability validation for layers and extensions

use crate::array::GrowableList;
use crate::error::{SetupError, SetupResult};

/// Check that every required name appears in the available set.
///
/// Linear scan with exact string equality. Fails on the first missing name
/// so the diagnostic stays a single line; the remaining names are not
/// checked. The same routine covers instance-layer and device-extension
/// validation, the call sites only differ in which sets they pass.
pub fn ensure_supported<R: AsRef<str>>(
    required: &[R],
    available: &GrowableList<String>,
) -> SetupResult<()> {
    for name in required {
        let name = name.as_ref();
        if !available.iter().any(|have| have.as_str() == name) {
            return Err(SetupError::MissingCapability(name.to_string()));
        }
    }
    Ok(())
}
