//! Device suitability scoring and candidate selection

use crate::array::GrowableList;
use crate::error::{SetupError, SetupResult};

/// Heuristic inputs to the suitability score, read from the device's
/// reported properties and features.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeviceTraits {
    /// Dedicated, non-integrated graphics processor.
    pub discrete: bool,
    /// Maximum supported 2D image dimension, a proxy for hardware generation.
    pub max_image_dimension_2d: u32,
    /// Geometry shader support.
    pub geometry_shader: bool,
}

/// Hard pass/fail conditions that override the heuristic score.
///
/// A device that fails any gate scores 0 and is never selected, no matter
/// how desirable its traits look.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViabilityGates {
    pub queues_complete: bool,
    pub extensions_supported: bool,
    pub has_surface_formats: bool,
    pub has_present_modes: bool,
}

impl ViabilityGates {
    pub fn pass(&self) -> bool {
        self.queues_complete
            && self.extensions_supported
            && self.has_surface_formats
            && self.has_present_modes
    }

    /// All gates open, for devices whose checks all came back positive.
    pub fn open() -> Self {
        Self {
            queues_complete: true,
            extensions_supported: true,
            has_surface_formats: true,
            has_present_modes: true,
        }
    }
}

/// Score one device: +1000 for discrete hardware, plus the maximum 2D image
/// dimension, plus 100 for geometry shader support. The gates are evaluated
/// after the additive heuristic and force the score to 0 on any failure.
pub fn rate_suitability(traits: DeviceTraits, gates: ViabilityGates) -> i32 {
    let mut score = 0i32;

    if traits.discrete {
        score += 1000;
    }
    score = score.saturating_add(traits.max_image_dimension_2d.min(i32::MAX as u32) as i32);
    if traits.geometry_shader {
        score += 100;
    }

    if !gates.pass() {
        return 0;
    }
    score
}

#[derive(Clone, Copy)]
struct ScoredCandidate<H> {
    handle: H,
    score: i32,
}

/// Rate every enumerated device, rank the candidates by descending score,
/// and return the best one.
///
/// The ranking uses the list's own quicksort with a score comparator; ties
/// land in an unspecified order since the sort is not stable. A top score of
/// 0 means no enumerated device passed its viability gates, which is fatal.
pub fn select_best<H: Copy>(
    devices: &GrowableList<H>,
    mut rate: impl FnMut(H) -> i32,
) -> SetupResult<H> {
    let mut candidates: GrowableList<ScoredCandidate<H>> = GrowableList::new();
    candidates.set_capacity(devices.len());

    for &handle in devices {
        let score = rate(handle);
        candidates.push(ScoredCandidate { handle, score });
    }

    candidates.sort_by(|a, b| b.score.cmp(&a.score));

    match candidates.as_slice().first() {
        Some(best) if best.score > 0 => Ok(best.handle),
        _ => Err(SetupError::NoViableDevice(devices.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_highest_scoring_candidate() {
        let devices = GrowableList::from_vec(vec![1u32, 2, 3]);
        let best = select_best(&devices, |handle| match handle {
            1 => 0,
            2 => 500,
            _ => 1000,
        })
        .unwrap();
        assert_eq!(best, 3);
    }

    #[test]
    fn all_zero_scores_is_fatal() {
        let devices = GrowableList::from_vec(vec![1u32, 2, 3]);
        let err = select_best(&devices, |_| 0).unwrap_err();
        match err {
            SetupError::NoViableDevice(count) => assert_eq!(count, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_candidate_list_is_fatal() {
        let devices: GrowableList<u32> = GrowableList::new();
        assert!(matches!(
            select_best(&devices, |_| 1000),
            Err(SetupError::NoViableDevice(0))
        ));
    }

    #[test]
    fn score_composes_additively() {
        let traits = DeviceTraits {
            discrete: true,
            max_image_dimension_2d: 4096,
            geometry_shader: true,
        };
        assert_eq!(rate_suitability(traits, ViabilityGates::open()), 5196);

        let integrated = DeviceTraits {
            discrete: false,
            max_image_dimension_2d: 2048,
            geometry_shader: false,
        };
        assert_eq!(rate_suitability(integrated, ViabilityGates::open()), 2048);
    }

    #[test]
    fn any_failed_gate_forces_zero() {
        let traits = DeviceTraits {
            discrete: true,
            max_image_dimension_2d: 16384,
            geometry_shader: true,
        };

        for failed in 0..4 {
            let mut gates = ViabilityGates::open();
            match failed {
                0 => gates.queues_complete = false,
                1 => gates.extensions_supported = false,
                2 => gates.has_surface_formats = false,
                _ => gates.has_present_modes = false,
            }
            assert_eq!(rate_suitability(traits, gates), 0);
        }
    }

    #[test]
    fn discrete_preference_dominates_image_dimension() {
        let discrete = DeviceTraits {
            discrete: true,
            max_image_dimension_2d: 4096,
            geometry_shader: false,
        };
        let integrated = DeviceTraits {
            discrete: false,
            max_image_dimension_2d: 4800,
            geometry_shader: true,
        };
        assert!(
            rate_suitability(discrete, ViabilityGates::open())
                > rate_suitability(integrated, ViabilityGates::open())
        );
    }
}
