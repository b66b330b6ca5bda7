//! Knob-to-parameter mapping.
//!
//! [`KnobMap`] associates each knob with one [`ParamIndex`] and scales the
//! knob's normalized position into engineering units through the parameter's
//! [`ParamDescriptor`](rotary_core::ParamDescriptor).

use rotary_core::{ParamIndex, ParameterSet};

use crate::{ControlId, PlatformController, layout};

/// Maps knobs to engine parameters.
///
/// # Example
///
/// ```rust
/// use rotary_core::{ParamIndex, ParameterSet};
/// use rotary_platform::{KnobMap, layout};
///
/// let map = KnobMap::pedal();
/// assert_eq!(map.param_for(layout::KNOB_2), Some(ParamIndex::FastSpeed));
///
/// let mut params = ParameterSet::default();
/// map.apply(&mut params, layout::KNOB_2, 1.0);
/// assert_eq!(params.fast_speed, 10.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KnobMap {
    entries: [(ControlId, ParamIndex); 6],
}

impl KnobMap {
    /// The pedal board: knob `n` drives `ParamIndex::ALL[n - 1]`.
    pub const fn pedal() -> Self {
        let k = layout::KNOBS;
        let p = ParamIndex::ALL;
        Self {
            entries: [
                (k[0], p[0]),
                (k[1], p[1]),
                (k[2], p[2]),
                (k[3], p[3]),
                (k[4], p[4]),
                (k[5], p[5]),
            ],
        }
    }

    /// Reassigns a knob to a different parameter.
    ///
    /// Returns `false` if `control` is not one of the mapped knobs.
    pub fn remap(&mut self, control: ControlId, param: ParamIndex) -> bool {
        match self.entries.iter_mut().find(|(id, _)| *id == control) {
            Some(entry) => {
                entry.1 = param;
                true
            }
            None => false,
        }
    }

    /// Parameter driven by `control`.
    pub fn param_for(&self, control: ControlId) -> Option<ParamIndex> {
        self.entries
            .iter()
            .find(|(id, _)| *id == control)
            .map(|&(_, param)| param)
    }

    /// Knob driving `param`, if any.
    pub fn control_for(&self, param: ParamIndex) -> Option<ControlId> {
        self.entries
            .iter()
            .find(|(_, p)| *p == param)
            .map(|&(id, _)| id)
    }

    /// Writes the engineering value of one knob position into `params`.
    ///
    /// Returns `false` if `control` is not mapped.
    pub fn apply(&self, params: &mut ParameterSet, control: ControlId, normalized: f32) -> bool {
        match self.param_for(control) {
            Some(param) => {
                params.set(param, param.descriptor().denormalize(normalized));
                true
            }
            None => false,
        }
    }

    /// Reads every mapped knob from `controller` into `params`.
    ///
    /// Knobs the controller does not report keep their previous value.
    pub fn read_all<C: PlatformController + ?Sized>(
        &self,
        controller: &C,
        params: &mut ParameterSet,
    ) {
        for &(id, param) in &self.entries {
            if let Some(state) = controller.read_control(id) {
                params.set(param, param.descriptor().denormalize(state.value));
            }
        }
    }
}

impl Default for KnobMap {
    fn default() -> Self {
        Self::pedal()
    }
}
