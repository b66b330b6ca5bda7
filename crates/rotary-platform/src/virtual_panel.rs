//! In-memory pedal board.
//!
//! [`VirtualPanel`] stands in for the hardware: hosts set knob positions and
//! footswitch states directly, and read back what the pedal wrote to the
//! LEDs. Knobs start at the positions that give each parameter's default.

use rotary_core::ParamIndex;

use crate::{ControlId, ControlState, ControlType, PlatformController, layout};

/// Software implementation of the pedal board.
///
/// # Example
///
/// ```rust
/// use rotary_platform::{PlatformController, VirtualPanel, layout};
///
/// let mut panel = VirtualPanel::new();
/// panel.set_knob(layout::KNOB_3, 0.25);
/// assert_eq!(panel.read_control(layout::KNOB_3).map(|s| s.value), Some(0.25));
///
/// assert!(panel.write_control(layout::LED_2, 0.5));
/// assert!(!panel.write_control(layout::KNOB_1, 0.5));
/// assert_eq!(panel.led(layout::LED_2), Some(0.5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualPanel {
    knobs: [ControlState; 6],
    footswitches: [ControlState; 2],
    leds: [f32; 2],
    flushes: u64,
}

impl VirtualPanel {
    /// Panel with knobs at their default positions, footswitches released
    /// and LEDs off.
    pub fn new() -> Self {
        Self {
            knobs: core::array::from_fn(|i| {
                let desc = ParamIndex::ALL[i].descriptor();
                ControlState::new(desc.normalize(desc.default))
            }),
            footswitches: [ControlState::default(); 2],
            leds: [0.0; 2],
            flushes: 0,
        }
    }

    /// Moves a knob. Values are clamped to 0..=1; non-knob IDs are ignored.
    pub fn set_knob(&mut self, id: ControlId, value: f32) {
        if id.control_type() == Some(ControlType::Knob) {
            self.knobs[id.index()].set(value.clamp(0.0, 1.0));
        }
    }

    /// Moves the knob driving `param` in the pedal layout to the position for
    /// the engineering value `value`.
    pub fn set_param(&mut self, param: ParamIndex, value: f32) {
        let knob = layout::KNOBS[param as usize];
        self.set_knob(knob, param.descriptor().normalize(value));
    }

    /// Holds a footswitch down.
    pub fn press(&mut self, id: ControlId) {
        self.set_footswitch(id, true);
    }

    /// Lets a footswitch up.
    pub fn release(&mut self, id: ControlId) {
        self.set_footswitch(id, false);
    }

    /// Sets a footswitch's raw contact state; non-footswitch IDs are ignored.
    pub fn set_footswitch(&mut self, id: ControlId, pressed: bool) {
        if id.control_type() == Some(ControlType::Footswitch) {
            self.footswitches[id.index()].set(if pressed { 1.0 } else { 0.0 });
        }
    }

    /// Last value written to an LED.
    pub fn led(&self, id: ControlId) -> Option<f32> {
        match id.control_type() {
            Some(ControlType::Led) => Some(self.leds[id.index()]),
            _ => None,
        }
    }

    /// Number of completed control cycles.
    pub fn flush_count(&self) -> u64 {
        self.flushes
    }
}

impl Default for VirtualPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformController for VirtualPanel {
    fn read_control(&self, id: ControlId) -> Option<ControlState> {
        match id.control_type()? {
            ControlType::Knob => Some(self.knobs[id.index()]),
            ControlType::Footswitch => Some(self.footswitches[id.index()]),
            ControlType::Led => None,
        }
    }

    fn write_control(&mut self, id: ControlId, value: f32) -> bool {
        match id.control_type() {
            Some(ControlType::Led) => {
                self.leds[id.index()] = value.clamp(0.0, 1.0);
                true
            }
            _ => false,
        }
    }

    fn flush(&mut self) {
        for state in self.knobs.iter_mut().chain(self.footswitches.iter_mut()) {
            state.clear_changed();
        }
        self.flushes += 1;
    }
}
