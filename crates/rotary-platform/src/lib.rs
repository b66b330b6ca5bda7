//! Rotary Platform - Pedal control surface for the rotary engine
//!
//! This crate connects a physical or virtual control surface (six knobs, two
//! footswitches, two LEDs) to a [`RotaryEngine`](rotary_core::RotaryEngine).
//!
//! # Core Abstractions
//!
//! - [`ControlId`] - Hardware control index
//! - [`ControlType`] - Knob, footswitch or LED
//! - [`ControlState`] - Current control state with change flag
//! - [`PlatformController`] - Trait for hardware/software surfaces
//! - [`Footswitch`] - Shift-register debouncer with rising-edge detection
//! - [`KnobMap`] - Knob position to engineering-unit parameter mapping
//! - [`RotaryPedal`] - One block of the pedal loop: read controls, render,
//!   drive LEDs
//! - [`VirtualPanel`] - In-memory controller for hosts and tests
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature in
//! your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! rotary-platform = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use rotary_core::{EngineConfig, RotaryEngine};
//! use rotary_platform::{RotaryPedal, VirtualPanel, layout};
//!
//! let engine = RotaryEngine::new(EngineConfig::new(48000.0)).unwrap();
//! let mut pedal = RotaryPedal::new(engine, VirtualPanel::new());
//!
//! // Hold the bypass footswitch long enough for the debouncer to see it.
//! pedal.controller_mut().press(layout::FOOTSWITCH_1);
//! let input = [0.0f32; 12];
//! let (mut left, mut right) = ([0.0f32; 12], [0.0f32; 12]);
//! for _ in 0..8 {
//!     pedal.process_block(&input, &mut left, &mut right);
//! }
//! assert!(!pedal.engine().is_bypassed());
//! assert_eq!(pedal.controller().led(layout::LED_1), Some(1.0));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod footswitch;
pub mod knob_map;
pub mod pedal;
pub mod virtual_panel;

// Re-export rotary-core types for convenience
pub use rotary_core::{ParamDescriptor, ParamIndex, ParamUnit};

// Re-export main types at crate root
pub use footswitch::Footswitch;
pub use knob_map::KnobMap;
pub use pedal::RotaryPedal;
pub use virtual_panel::VirtualPanel;

/// Control IDs of the pedal board.
///
/// Six knobs in panel order, two footswitches and two LEDs. Knob `n`
/// drives [`ParamIndex::ALL`]`[n - 1]`.
pub mod layout {
    use super::ControlId;

    /// Slow speed.
    pub const KNOB_1: ControlId = ControlId::new(0x00);
    /// Fast speed.
    pub const KNOB_2: ControlId = ControlId::new(0x01);
    /// Drift.
    pub const KNOB_3: ControlId = ControlId::new(0x02);
    /// Tone.
    pub const KNOB_4: ControlId = ControlId::new(0x03);
    /// Intensity.
    pub const KNOB_5: ControlId = ControlId::new(0x04);
    /// Vibe.
    pub const KNOB_6: ControlId = ControlId::new(0x05);

    /// Bypass toggle.
    pub const FOOTSWITCH_1: ControlId = ControlId::new(0x10);
    /// Slow/fast toggle.
    pub const FOOTSWITCH_2: ControlId = ControlId::new(0x11);

    /// Engaged indicator.
    pub const LED_1: ControlId = ControlId::new(0x20);
    /// Rotor indicator.
    pub const LED_2: ControlId = ControlId::new(0x21);

    /// All knobs in panel order.
    pub const KNOBS: [ControlId; 6] = [KNOB_1, KNOB_2, KNOB_3, KNOB_4, KNOB_5, KNOB_6];
    /// Both footswitches.
    pub const FOOTSWITCHES: [ControlId; 2] = [FOOTSWITCH_1, FOOTSWITCH_2];
    /// Both LEDs.
    pub const LEDS: [ControlId; 2] = [LED_1, LED_2];

    /// Every control on the board.
    pub const ALL: [ControlId; 10] = [
        KNOB_1,
        KNOB_2,
        KNOB_3,
        KNOB_4,
        KNOB_5,
        KNOB_6,
        FOOTSWITCH_1,
        FOOTSWITCH_2,
        LED_1,
        LED_2,
    ];
}

/// A hardware control identifier.
///
/// The high nibble groups controls by kind on the pedal board (`0x0X` knobs,
/// `0x1X` footswitches, `0x2X` LEDs); see [`layout`].
///
/// # Example
///
/// ```rust
/// use rotary_platform::{ControlId, ControlType, layout};
///
/// let knob = ControlId::new(0x03);
/// assert_eq!(knob, layout::KNOB_4);
/// assert_eq!(knob.index(), 3);
/// assert_eq!(layout::LED_2.control_type(), Some(ControlType::Led));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(u8);

impl ControlId {
    /// Creates a control ID from its raw index.
    #[inline]
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[inline]
    pub const fn raw(&self) -> u8 {
        self.0
    }

    /// Returns the position within the control's group (low nibble).
    #[inline]
    pub const fn index(&self) -> usize {
        (self.0 & 0x0F) as usize
    }

    /// Returns the control type on the pedal board, or `None` for an unknown ID.
    pub const fn control_type(&self) -> Option<ControlType> {
        match self.0 {
            0x00..=0x05 => Some(ControlType::Knob),
            0x10..=0x11 => Some(ControlType::Footswitch),
            0x20..=0x21 => Some(ControlType::Led),
            _ => None,
        }
    }
}

/// Physical or virtual control type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlType {
    /// Rotary knob with continuous value (0.0 to 1.0).
    Knob,
    /// Momentary footswitch (pressed = 1.0, released = 0.0).
    Footswitch,
    /// LED indicator (0.0 = off, 1.0 = on, intermediate for brightness).
    Led,
}

impl ControlType {
    /// Returns true if this is an output control (LED).
    #[inline]
    pub const fn is_output(&self) -> bool {
        matches!(self, ControlType::Led)
    }

    /// Returns true if this is an input control.
    #[inline]
    pub const fn is_input(&self) -> bool {
        !self.is_output()
    }
}

/// Current state of a control.
///
/// All values are normalized to 0.0..=1.0:
///
/// - **Knob**: 0.0 = fully counter-clockwise, 1.0 = fully clockwise
/// - **Footswitch**: 0.0 = released, 1.0 = pressed
/// - **LED**: 0.0 = off, 1.0 = full brightness
///
/// # Example
///
/// ```rust
/// use rotary_platform::ControlState;
///
/// let mut state = ControlState::new(0.75);
/// assert!(!state.changed);
/// state.set(0.5);
/// assert!(state.changed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlState {
    /// Normalized control value (0.0 to 1.0).
    pub value: f32,
    /// True if the value has changed since last cleared.
    pub changed: bool,
}

impl ControlState {
    /// Creates a control state (not marked as changed).
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self {
            value,
            changed: false,
        }
    }

    /// Clears the changed flag.
    #[inline]
    pub fn clear_changed(&mut self) {
        self.changed = false;
    }

    /// Sets a new value and marks the state as changed if different.
    ///
    /// Uses a small epsilon to avoid marking as changed due to floating point noise.
    #[inline]
    pub fn set(&mut self, value: f32) {
        const EPSILON: f32 = 1e-6;
        if (self.value - value).abs() > EPSILON {
            self.value = value;
            self.changed = true;
        }
    }

    /// Returns true if a footswitch reading counts as pressed.
    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.value >= 0.5
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Trait for platform-specific controller implementations.
///
/// Implement this for the pedal's hardware board, a GUI, or a test harness.
/// [`RotaryPedal`] calls [`poll`](Self::poll) at the start of each block,
/// reads the knobs and footswitches, writes the LEDs after rendering, and
/// finishes with [`flush`](Self::flush).
///
/// # Example
///
/// ```rust
/// use rotary_platform::{ControlId, ControlState, PlatformController, layout};
///
/// struct FixedBoard {
///     knobs: [f32; 6],
///     leds: [f32; 2],
/// }
///
/// impl PlatformController for FixedBoard {
///     fn read_control(&self, id: ControlId) -> Option<ControlState> {
///         match id.raw() {
///             0x00..=0x05 => Some(ControlState::new(self.knobs[id.index()])),
///             0x10..=0x11 => Some(ControlState::new(0.0)),
///             _ => None,
///         }
///     }
///
///     fn write_control(&mut self, id: ControlId, value: f32) -> bool {
///         if layout::LEDS.contains(&id) {
///             self.leds[id.index()] = value;
///             true
///         } else {
///             false
///         }
///     }
/// }
/// ```
pub trait PlatformController {
    /// Reads the current state of an input control.
    ///
    /// Returns `None` if the control ID is not recognized or is not readable.
    fn read_control(&self, id: ControlId) -> Option<ControlState>;

    /// Writes a value to an output control (LED).
    ///
    /// Returns `true` if the write was accepted, `false` if the control
    /// is not writable or the ID is not recognized.
    fn write_control(&mut self, id: ControlId, value: f32) -> bool;

    /// Updates the controller state by reading from hardware/OS.
    ///
    /// Default implementation does nothing (for controllers with interrupt-driven updates).
    fn poll(&mut self) {}

    /// Flushes pending output changes to hardware/OS.
    ///
    /// Default implementation does nothing.
    fn flush(&mut self) {}
}
