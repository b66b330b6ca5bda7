//! The pedal control loop.
//!
//! [`RotaryPedal`] owns an engine and a controller and runs one block of the
//! pedal firmware per call:
//!
//! 1. `poll` the controller
//! 2. read six knobs through the [`KnobMap`]
//! 3. shift both footswitch readings into their debouncers
//! 4. render the block with any confirmed rising edges applied
//! 5. write both LEDs from the engine's indicators
//! 6. `flush` the controller

use rotary_core::{BlockControls, Indicator, IndicatorSink, ParameterSet, RotaryEngine};

use crate::{ControlId, Footswitch, KnobMap, PlatformController, layout};

/// Engine plus control surface.
#[derive(Debug, Clone)]
pub struct RotaryPedal<C> {
    engine: RotaryEngine,
    controller: C,
    knobs: KnobMap,
    bypass_switch: Footswitch,
    speed_switch: Footswitch,
    params: ParameterSet,
}

impl<C: PlatformController> RotaryPedal<C> {
    /// Wraps `engine` with the standard pedal knob layout.
    pub fn new(engine: RotaryEngine, controller: C) -> Self {
        Self::with_knob_map(engine, controller, KnobMap::pedal())
    }

    /// Wraps `engine` with a custom knob assignment.
    pub fn with_knob_map(engine: RotaryEngine, controller: C, knobs: KnobMap) -> Self {
        let params = *engine.params();
        Self {
            engine,
            controller,
            knobs,
            bypass_switch: Footswitch::new(),
            speed_switch: Footswitch::new(),
            params,
        }
    }

    /// Runs one block of the control loop and renders it.
    pub fn process_block(&mut self, input: &[f32], left: &mut [f32], right: &mut [f32]) {
        self.controller.poll();

        self.knobs.read_all(&self.controller, &mut self.params);
        self.bypass_switch.update(self.is_pressed(layout::FOOTSWITCH_1));
        self.speed_switch.update(self.is_pressed(layout::FOOTSWITCH_2));

        let controls = BlockControls {
            params: self.params,
            toggle_bypass: self.bypass_switch.rising_edge(),
            toggle_speed: self.speed_switch.rising_edge(),
        };
        self.engine.process_block(&controls, input, left, right);

        self.engine.publish_indicators(&mut LedWriter(&mut self.controller));
        self.controller.flush();
    }

    fn is_pressed(&self, id: ControlId) -> bool {
        self.controller
            .read_control(id)
            .is_some_and(|state| state.is_pressed())
    }

    /// The engine.
    pub fn engine(&self) -> &RotaryEngine {
        &self.engine
    }

    /// Mutable access to the engine.
    pub fn engine_mut(&mut self) -> &mut RotaryEngine {
        &mut self.engine
    }

    /// The controller.
    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Mutable access to the controller.
    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    /// Parameters read from the knobs on the last block.
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Releases the engine and controller.
    pub fn into_parts(self) -> (RotaryEngine, C) {
        (self.engine, self.controller)
    }
}

/// Routes engine indicators to the pedal LEDs.
struct LedWriter<'a, C>(&'a mut C);

impl<C: PlatformController> IndicatorSink for LedWriter<'_, C> {
    fn set_indicator(&mut self, indicator: Indicator, value: f32) {
        let led = match indicator {
            Indicator::Engaged => layout::LED_1,
            Indicator::Rotor => layout::LED_2,
        };
        self.0.write_control(led, value);
    }
}
