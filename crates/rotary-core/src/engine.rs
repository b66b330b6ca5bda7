//! The rotary render pipeline.
//!
//! [`RotaryEngine`] owns every piece of state in the cabinet model and is
//! driven by an external scheduler, one block at a time.
//!
//! # Block Contract
//!
//! At the start of [`render`](RotaryEngine::render) (control rate):
//!
//! 1. The smoothed speed takes one inertia step toward the target speed of
//!    the current [`SpeedMode`].
//! 2. Horn frequency is set to the smoothed speed, drum frequency to
//!    smoothed speed × drift.
//!
//! Then, for each sample (audio rate):
//!
//! 1. Both oscillators advance, giving `horn` and `drum` in \[-1, 1\].
//! 2. In bypass the input is copied to both outputs and nothing else runs.
//! 3. The crossover splits the input into low and high bands.
//! 4. Each band is written to its [`RotationDelay`] and read back at
//!    `vibe * (1 + lfo) * 1 ms * sample_rate + 1` samples (drum LFO for the
//!    low band, horn LFO for the high band).
//! 5. Each band is scaled by its [`tremolo_gain`].
//! 6. `low * (1 - tone) + high * tone` goes to both outputs.
//!
//! Parameters and mode toggles are applied between blocks through
//! [`set_params`](RotaryEngine::set_params),
//! [`toggle_bypass`](RotaryEngine::toggle_bypass) and
//! [`toggle_speed_mode`](RotaryEngine::toggle_speed_mode), or all at once with
//! [`process_block`](RotaryEngine::process_block).

use crate::config::{ConfigError, EngineConfig};
use crate::crossover::Crossover;
use crate::delay::RotationDelay;
use crate::indicator::{Indicator, IndicatorSink};
use crate::math::{modulated_delay_samples, tone_mix, tremolo_gain};
use crate::oscillator::ModOscillator;
use crate::params::{BlockControls, ModeFlags, ParameterSet, SpeedMode};
use crate::speed::SpeedController;

/// Rotating-speaker cabinet engine.
///
/// Mono in, stereo (dual mono) out. Create once with [`RotaryEngine::new`];
/// the delay buffers are allocated there and never again.
///
/// # Example
///
/// ```rust
/// use rotary_core::{EngineConfig, ParameterSet, RotaryEngine};
///
/// let mut engine = RotaryEngine::new(EngineConfig::new(48000.0)).unwrap();
/// assert!(engine.is_bypassed()); // power-on state
///
/// engine.toggle_bypass();
/// engine.set_params(ParameterSet { vibe: 0.6, ..ParameterSet::default() });
///
/// let input = [0.25f32; 48];
/// let mut left = [0.0f32; 48];
/// let mut right = [0.0f32; 48];
/// engine.render(&input, &mut left, &mut right);
/// assert_eq!(left, right);
/// ```
#[derive(Debug, Clone)]
pub struct RotaryEngine {
    crossover: Crossover,
    horn: ModOscillator,
    drum: ModOscillator,
    low_delay: RotationDelay,
    high_delay: RotationDelay,
    speed: SpeedController,

    params: ParameterSet,
    modes: ModeFlags,

    sample_rate: f32,
    max_depth: f32,

    /// Horn LFO value of the last rendered sample.
    last_horn: f32,
}

impl RotaryEngine {
    /// Validates `config`, allocates the delay buffers and returns an engine
    /// in the power-on state (bypassed, slow, rotors stopped).
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let capacity = match config.validate() {
            Ok(capacity) => capacity,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("rotary engine config rejected: {err:?}");
                return Err(err);
            }
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate = config.sample_rate,
            max_depth = config.max_depth,
            worst_case_delay = config.worst_case_delay(),
            capacity,
            "rotary engine created"
        );

        let sample_rate = config.sample_rate;
        Ok(Self {
            crossover: Crossover::new(sample_rate),
            horn: ModOscillator::new(sample_rate),
            drum: ModOscillator::new(sample_rate),
            low_delay: RotationDelay::new(capacity),
            high_delay: RotationDelay::new(capacity),
            speed: SpeedController::new(),
            params: ParameterSet::default(),
            modes: ModeFlags::default(),
            sample_rate,
            max_depth: config.max_depth,
            last_horn: 0.0,
        })
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Depth bound the delay capacity was validated for.
    pub fn max_depth(&self) -> f32 {
        self.max_depth
    }

    /// Delay capacity of each band, in samples.
    pub fn delay_capacity(&self) -> usize {
        self.low_delay.capacity()
    }

    /// Replaces the control values used from the next block on.
    pub fn set_params(&mut self, params: ParameterSet) {
        self.params = params;
    }

    /// Current control values.
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Current mode flags.
    pub fn modes(&self) -> ModeFlags {
        self.modes
    }

    /// Whether bypass is active.
    pub fn is_bypassed(&self) -> bool {
        self.modes.bypass
    }

    /// Forces the bypass state.
    pub fn set_bypass(&mut self, bypass: bool) {
        self.modes.bypass = bypass;
    }

    /// Flips bypass (a rising edge on the bypass footswitch).
    pub fn toggle_bypass(&mut self) {
        self.modes.bypass = !self.modes.bypass;
    }

    /// Current speed mode.
    pub fn speed_mode(&self) -> SpeedMode {
        self.modes.speed
    }

    /// Forces the speed mode.
    pub fn set_speed_mode(&mut self, mode: SpeedMode) {
        self.modes.speed = mode;
    }

    /// Flips slow/fast (a rising edge on the speed footswitch).
    pub fn toggle_speed_mode(&mut self) {
        self.modes.speed = self.modes.speed.toggled();
    }

    /// The rotor speed model.
    pub fn speed(&self) -> &SpeedController {
        &self.speed
    }

    /// Snaps the smoothed speed to `speed` Hz, skipping the inertia ramp.
    pub fn set_speed_immediate(&mut self, speed: f32) {
        self.speed.set_immediate(speed);
    }

    /// Horn oscillator.
    pub fn horn(&self) -> &ModOscillator {
        &self.horn
    }

    /// Drum oscillator.
    pub fn drum(&self) -> &ModOscillator {
        &self.drum
    }

    /// Applies one block's controls, then renders it.
    pub fn process_block(
        &mut self,
        controls: &BlockControls,
        input: &[f32],
        left: &mut [f32],
        right: &mut [f32],
    ) {
        if controls.toggle_bypass {
            self.toggle_bypass();
        }
        if controls.toggle_speed {
            self.toggle_speed_mode();
        }
        self.params = controls.params;
        self.render(input, left, right);
    }

    /// Renders one block.
    ///
    /// `input`, `left` and `right` must have the same length; extra samples in
    /// the longer slices are left untouched.
    pub fn render(&mut self, input: &[f32], left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(input.len(), left.len(), "input/left length mismatch");
        debug_assert_eq!(input.len(), right.len(), "input/right length mismatch");

        // Control rate
        let target = self.params.target_speed(self.modes.speed);
        self.speed.set_drift_ratio(self.params.drift);
        self.speed.update(target);
        self.horn.set_frequency(self.speed.horn_frequency());
        self.drum.set_frequency(self.speed.drum_frequency());

        let vibe = self.params.vibe.clamp(0.0, self.max_depth);
        let intensity = self.params.intensity;
        let tone = self.params.tone;

        // Audio rate
        for ((&x, l), r) in input.iter().zip(left.iter_mut()).zip(right.iter_mut()) {
            let horn = self.horn.process();
            let drum = self.drum.process();
            self.last_horn = horn;

            let y = if self.modes.bypass {
                x
            } else {
                self.process_sample(x, horn, drum, vibe, intensity, tone)
            };

            *l = y;
            *r = y;
        }
    }

    #[inline]
    fn process_sample(
        &mut self,
        input: f32,
        horn: f32,
        drum: f32,
        vibe: f32,
        intensity: f32,
        tone: f32,
    ) -> f32 {
        self.crossover.process(input);

        let drum_delay = modulated_delay_samples(vibe, drum, self.sample_rate);
        let horn_delay = modulated_delay_samples(vibe, horn, self.sample_rate);

        self.low_delay.write(self.crossover.low());
        let low = self.low_delay.read_hermite(drum_delay);

        self.high_delay.write(self.crossover.high());
        let high = self.high_delay.read_hermite(horn_delay);

        let low = low * tremolo_gain(intensity, drum);
        let high = high * tremolo_gain(intensity, horn);

        tone_mix(low, high, tone)
    }

    /// Indicator value for the engaged lamp.
    pub fn engaged_indicator(&self) -> f32 {
        if self.modes.bypass { 0.0 } else { 1.0 }
    }

    /// Indicator value for the rotor lamp.
    pub fn rotor_indicator(&self) -> f32 {
        (self.last_horn + 1.0) * 0.5
    }

    /// Sends both indicator values to `sink`.
    pub fn publish_indicators<S: IndicatorSink + ?Sized>(&self, sink: &mut S) {
        sink.set_indicator(Indicator::Engaged, self.engaged_indicator());
        sink.set_indicator(Indicator::Rotor, self.rotor_indicator());
    }

    /// Clears filter and delay history and resets both rotors to phase 0.
    ///
    /// Modes, parameters and the smoothed speed are kept.
    pub fn reset(&mut self) {
        self.crossover.reset();
        self.low_delay.clear();
        self.high_delay.clear();
        self.horn.reset();
        self.drum.reset();
        self.last_horn = 0.0;
    }
}
