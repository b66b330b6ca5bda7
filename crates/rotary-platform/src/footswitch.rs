//! Footswitch debouncing and edge detection.
//!
//! A [`Footswitch`] keeps the last eight raw readings in a shift register.
//! The switch counts as pressed once eight consecutive readings agree, and a
//! rising edge is reported on the update where the seventh consecutive
//! pressed reading follows a released one. Contact bounce shorter than seven
//! updates never produces an edge.

/// Register value on the update that completes a press.
const RISING: u8 = 0x7f;
/// Register value on the update that completes a release.
const FALLING: u8 = 0x80;

/// Shift-register debouncer for one momentary switch.
///
/// # Example
///
/// ```rust
/// use rotary_platform::Footswitch;
///
/// let mut fs = Footswitch::new();
/// let edges = (0..10).filter(|_| {
///     fs.update(true);
///     fs.rising_edge()
/// });
/// assert_eq!(edges.count(), 1);
/// assert!(fs.pressed());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Footswitch {
    state: u8,
}

impl Footswitch {
    /// Creates a released footswitch.
    pub const fn new() -> Self {
        Self { state: 0 }
    }

    /// Shifts in one raw reading. Call once per control cycle.
    #[inline]
    pub fn update(&mut self, pressed: bool) {
        self.state = (self.state << 1) | u8::from(pressed);
    }

    /// True on the single update where a press is confirmed.
    #[inline]
    pub fn rising_edge(&self) -> bool {
        self.state == RISING
    }

    /// True on the single update where a release is confirmed.
    #[inline]
    pub fn falling_edge(&self) -> bool {
        self.state == FALLING
    }

    /// True while every reading in the register is pressed.
    #[inline]
    pub fn pressed(&self) -> bool {
        self.state == u8::MAX
    }
}
