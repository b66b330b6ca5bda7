//! Offline block scheduling.
//!
//! The engine consumes audio in blocks and applies control changes only at
//! block boundaries. [`OfflineScheduler`] plays the role of the audio driver
//! for file rendering: it slices a mono buffer into blocks of a fixed size,
//! hands each one to a [`BlockProcessor`], and collects the stereo result.

use rotary_core::{EngineConfig, RotaryEngine};
use rotary_platform::{PlatformController, RotaryPedal};

use crate::{Error, Result, StereoSamples, WavSpec};

/// Anything that renders one mono block into two output channels.
pub trait BlockProcessor {
    /// Renders `input` into `left` and `right` (all the same length).
    fn process_block(&mut self, input: &[f32], left: &mut [f32], right: &mut [f32]);
}

impl BlockProcessor for RotaryEngine {
    fn process_block(&mut self, input: &[f32], left: &mut [f32], right: &mut [f32]) {
        self.render(input, left, right);
    }
}

impl<C: PlatformController> BlockProcessor for RotaryPedal<C> {
    fn process_block(&mut self, input: &[f32], left: &mut [f32], right: &mut [f32]) {
        RotaryPedal::process_block(self, input, left, right);
    }
}

/// Fixed-block driver for offline rendering.
///
/// # Example
///
/// ```rust
/// use rotary_core::{EngineConfig, RotaryEngine};
/// use rotary_io::OfflineScheduler;
///
/// let mut engine = RotaryEngine::new(EngineConfig::new(48000.0)).unwrap();
/// let scheduler = OfflineScheduler::new(12).unwrap();
///
/// let input = vec![0.25; 100];
/// let output = scheduler.run(&mut engine, &input).unwrap();
/// assert_eq!(output.left, input); // power-on bypass
/// assert_eq!(scheduler.block_count(input.len()), 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfflineScheduler {
    block_size: usize,
}

impl OfflineScheduler {
    /// Creates a scheduler. `block_size` must be at least 1.
    pub fn new(block_size: usize) -> Result<Self> {
        if block_size == 0 {
            return Err(Error::InvalidBlockSize(block_size));
        }
        Ok(Self { block_size })
    }

    /// Samples per block.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of blocks needed for `len` samples, counting a short final block.
    pub fn block_count(&self, len: usize) -> usize {
        len.div_ceil(self.block_size)
    }

    /// Renders `input` through `processor`.
    pub fn run<P: BlockProcessor + ?Sized>(
        &self,
        processor: &mut P,
        input: &[f32],
    ) -> Result<StereoSamples> {
        self.run_with_progress(processor, input, |_, _| {})
    }

    /// Renders `input` through `processor`, calling `progress(done, total)`
    /// after every block.
    ///
    /// The final block is processed at its real length, never padded.
    pub fn run_with_progress<P, F>(
        &self,
        processor: &mut P,
        input: &[f32],
        mut progress: F,
    ) -> Result<StereoSamples>
    where
        P: BlockProcessor + ?Sized,
        F: FnMut(usize, usize),
    {
        if input.is_empty() {
            return Err(Error::EmptyInput);
        }

        let total = self.block_count(input.len());
        tracing::debug!(
            samples = input.len(),
            block_size = self.block_size,
            blocks = total,
            "offline render started"
        );

        let mut output = StereoSamples::silence(input.len());
        let blocks = input
            .chunks(self.block_size)
            .zip(output.left.chunks_mut(self.block_size))
            .zip(output.right.chunks_mut(self.block_size));

        for (done, ((block, left), right)) in blocks.enumerate() {
            processor.process_block(block, left, right);
            progress(done + 1, total);
        }

        tracing::debug!(blocks = total, "offline render finished");
        Ok(output)
    }
}

/// Builds an engine for audio described by `spec`.
///
/// `delay_capacity` of `None` derives the buffer from `max_depth`.
pub fn build_engine(
    spec: &WavSpec,
    max_depth: f32,
    delay_capacity: Option<usize>,
) -> Result<RotaryEngine> {
    let mut config = EngineConfig::new(spec.sample_rate as f32).with_max_depth(max_depth);
    if let Some(capacity) = delay_capacity {
        config = config.with_delay_capacity(capacity);
    }
    let engine = RotaryEngine::new(config)?;
    tracing::info!(
        sample_rate = spec.sample_rate,
        delay_capacity = engine.delay_capacity(),
        "engine ready"
    );
    Ok(engine)
}
