//! Staged, memoized cosmic-ray detection.
//!
//! A [`Pipeline`] owns the input image and one result buffer per stage. Requesting a
//! stage evaluates its predecessors first, runs it once, and caches the result with
//! its wall-clock duration; later requests are served from the cache.
//!
//! # Example
//!
//! ```rust,ignore
//! use growila::{Config, Pipeline, Stage};
//!
//! let mut pipeline = Pipeline::new(image, Config::new(0.001, 2))?;
//! let flagged = pipeline.mask().count_set();
//! println!("{} took {:?}", Stage::Growing, pipeline.elapsed(Stage::Growing));
//! ```

mod stage;

pub use stage::{Stage, StageOutput};

use std::time::{Duration, Instant};

use common::Buffer2;
use strum::{EnumCount, IntoEnumIterator};

use crate::config::Config;
use crate::detection::{detection_threshold, threshold_mask};
use crate::error::{Error, Result};
use crate::morphology::{grow, grow_with_scratch, laplacian};

// =============================================================================
// Stage table
// =============================================================================

/// Buffers shared by the stage evaluators.
#[derive(Debug)]
struct Buffers {
    input: Buffer2<f32>,
    enhanced: Buffer2<f32>,
    detected: Buffer2<bool>,
    /// Allocated only when growing is enabled.
    grown: Option<Buffer2<bool>>,
    /// Intermediate dilation, allocated only for radius > 1.
    scratch: Option<Buffer2<bool>>,
    threshold: Option<f32>,
}

struct StageDescriptor {
    evaluate: fn(&mut Buffers, &Config),
}

const STAGES: [StageDescriptor; Stage::COUNT] = [
    StageDescriptor { evaluate: enhance },
    StageDescriptor { evaluate: detect },
    StageDescriptor {
        evaluate: grow_detections,
    },
];

fn enhance(buffers: &mut Buffers, _config: &Config) {
    laplacian(&buffers.input, &mut buffers.enhanced);
}

fn detect(buffers: &mut Buffers, config: &Config) {
    let threshold = detection_threshold(&buffers.enhanced, config.pfa);
    threshold_mask(&buffers.enhanced, threshold, &mut buffers.detected);
    buffers.threshold = Some(threshold);

    tracing::debug!(
        threshold,
        detected = buffers.detected.count_set(),
        "Detection threshold applied"
    );
}

fn grow_detections(buffers: &mut Buffers, config: &Config) {
    let Buffers {
        detected,
        grown,
        scratch,
        ..
    } = buffers;

    // Without a grown buffer the stage is a pass-through over the detection mask.
    let Some(grown) = grown.as_mut() else {
        return;
    };

    match scratch.as_mut() {
        Some(scratch) => grow_with_scratch(detected, config.radius, scratch, grown),
        None => grow(detected, config.radius, grown),
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Cosmic-ray detection pipeline over one image.
///
/// Configuration is fixed at construction; each stage runs at most once per
/// pipeline. Results are borrowed from the pipeline and stay valid until it is
/// dropped.
#[derive(Debug)]
pub struct Pipeline {
    config: Config,
    buffers: Buffers,
    /// Evaluation time per stage; `Some` marks the stage as cached.
    elapsed: [Option<Duration>; Stage::COUNT],
    #[cfg(test)]
    evaluations: [usize; Stage::COUNT],
}

impl Pipeline {
    /// Build a pipeline over `image`.
    ///
    /// Fails when the probability of false alarm lies outside (0, 1) or the image is
    /// empty. All buffers are allocated here; evaluation does not allocate.
    pub fn new(image: Buffer2<f32>, config: Config) -> Result<Self> {
        config.validate()?;

        let (width, height) = image.shape();
        if image.is_empty() {
            return Err(Error::EmptyImage { width, height });
        }

        let grown = (config.radius > 0).then(|| Buffer2::new_default(width, height));
        let scratch = (config.radius > 1).then(|| Buffer2::new_default(width, height));

        tracing::debug!(
            width,
            height,
            pfa = config.pfa,
            radius = config.radius,
            "Detection pipeline created"
        );

        Ok(Self {
            config,
            buffers: Buffers {
                input: image,
                enhanced: Buffer2::new_default(width, height),
                detected: Buffer2::new_default(width, height),
                grown,
                scratch,
                threshold: None,
            },
            elapsed: [None; Stage::COUNT],
            #[cfg(test)]
            evaluations: [0; Stage::COUNT],
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn width(&self) -> usize {
        self.buffers.input.width()
    }

    pub fn height(&self) -> usize {
        self.buffers.input.height()
    }

    /// Ensure `stage` and all of its predecessors have been evaluated.
    pub fn evaluate(&mut self, stage: Stage) {
        if self.is_evaluated(stage) {
            tracing::trace!(%stage, "Stage cached");
            return;
        }

        if let Some(predecessor) = stage.predecessor() {
            self.evaluate(predecessor);
        }

        let start = Instant::now();
        (STAGES[stage.index()].evaluate)(&mut self.buffers, &self.config);
        let elapsed = start.elapsed();

        self.elapsed[stage.index()] = Some(elapsed);
        #[cfg(test)]
        {
            self.evaluations[stage.index()] += 1;
        }

        tracing::debug!(
            %stage,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "Stage evaluated"
        );
    }

    /// Evaluate `stage` if needed and borrow its result.
    pub fn get(&mut self, stage: Stage) -> StageOutput<'_> {
        self.evaluate(stage);
        self.output(stage)
    }

    /// Borrow the result of `stage` without evaluating anything.
    pub fn cached(&self, stage: Stage) -> Option<StageOutput<'_>> {
        self.is_evaluated(stage).then(|| self.output(stage))
    }

    /// Laplacian of the input image.
    pub fn enhanced(&mut self) -> &Buffer2<f32> {
        self.evaluate(Stage::Enhancement);
        &self.buffers.enhanced
    }

    /// Thresholded detection mask, before growing.
    pub fn detected(&mut self) -> &Buffer2<bool> {
        self.evaluate(Stage::Detection);
        &self.buffers.detected
    }

    /// Final mask: the grown mask, or the detection mask when growing is disabled.
    pub fn mask(&mut self) -> &Buffer2<bool> {
        self.evaluate(Stage::Growing);
        self.final_mask()
    }

    /// Threshold computed by the detection stage, if it has run.
    pub fn threshold(&self) -> Option<f32> {
        self.buffers.threshold
    }

    pub fn is_evaluated(&self, stage: Stage) -> bool {
        self.elapsed[stage.index()].is_some()
    }

    /// Time spent evaluating `stage`; zero if it has not run.
    pub fn elapsed(&self, stage: Stage) -> Duration {
        self.elapsed[stage.index()].unwrap_or_default()
    }

    /// Sum of the elapsed times of all stages.
    pub fn total_elapsed(&self) -> Duration {
        Stage::iter().map(|stage| self.elapsed(stage)).sum()
    }

    fn output(&self, stage: Stage) -> StageOutput<'_> {
        match stage {
            Stage::Enhancement => StageOutput::Image(&self.buffers.enhanced),
            Stage::Detection => StageOutput::Mask(&self.buffers.detected),
            Stage::Growing => StageOutput::Mask(self.final_mask()),
        }
    }

    fn final_mask(&self) -> &Buffer2<bool> {
        self.buffers
            .grown
            .as_ref()
            .unwrap_or(&self.buffers.detected)
    }
}
