use std::collections::BTreeMap;

use crate::input::samples::StepSample;
use crate::trend::SeriesError;

pub const DEFAULT_BUCKET: u64 = 10_000;
pub const DEFAULT_STRIDE: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileParams {
    pub bucket: u64,
    pub stride: u64,
}

impl Default for ProfileParams {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_BUCKET,
            stride: DEFAULT_STRIDE,
        }
    }
}

/// Rounds `step` up to the next multiple of `bucket`.
pub fn bucket_step(step: u64, bucket: u64) -> Result<u64, SeriesError> {
    let bucket = bucket.max(1);
    step.div_ceil(bucket)
        .checked_mul(bucket)
        .ok_or(SeriesError::StepOverflow { step, bucket })
}

/// Bucketed steps paired with elapsed seconds, keeping every `stride`-th
/// sample starting with the first.
pub fn profile_run(
    samples: &[StepSample],
    params: ProfileParams,
) -> Result<Vec<(u64, f64)>, SeriesError> {
    let stride = usize::try_from(params.stride.max(1)).unwrap_or(usize::MAX);
    samples
        .iter()
        .step_by(stride)
        .map(|s| Ok((bucket_step(s.step, params.bucket)?, s.value / 1000.0)))
        .collect()
}

/// Mean elapsed seconds per bucketed step across the runs of one group.
#[derive(Debug, Clone, Default)]
pub struct ProfileAccumulator {
    by_step: BTreeMap<u64, (f64, usize)>,
    runs: usize,
}

impl ProfileAccumulator {
    /// A run that fails to bucket leaves the accumulator untouched.
    pub fn add_run(
        &mut self,
        samples: &[StepSample],
        params: ProfileParams,
    ) -> Result<(), SeriesError> {
        for (step, seconds) in profile_run(samples, params)? {
            let slot = self.by_step.entry(step).or_insert((0.0, 0));
            slot.0 += seconds;
            slot.1 += 1;
        }
        self.runs += 1;
        Ok(())
    }

    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn mean(&self) -> Vec<(u64, f64)> {
        self.by_step
            .iter()
            .map(|(&step, &(sum, count))| (step, sum / count as f64))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/trend/profile.rs"]
mod tests;
