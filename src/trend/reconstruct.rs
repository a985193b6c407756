use crate::input::samples::StepSample;
use crate::trend::SeriesError;

/// Expands sparse samples into a right-continuous dense series: position `p`
/// holds the value of the last sample with `step <= p`. Positions before the
/// first sample stay zero.
pub fn step_fill(samples: &[StepSample], domain: usize) -> Result<Vec<f64>, SeriesError> {
    if samples.is_empty() {
        return Err(SeriesError::Empty);
    }
    let mut dense = vec![0.0; domain];
    let mut prev: Option<(usize, f64)> = None;

    for sample in samples {
        let step = usize::try_from(sample.step)
            .ok()
            .filter(|&s| s < domain)
            .ok_or(SeriesError::StepOutOfDomain {
                step: sample.step,
                domain,
            })?;
        if let Some((prev_step, prev_value)) = prev {
            if step < prev_step {
                return Err(SeriesError::DecreasingStep {
                    previous: prev_step as u64,
                    step: sample.step,
                });
            }
            dense[prev_step..step].fill(prev_value);
        }
        prev = Some((step, sample.value));
    }

    if let Some((last_step, last_value)) = prev {
        dense[last_step..].fill(last_value);
    }
    Ok(dense)
}

/// Back-fills leading zeros with the first non-zero value and forward-fills
/// trailing zeros with the last non-zero value. An all-zero series is left
/// untouched and reported as [`SeriesError::AllZero`].
pub fn repair_edges(dense: &mut [f64]) -> Result<(), SeriesError> {
    let Some(first) = dense.iter().position(|&v| v != 0.0) else {
        return Err(SeriesError::AllZero);
    };
    // `first` is non-zero, so the reverse scan stops at or after it.
    let last = dense.iter().rposition(|&v| v != 0.0).unwrap_or(first);

    let lead = dense[first];
    dense[..first].fill(lead);
    let tail = dense[last];
    dense[last + 1..].fill(tail);
    Ok(())
}

pub fn reconstruct(samples: &[StepSample], domain: usize) -> Result<Vec<f64>, SeriesError> {
    let mut dense = step_fill(samples, domain)?;
    repair_edges(&mut dense)?;
    Ok(dense)
}

/// Sums the dense reconstructions of several runs of the same series.
#[derive(Debug, Clone)]
pub struct SeriesAccumulator {
    sum: Vec<f64>,
    sources: usize,
}

impl SeriesAccumulator {
    pub fn new(domain: usize) -> Self {
        Self {
            sum: vec![0.0; domain],
            sources: 0,
        }
    }

    pub fn add(&mut self, samples: &[StepSample]) -> Result<(), SeriesError> {
        let dense = step_fill(samples, self.sum.len())?;
        for (acc, v) in self.sum.iter_mut().zip(dense) {
            *acc += v;
        }
        self.sources += 1;
        Ok(())
    }

    pub fn sources(&self) -> usize {
        self.sources
    }

    /// Position-wise mean over all added runs, edges not yet repaired.
    pub fn mean(self) -> Result<Vec<f64>, SeriesError> {
        if self.sources == 0 {
            return Err(SeriesError::Empty);
        }
        let n = self.sources as f64;
        Ok(self.sum.into_iter().map(|v| v / n).collect())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/trend/reconstruct.rs"]
mod tests;
