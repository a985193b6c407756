use std::path::Path;

use crate::input::{InputError, for_each_line, open_maybe_gz};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSample {
    pub step: u64,
    pub value: f64,
}

pub fn parse_sample_line(line: &str, line_no: usize) -> Result<Option<StepSample>, InputError> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    let mut tokens = line.split_whitespace();
    let (Some(step), Some(value)) = (tokens.next(), tokens.next()) else {
        return Err(InputError::parse(
            line_no,
            "expected a step and a value",
        ));
    };
    let step = step
        .parse::<u64>()
        .map_err(|_| InputError::parse(line_no, format!("step {step:?} is not an integer")))?;
    let value = match value.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            return Err(InputError::parse(
                line_no,
                format!("value {value:?} is not a finite number"),
            ));
        }
    };
    Ok(Some(StepSample { step, value }))
}

pub fn read_step_samples(path: &Path) -> Result<Vec<StepSample>, InputError> {
    let mut reader = open_maybe_gz(path).map_err(|e| e.in_file(path))?;
    let mut samples = Vec::new();
    for_each_line(reader.as_mut(), |line_no, line| {
        if let Some(sample) = parse_sample_line(line, line_no)? {
            samples.push(sample);
        }
        Ok(())
    })
    .map_err(|e| e.in_file(path))?;

    tracing::debug!(path = %path.display(), samples = samples.len(), "read step samples");
    Ok(samples)
}
