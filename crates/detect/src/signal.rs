//! Validated signal wrappers.

use crate::error::DetectError;

/// Minimum reference length for which a correlation p-value is defined.
pub const MIN_REFERENCE_LEN: usize = 3;

/// A named measurement channel of finite `f64` values.
///
/// Guarantees a non-empty series with no NaN or infinity.
///
/// # Example
///
/// ```ignore
/// use wavematch_detect::Channel;
///
/// let ch = Channel::new("Sensor1", vec![0.0, 0.5, 1.0])?;
/// assert_eq!(ch.len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct Channel {
    name: String,
    data: Vec<f64>,
}

impl Channel {
    /// Creates a new channel after validating the data.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::InvalidSignal`] if `data` is empty or holds a
    /// non-finite value.
    pub fn new(name: impl Into<String>, data: Vec<f64>) -> Result<Self, DetectError> {
        let name = name.into();
        check_finite(&data, &name)?;
        Ok(Self { name, data })
    }

    /// Returns the channel name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the samples as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false` for a validated channel.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// The reference waveform searched for in every channel.
///
/// Its length defines the sliding window. Holds at least
/// [`MIN_REFERENCE_LEN`] finite samples.
#[derive(Clone, Debug)]
pub struct Reference {
    data: Vec<f64>,
}

impl Reference {
    /// Creates a new reference after validating the data.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::InvalidSignal`] if fewer than
    /// [`MIN_REFERENCE_LEN`] samples are given or any sample is non-finite.
    pub fn new(data: Vec<f64>) -> Result<Self, DetectError> {
        if data.len() < MIN_REFERENCE_LEN {
            return Err(DetectError::InvalidSignal {
                reason: format!(
                    "reference needs at least {MIN_REFERENCE_LEN} samples, got {}",
                    data.len()
                ),
            });
        }
        check_finite(&data, "reference")?;
        Ok(Self { data })
    }

    /// Returns the samples as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns the window length, i.e. the number of samples.
    pub fn window(&self) -> usize {
        self.data.len()
    }
}

fn check_finite(data: &[f64], name: &str) -> Result<(), DetectError> {
    if data.is_empty() {
        return Err(DetectError::InvalidSignal {
            reason: format!("'{name}' is empty"),
        });
    }
    if let Some(i) = data.iter().position(|v| !v.is_finite()) {
        return Err(DetectError::InvalidSignal {
            reason: format!("'{name}' has non-finite value {} at index {i}", data[i]),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_valid() {
        let ch = Channel::new("s1", vec![1.0, 2.0]).unwrap();
        assert_eq!(ch.name(), "s1");
        assert_eq!(ch.len(), 2);
        assert!(!ch.is_empty());
        assert_eq!(ch.as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn channel_empty_rejected() {
        let err = Channel::new("s1", vec![]).unwrap_err();
        assert!(matches!(err, DetectError::InvalidSignal { .. }));
    }

    #[test]
    fn channel_nan_rejected_with_index() {
        let err = Channel::new("s1", vec![0.0, f64::NAN]).unwrap_err();
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn reference_minimum_length() {
        assert!(Reference::new(vec![1.0, 2.0]).is_err());
        let r = Reference::new(vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(r.window(), 3);
    }

    #[test]
    fn reference_infinity_rejected() {
        let err = Reference::new(vec![1.0, f64::INFINITY, 0.0]).unwrap_err();
        assert!(err.to_string().contains("reference"));
    }
}
