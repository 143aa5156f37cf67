//! Raw ADC count to microvolt conversion

use eeg_core::AdcSpec;

/// Converts raw ADC counts into calibrated microvolt values.
///
/// The transform is the fixed linear chain of the acquisition front end:
/// counts are mapped to a voltage against the supply rail, re-centered on
/// the mid-supply virtual ground, divided by the front-end gain, and scaled
/// to microvolts. It is strictly monotonic and stateless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdcConverter {
    spec: AdcSpec,
}

impl AdcConverter {
    pub fn new(spec: AdcSpec) -> Self {
        AdcConverter { spec }
    }

    /// Convert one raw sample to microvolts.
    ///
    /// Inputs above [`eeg_core::ADC_MAX`] are not rejected: the same linear
    /// formula extrapolates them. The device cannot produce such values on a
    /// healthy link, and range policing belongs to the transport layer.
    pub fn to_microvolts(&self, raw: u16) -> f32 {
        let voltage = (raw as f32 / self.spec.resolution) * self.spec.supply_voltage;
        let eeg_voltage = (voltage - self.spec.supply_voltage / 2.0) / self.spec.gain;
        eeg_voltage * 1e6
    }

    pub fn spec(&self) -> &AdcSpec {
        &self.spec
    }
}

impl Default for AdcConverter {
    fn default() -> Self {
        AdcConverter::new(AdcSpec::bitalino())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eeg_core::ADC_MAX;

    #[test]
    fn test_mid_scale_maps_to_zero() {
        let converter = AdcConverter::default();
        // 512/1024 * 3.3 = 1.65 V, exactly the virtual ground
        assert_eq!(converter.to_microvolts(512), 0.0);
    }

    #[test]
    fn test_strictly_monotonic() {
        let converter = AdcConverter::default();
        let mut prev = converter.to_microvolts(0);
        for raw in 1..=ADC_MAX {
            let current = converter.to_microvolts(raw);
            assert!(
                current > prev,
                "conversion not monotonic at raw={}: {} <= {}",
                raw,
                current,
                prev
            );
            prev = current;
        }
    }

    #[test]
    fn test_full_scale_range() {
        let converter = AdcConverter::default();
        // One LSB below mid-supply, so slightly negative
        assert!(converter.to_microvolts(0) < 0.0);
        assert!(converter.to_microvolts(ADC_MAX) > 0.0);
        // Full span is supply/gain = 3.3 mV = 3300 µV
        let span = converter.to_microvolts(ADC_MAX) - converter.to_microvolts(0);
        assert!((span - 3300.0 * 1023.0 / 1024.0).abs() < 0.5);
    }

    #[test]
    fn test_out_of_range_extrapolates() {
        let converter = AdcConverter::default();
        let at_max = converter.to_microvolts(ADC_MAX);
        let beyond = converter.to_microvolts(ADC_MAX + 100);
        assert!(beyond > at_max);
    }
}
