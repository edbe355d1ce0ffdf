//! Defuzzification: collapsing an aggregated fuzzy set to one crisp value.

use std::fmt;
use std::str::FromStr;

/// Membership values within this distance of the maximum count as maximal.
const PLATEAU_EPSILON: f64 = 1e-12;

/// Defuzzification method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Defuzzifier {
    /// Weighted average of sample points: `sum(x * mu) / sum(mu)`.
    #[default]
    Centroid,
    /// First sample at which cumulative membership reaches half the total.
    Bisector,
    /// Mean of the samples with maximal membership.
    MeanOfMaximum,
    /// Smallest sample with maximal membership.
    SmallestOfMaximum,
    /// Largest sample with maximal membership.
    LargestOfMaximum,
}

impl Defuzzifier {
    /// All methods, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Centroid,
        Self::Bisector,
        Self::MeanOfMaximum,
        Self::SmallestOfMaximum,
        Self::LargestOfMaximum,
    ];

    /// Short name used in configuration and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Centroid => "centroid",
            Self::Bisector => "bisector",
            Self::MeanOfMaximum => "mom",
            Self::SmallestOfMaximum => "som",
            Self::LargestOfMaximum => "lom",
        }
    }

    /// Collapses `membership` sampled at `samples` to a crisp value.
    ///
    /// Returns `None` when the set is empty (all membership zero) or the
    /// slices differ in length.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn defuzzify(self, samples: &[f64], membership: &[f64]) -> Option<f64> {
        if samples.len() != membership.len() {
            return None;
        }
        let total: f64 = membership.iter().sum();
        if total <= 0.0 {
            return None;
        }

        match self {
            Self::Centroid => {
                let moment: f64 = samples
                    .iter()
                    .zip(membership)
                    .map(|(x, mu)| x * mu)
                    .sum();
                Some(moment / total)
            }
            Self::Bisector => {
                let half = total / 2.0;
                let mut cumulative = 0.0;
                samples
                    .iter()
                    .zip(membership)
                    .find(|(_, &mu)| {
                        cumulative += mu;
                        cumulative >= half
                    })
                    .map(|(&x, _)| x)
            }
            Self::MeanOfMaximum | Self::SmallestOfMaximum | Self::LargestOfMaximum => {
                let peak = membership.iter().copied().fold(0.0, f64::max);
                let mut maxima = samples
                    .iter()
                    .zip(membership)
                    .filter(|(_, &mu)| (peak - mu).abs() <= PLATEAU_EPSILON)
                    .map(|(&x, _)| x);

                match self {
                    Self::SmallestOfMaximum => maxima.next(),
                    Self::LargestOfMaximum => maxima.last(),
                    _ => {
                        let (sum, count) = maxima.fold((0.0, 0usize), |(s, n), x| (s + x, n + 1));
                        (count > 0).then(|| sum / count as f64)
                    }
                }
            }
        }
    }
}

impl fmt::Display for Defuzzifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Defuzzifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "centroid" => Ok(Self::Centroid),
            "bisector" => Ok(Self::Bisector),
            "mom" | "mean_of_maximum" => Ok(Self::MeanOfMaximum),
            "som" | "smallest_of_maximum" => Ok(Self::SmallestOfMaximum),
            "lom" | "largest_of_maximum" => Ok(Self::LargestOfMaximum),
            other => Err(format!(
                "unknown defuzzification method '{other}' (expected centroid, bisector, mom, som or lom)"
            )),
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
    use super::*;

    const XS: [f64; 5] = [0.0, 1.0, 2.0, 3.0, 4.0];

    #[test]
    fn test_centroid_symmetric() {
        let mu = [0.0, 0.5, 1.0, 0.5, 0.0];
        assert_eq!(Defuzzifier::Centroid.defuzzify(&XS, &mu), Some(2.0));
    }

    #[test]
    fn test_centroid_weighted() {
        let mu = [1.0, 0.0, 0.0, 0.0, 1.0];
        assert_eq!(Defuzzifier::Centroid.defuzzify(&XS, &mu), Some(2.0));

        let mu = [0.0, 0.0, 0.0, 1.0, 1.0];
        assert_eq!(Defuzzifier::Centroid.defuzzify(&XS, &mu), Some(3.5));
    }

    #[test]
    fn test_empty_set_has_no_value() {
        let mu = [0.0; 5];
        for method in Defuzzifier::ALL {
            assert_eq!(method.defuzzify(&XS, &mu), None, "{method}");
        }
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(Defuzzifier::Centroid.defuzzify(&XS, &[1.0]), None);
    }

    #[test]
    fn test_maximum_family() {
        let mu = [0.2, 1.0, 1.0, 1.0, 0.1];
        assert_eq!(Defuzzifier::MeanOfMaximum.defuzzify(&XS, &mu), Some(2.0));
        assert_eq!(Defuzzifier::SmallestOfMaximum.defuzzify(&XS, &mu), Some(1.0));
        assert_eq!(Defuzzifier::LargestOfMaximum.defuzzify(&XS, &mu), Some(3.0));
    }

    #[test]
    fn test_bisector() {
        let mu = [1.0, 1.0, 1.0, 1.0, 0.0];
        assert_eq!(Defuzzifier::Bisector.defuzzify(&XS, &mu), Some(1.0));
    }

    #[test]
    fn test_parse_round_trip_names() {
        for method in Defuzzifier::ALL {
            assert_eq!(method.as_str().parse::<Defuzzifier>().unwrap(), method);
        }
        assert_eq!("CENTROID".parse::<Defuzzifier>().unwrap(), Defuzzifier::Centroid);
        assert!("median".parse::<Defuzzifier>().is_err());
    }
}
