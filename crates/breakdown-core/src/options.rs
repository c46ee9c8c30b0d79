use crate::error::OptionsError;

/// Smallest accepted cast-column split ratio.
pub const MIN_CAST_SPLIT: f64 = 0.55;
/// Largest accepted cast-column split ratio.
pub const MAX_CAST_SPLIT: f64 = 0.85;
/// Default cast-column split ratio.
pub const DEFAULT_CAST_SPLIT: f64 = 0.61;

const MAX_PRECISION: u32 = 6;

/// Options for turning page tokens into scene records.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseOptions {
    /// Fraction of the page width at which the cast column starts.
    /// Tokens with `x0 >= width * cast_split_ratio` belong to the cast column.
    pub cast_split_ratio: f64,
    /// Decimal places `top` is rounded to when grouping schedule tokens into lines.
    pub line_y_precision: u32,
    /// Decimal places `top` is rounded to when grouping legend tokens on page 1.
    pub legend_y_precision: u32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            cast_split_ratio: DEFAULT_CAST_SPLIT,
            line_y_precision: 1,
            legend_y_precision: 0,
        }
    }
}

impl ParseOptions {
    /// Options with a custom split ratio and default rounding.
    pub fn with_cast_split(cast_split_ratio: f64) -> Self {
        Self {
            cast_split_ratio,
            ..Self::default()
        }
    }

    /// Check every value against its accepted range.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(MIN_CAST_SPLIT..=MAX_CAST_SPLIT).contains(&self.cast_split_ratio) {
            return Err(OptionsError::CastSplitOutOfRange {
                value: self.cast_split_ratio,
                min: MIN_CAST_SPLIT,
                max: MAX_CAST_SPLIT,
            });
        }
        for (name, value) in [
            ("line_y_precision", self.line_y_precision),
            ("legend_y_precision", self.legend_y_precision),
        ] {
            if value > MAX_PRECISION {
                return Err(OptionsError::PrecisionTooLarge {
                    name,
                    value,
                    max: MAX_PRECISION,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = ParseOptions::default();
        assert_eq!(opts.cast_split_ratio, 0.61);
        assert_eq!(opts.line_y_precision, 1);
        assert_eq!(opts.legend_y_precision, 0);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_split_bounds_inclusive() {
        assert!(ParseOptions::with_cast_split(0.55).validate().is_ok());
        assert!(ParseOptions::with_cast_split(0.85).validate().is_ok());
    }

    #[test]
    fn test_split_out_of_range() {
        let err = ParseOptions::with_cast_split(0.4).validate().unwrap_err();
        assert!(matches!(err, OptionsError::CastSplitOutOfRange { .. }));
        assert!(ParseOptions::with_cast_split(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_precision_too_large() {
        let opts = ParseOptions {
            line_y_precision: 9,
            ..ParseOptions::default()
        };
        assert!(matches!(
            opts.validate(),
            Err(OptionsError::PrecisionTooLarge {
                name: "line_y_precision",
                ..
            })
        ));
    }
}
