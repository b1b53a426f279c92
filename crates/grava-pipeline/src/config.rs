//! Variant configuration model.
//!
//! One [`Configuration`] fully parameterizes one output artifact:
//! which variant to generate, the pixel-grid dimensions, the physical
//! pixel pitch, the outer margin, and the stick sub-parameters when the
//! stick variant is selected. A run processes an ordered list of
//! configurations (one JSON array) against the same input images.
//!
//! Deserialization is an explicit serde schema per record type with
//! camelCase field names matching the configuration file format.
//! Unknown fields and unknown variant strings are rejected at parse
//! time; numeric invariants are checked by [`Configuration::validate`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Dimensions, PipelineError};

/// Output style selecting the geometry-generation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// One circle per pixel, radius driven by intensity.
    Circle,
    /// Per-row modulated band cut from upper/lower envelope curves.
    Band,
    /// One stick per pixel, length driven by intensity.
    Stick,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circle => f.write_str("circle"),
            Self::Band => f.write_str("band"),
            Self::Stick => f.write_str("stick"),
        }
    }
}

/// Outer margin of the produced drawing in mm.
///
/// `width` is added to the left and right, `height` to the top and
/// bottom. The bounding frame is inflated by the margin on all four
/// sides; pixel placement is offset by it once per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Margin {
    /// Left/right margin in mm.
    pub width: f64,
    /// Top/bottom margin in mm.
    pub height: f64,
}

/// Stick-variant sub-parameters.
///
/// The extra length fields exist to make physically cutting the sticks
/// practical: the jig offset compensates for a cutting fixture whose
/// ruler zero does not coincide with the actual stick end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StickConfig {
    /// Stick radius in mm for the DXF drill pattern.
    ///
    /// `0` is a sentinel meaning "derive the radius from the pixel
    /// pitch"; any positive value overrides it.
    pub radius: f64,

    /// Carve offset in mm added to the radius at emission time only,
    /// tuning the fit between tool kerf and stick diameter.
    pub radius_carve_offset: f64,

    /// Length in mm of a fully white pixel.
    pub min_length: f64,

    /// Length difference in mm between a fully white and a fully black
    /// pixel. Must be non-negative.
    pub usage_length: f64,

    /// Fixed length in mm subtracted from the computed stick length to
    /// account for the cutting jig's own offset.
    pub length_jig_offset: f64,
}

impl StickConfig {
    /// Resolve the effective stick radius for the given pixel pitch.
    ///
    /// A zero configured radius means "derive from pitch".
    #[must_use]
    pub fn effective_radius(&self, mm_per_pixel: f64) -> f64 {
        if self.radius > 0.0 {
            self.radius
        } else {
            mm_per_pixel
        }
    }
}

/// Configuration for one output variant.
///
/// Constructed once from a declarative JSON source and read-only for
/// the remainder of the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Configuration {
    /// Which output style to generate.
    pub variant: Variant,
    /// Number of pixels in width.
    pub width: u32,
    /// Number of pixels in height.
    pub height: u32,
    /// Physical size of one pixel cell in mm.
    pub mm_per_pixel: f64,
    /// Outer margin around the pixel area.
    pub margin: Margin,
    /// Stick sub-parameters; required when `variant` is `stick`,
    /// ignored otherwise.
    #[serde(default)]
    pub stick: Option<StickConfig>,
}

impl Configuration {
    /// Check the numeric invariants the serde schema cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] naming the offending
    /// field for non-positive dimensions or pitch, negative or
    /// non-finite margins, a missing stick sub-record on the stick
    /// variant, or stick fields violating their invariants.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.width == 0 {
            return Err(PipelineError::InvalidConfig(
                "width must be positive".to_owned(),
            ));
        }
        if self.height == 0 {
            return Err(PipelineError::InvalidConfig(
                "height must be positive".to_owned(),
            ));
        }
        if !(self.mm_per_pixel.is_finite() && self.mm_per_pixel > 0.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "mmPerPixel must be positive and finite, got {}",
                self.mm_per_pixel,
            )));
        }
        for (name, value) in [
            ("margin.width", self.margin.width),
            ("margin.height", self.margin.height),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(PipelineError::InvalidConfig(format!(
                    "{name} must be non-negative and finite, got {value}",
                )));
            }
        }

        if self.variant == Variant::Stick {
            let Some(stick) = self.stick else {
                return Err(PipelineError::InvalidConfig(
                    "stick variant requires a stick sub-configuration".to_owned(),
                ));
            };
            for (name, value) in [
                ("stick.radius", stick.radius),
                ("stick.radiusCarveOffset", stick.radius_carve_offset),
                ("stick.minLength", stick.min_length),
                ("stick.usageLength", stick.usage_length),
                ("stick.lengthJigOffset", stick.length_jig_offset),
            ] {
                if !value.is_finite() {
                    return Err(PipelineError::InvalidConfig(format!(
                        "{name} must be finite, got {value}",
                    )));
                }
            }
            if stick.radius < 0.0 {
                return Err(PipelineError::InvalidConfig(format!(
                    "stick.radius must be non-negative, got {}",
                    stick.radius,
                )));
            }
            if stick.usage_length < 0.0 {
                return Err(PipelineError::InvalidConfig(format!(
                    "stick.usageLength must be non-negative, got {}",
                    stick.usage_length,
                )));
            }
        }

        Ok(())
    }

    /// Pixel-grid dimensions declared by this configuration.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    /// Horizontal extent in mm of the pixel area (excluding margin).
    ///
    /// This is the right drawing edge the band variant closes its row
    /// silhouettes against.
    #[must_use]
    pub fn pixel_span(&self) -> f64 {
        f64::from(self.width) * self.mm_per_pixel
    }

    /// Outer frame width in mm: pixel area plus margin on both sides.
    #[must_use]
    pub fn frame_width(&self) -> f64 {
        f64::from(self.width).mul_add(self.mm_per_pixel, 2.0 * self.margin.width)
    }

    /// Outer frame height in mm: pixel area plus margin on both sides.
    #[must_use]
    pub fn frame_height(&self) -> f64 {
        f64::from(self.height).mul_add(self.mm_per_pixel, 2.0 * self.margin.height)
    }
}

/// Load and validate an ordered list of configurations from a JSON
/// array.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidConfig`] when the JSON is malformed
/// (with serde's field-naming message) or when any element fails
/// [`Configuration::validate`] (with the element index).
pub fn load_configurations(json: &str) -> Result<Vec<Configuration>, PipelineError> {
    let configurations: Vec<Configuration> = serde_json::from_str(json)
        .map_err(|e| PipelineError::InvalidConfig(format!("configuration parse error: {e}")))?;

    for (index, configuration) in configurations.iter().enumerate() {
        configuration.validate().map_err(|e| {
            PipelineError::InvalidConfig(format!("configuration [{index}]: {e}"))
        })?;
    }

    Ok(configurations)
}
