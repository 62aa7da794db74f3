// wine-probe/src/payload.rs
// ============================================================================
// Module: Probe Payloads
// Description: Fixed wine feature vectors sent to the prediction endpoint.
// Purpose: Define the valid and deliberately ill-typed request bodies.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Both payloads share one record shape. The only difference is the type of
//! `volatile_acidity`: a number in the valid payload and text in the invalid
//! one, which a typed service must reject.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Wine-quality feature vector, generic over the `volatile_acidity` value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WineFeatures<V> {
    /// Volatile acidity (numeric in valid payloads).
    pub volatile_acidity: V,
    /// Citric acid.
    pub citric_acid: f64,
    /// Residual sugar.
    pub residual_sugar: f64,
    /// Chlorides.
    pub chlorides: f64,
    /// Free sulfur dioxide.
    pub free_sulfur_dioxide: f64,
    /// Total sulfur dioxide.
    pub total_sulfur_dioxide: f64,
    /// Acidity on the pH scale.
    #[serde(rename = "pH")]
    pub ph: f64,
    /// Sulphates.
    pub sulphates: f64,
    /// Alcohol by volume.
    pub alcohol: f64,
}

/// Feature vector with every field numeric.
pub type ValidWineFeatures = WineFeatures<f64>;

/// Feature vector whose `volatile_acidity` is text instead of a number.
pub type InvalidWineFeatures = WineFeatures<&'static str>;

// ============================================================================
// SECTION: Payloads
// ============================================================================

/// Payload a correctly behaving service must score with `200`.
pub const VALID_PAYLOAD: ValidWineFeatures = WineFeatures {
    volatile_acidity: 0.7,
    citric_acid: 0.0,
    residual_sugar: 1.9,
    chlorides: 0.076,
    free_sulfur_dioxide: 11.0,
    total_sulfur_dioxide: 34.0,
    ph: 3.51,
    sulphates: 0.56,
    alcohol: 9.4,
};

/// Payload a correctly behaving service must reject with a non-`200` status.
pub const INVALID_PAYLOAD: InvalidWineFeatures = WineFeatures {
    volatile_acidity: "invalid_string",
    citric_acid: 0.0,
    residual_sugar: 1.9,
    chlorides: 0.076,
    free_sulfur_dioxide: 11.0,
    total_sulfur_dioxide: 34.0,
    ph: 3.51,
    sulphates: 0.56,
    alcohol: 9.4,
};

// ============================================================================
// SECTION: Tests
// ============================================================================
