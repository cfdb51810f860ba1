//! Aggregation of event records into feature vectors.
//!
//! This module transforms parsed traces into:
//! - A fixed-schema feature vector per trace
//! - The exported column schema shared by every vector

pub mod extractor;
pub mod features;

// Re-export main types and functions
pub use extractor::extract_features;
pub use features::{format_rate, FeatureValue, FeatureVector, FEATURE_COLUMNS};
