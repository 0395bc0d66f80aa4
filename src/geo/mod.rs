//! Location-scope classification and the geo-eligibility policy.

pub mod classifier;
pub mod policy;

pub use classifier::{LocationClassification, LocationClassifier, LocationScope};
pub use policy::{GeoPolicyDecision, GeoPolicyEngine};
