//! Extractors whose rejections render as the API's JSON error body.

mod enhanced_json;
mod enhanced_path;
mod enhanced_query;
mod validated_json;

pub use crate::extract::reject::enhanced_json::Json;
pub use crate::extract::reject::enhanced_path::Path;
pub use crate::extract::reject::enhanced_query::Query;
pub use crate::extract::reject::validated_json::ValidateJson;
