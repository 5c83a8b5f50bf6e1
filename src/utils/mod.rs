pub mod aggregation_utils;
pub mod validation_utils;
