pub mod labels;
pub mod models;
