pub mod reconciler;
pub mod rules;
