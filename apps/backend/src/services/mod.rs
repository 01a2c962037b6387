pub mod ai;
pub mod generation;
pub mod tutor;
