//! Interview preparation: question sets, templated sample answers and the
//! optional polish step.

pub mod answers;
pub mod polish;
pub mod questions;
