//! Text processing and analysis module

pub mod analyzer;
pub mod batch;
pub mod document;
pub mod education;
pub mod experience;
pub mod name;
pub mod scoring;
pub mod skills;
pub mod text_processor;
pub mod vacancy;
pub mod vectorize;

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
