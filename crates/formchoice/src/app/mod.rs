//! Application layer: choice rendering strategies and the single-select component.

pub mod model;
pub mod renderer;
pub mod select;
pub mod source;
