//! Domain types shared by the renderer, the select component and the markup layer.

pub mod errors;
pub mod model;
pub mod property;
