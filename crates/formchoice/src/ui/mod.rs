//! Presentation: option markup and the command line front end.

pub mod app;
pub mod markup;
