//! Bundled layouts

pub mod crkbd;
