//! Contract module containing trait definitions for model inference

mod regressor;

pub use regressor::Regressor;
