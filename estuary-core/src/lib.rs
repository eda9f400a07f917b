//! Core types and the selection-to-render handler for the estuary map.
//!
//! This crate is target-agnostic: the browser and the CLI plug in their own
//! [`surface::MapSurface`] and [`source::PointSource`] implementations.

pub mod config;
pub mod error;
pub mod handler;
pub mod point;
pub mod popup;
pub mod region;
pub mod source;
pub mod summary;
pub mod surface;
