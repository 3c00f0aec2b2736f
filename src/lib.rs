//! Laser Circuit - tick-based photon simulation on a grid board

pub mod circuit;
pub mod components;
pub mod core;
pub mod input;
pub mod spatial;
