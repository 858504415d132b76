//! Render boundary
//!
//! The simulation never draws; it hands the host a [`Frame`] of plain draw
//! commands each render tick. Hosts map strokes and sprites onto whatever
//! surface they own (canvas, GPU, terminal).

pub mod frame;

pub use frame::{build_frame, Frame, SpriteDraw, Stroke};
