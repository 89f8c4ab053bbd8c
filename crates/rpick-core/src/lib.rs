#![forbid(unsafe_code)]

//! Core: geometry, animation primitives, and the transition model.
//!
//! # Role in rpick
//! `rpick-core` owns everything the reaction picker needs that is not
//! specific to reactions: layout-unit geometry, easing curves and springs,
//! the quadratic flight path, and [`transition::AnimatedValue`], which keeps
//! the committed (logical) value of a visual property apart from the value a
//! renderer should present on the current frame.
//!
//! # How it fits in the system
//! `rpick-widgets` computes layout synchronously and writes committed values
//! through a [`transition::Transition`]. The host drives presentation by
//! calling `tick` with frame deltas (see [`clock::FrameClock`]) and reads the
//! presented values back when drawing.

pub mod animation;
pub mod clock;
pub mod color;
pub mod geometry;
pub mod transition;

