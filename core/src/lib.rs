//! Scripted choreography for a squad of automated cars.
//!
//! A [`choreography::Choreography`] builds an ordered list of
//! [`step::Step`]s; the [`runner::ChoreoRunner`] feeds them one host packet
//! per tick and hands the resulting controls and overrides back to the host.

pub mod arena;
pub mod choreography;
pub mod clock;
pub mod config;
pub mod crossing_squares;
pub mod drone;
pub mod error;
pub mod event;
pub mod host;
pub mod packet;
pub mod roster;
pub mod runner;
pub mod step;
pub mod store;
pub mod types;
