//! memfree: RAM and swap totals in fixed or human-readable units.
//!
//! The conversion core lives in [`format`]: [`format::convert`] divides a raw
//! byte count by a fixed unit and [`format::humanize`] scales it to one
//! decimal digit with a binary (`Gi`) or decimal (`G`) suffix. Everything
//! else gathers the raw counts ([`system`]), lays them out ([`ui`]) and
//! repeats on request ([`app`]).

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod system;
pub mod ui;
