// --- File: crates/mediplan_gcal/src/lib.rs ---
// Declare modules within this crate
pub mod auth;
#[cfg(test)]
mod dispatch_test;
pub mod error;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod schedule;
pub mod service;
