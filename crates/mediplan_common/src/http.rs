// --- File: crates/mediplan_common/src/http.rs ---

pub mod client;
