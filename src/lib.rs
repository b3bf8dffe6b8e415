//! Absentee Lookup - School District Chronic Absenteeism Viewer
//!
//! Loads a district CSV, searches districts by name and charts the selected
//! district's rate history.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod session;
