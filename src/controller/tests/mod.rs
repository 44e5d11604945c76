//! Scenario tests for the document controller.
//!
//! These drive the controller through `handle` with a recording frontend and
//! real files in a temporary directory.

mod load_tests;
mod support;
