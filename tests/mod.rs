//! Test suite for YourPlaces
//!
//! This module organizes all integration and property tests. Everything
//! here drives the public API of the crate.

#![cfg(feature = "ssr")]

pub mod integration;
