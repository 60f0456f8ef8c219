//! JSON API routes.

pub mod calculator;
