//! Warp-style simulated terminal for the KyOS browser desktop.
//!
//! The [`core`] module holds the interpreter and its session state and is
//! shared by both front ends: the Leptos web app ([`app`], [`components`])
//! and the native `kyos-cli` REPL.

pub mod app;
pub mod components;
pub mod config;
pub mod core;
pub mod models;
pub mod utils;
