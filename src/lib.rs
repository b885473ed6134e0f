// ABOUTME: Library crate for bizauth exposing the onboarding flow for testing and external use

#![allow(missing_docs)]

pub mod app;
pub mod backend;
pub mod cli;
pub mod components;
pub mod config;
pub mod forms;
pub mod models;
pub mod screens;
