//! Finsight - Search-Grounded Financial Analyst Chat
//!
//! This crate implements the conversation core of a financial analyst chat
//! assistant backed by a search-augmented generative-language API.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
