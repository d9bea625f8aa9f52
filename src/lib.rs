//! Order creation and listing, with side effects driven by an in-process
//! event dispatcher.

pub mod config;
pub mod domain;
pub mod events;
pub mod grpc;
pub mod infrastructure;
pub mod messaging;
pub mod metrics;
pub mod usecase;
pub mod web;
