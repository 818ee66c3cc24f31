//! Poll resource: domain types, repository abstraction and the ownership-aware service.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::PollService;
