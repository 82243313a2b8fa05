//! Core logic for Mailex.
//!
//! This crate holds the extraction workflow and its models with no web
//! dependencies. The repository is reached only through the
//! [`repository::ContentRepository`] trait.
//!
//! # Modules
//!
//! - `event` - Repository event model, filters and dispatch
//! - `mail` - Multipart message parsing
//! - `repository` - Content repository contract and bodies
//! - `extraction` - Attachment extraction workflow

pub mod event;
pub mod extraction;
pub mod mail;
pub mod repository;
