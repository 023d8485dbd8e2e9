//! Todolist - a self-hosted to-do list server
//!
//! This library provides a REST API for managing per-user todo items,
//! backed by SQLite through SeaORM, with bearer-token user resolution
//! and SendGrid-backed reminder emails for items due soon.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`config`] - Application configuration management
//! * [`storage`] - Database connection and schema migrations
//! * [`services`] - Service layer between the HTTP surface and the store
//! * [`api`] - REST API routes, authentication and error envelope
//! * [`web`] - Minimal HTML entry pages

/// REST API surface: router, handlers, authentication, error envelope
pub mod api;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and validation bounds
pub mod constants;

/// SeaORM entity models for database tables
pub mod entities;

/// Logging setup built on fern
pub mod logger;

/// Service layer for todo items, users, email and reminders
pub mod services;

/// Database connection management and versioned migrations
pub mod storage;

/// Explicit payload validation with field-level errors
pub mod validation;

/// HTML entry pages (landing, about, contact, error)
pub mod web;

// Re-export entity models for convenient access
pub use entities::{file_info, todo, user};
