//! Supabase integration for Locify.
//!
//! The hosted backend exposes the `devices` table over a PostgREST-style
//! REST API; this crate wraps it in a [`locify_common::services::DeviceBackend`]
//! implementation. Persistence, auth, and realtime are the backend's
//! concern; the client only reads the device list and upserts location
//! fields.

mod client;

pub use client::SupabaseClient;
