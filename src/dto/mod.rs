//! Wire-level envelopes and view payloads shared by services and view-models.

pub mod api;
pub mod home;
