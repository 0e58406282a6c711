//! Client library for the news platform: the public reader, sign-in and
//! the Admin/Staff management screens, over the platform's REST API.

pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
#[cfg(feature = "client")]
pub mod http;
pub mod models;
pub mod notice;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod services;
pub mod session;
pub mod view;
