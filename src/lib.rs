//! Dog Passport core library.
//!
//! Verification badges, health-record wallets and the handler-facing views
//! of the Dog Passport product. All data is embedded fixture data; every
//! network call is a fixed-delay simulation behind the [`app::ports::Clock`]
//! port.
//!
//! ```text
//!  fixtures ──▶ verification ──▶ views / nav / passport
//!      │               │
//!      └──── app::service (session · wizard · documents · audit)
//! ```

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod audit;
pub mod config;
pub mod documents;
pub mod error;
pub mod fixtures;
pub mod fsm;
pub mod model;
pub mod nav;
pub mod passport;
pub mod verification;
pub mod views;

pub use error::{Error, Result};
