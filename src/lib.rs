//! # igindex
//!
//! A Rust client for the IG Index trading platform REST API, plus the `igx`
//! command line frontend.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Shared newtypes, domain models, errors, platform URLs
//! 2. **Auth** — Credentials, session tokens, login/logout lifecycle
//! 3. **HTTP API** — `IgHttp` with required headers, endpoint versioning,
//!    per-endpoint retry policies, and transparent re-login on 401
//! 4. **High-Level Client** — `IgClient` with nested sub-clients
//! 5. **CLI** — clap-based frontend with text/JSON output
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use igindex::prelude::*;
//!
//! let client = IgClient::builder()
//!     .platform(Platform::Demo)
//!     .credentials(credentials)
//!     .build()?;
//!
//! let accounts = client.accounts().list().await?;
//! let markets = client.instruments().search("FTSE 100").await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions.
pub mod domain;

/// Unified client error types.
pub mod error;

/// Platform selection and gateway URLs.
pub mod network;

// ── Layer 2: Auth ────────────────────────────────────────────────────────────

/// Authentication: credentials, session tokens, login/logout.
pub mod auth;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with required headers, versioning, and retry policies.
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `IgClient` — the primary entry point.
pub mod client;

/// Configuration file + environment loading.
pub mod config;

// ── Layer 5: CLI ─────────────────────────────────────────────────────────────

/// Command line frontend (`igx`).
pub mod cli;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{DealId, Direction, Epic, Resolution};

    // Domain types — accounts
    pub use crate::domain::account::{Account, AccountStatus, AccountType, Balance};

    // Domain types — instruments
    pub use crate::domain::instrument::{
        DealingRule, DealingRules, Instrument, InstrumentType, Market, MarketSnapshot,
        MarketStatus,
    };

    // Domain types — prices
    pub use crate::domain::price::{Allowance, Candle, PriceHistory, PriceQuery, Quote};

    // Domain types — positions
    pub use crate::domain::position::wire::{ClosePositionRequest, CreatePositionRequest};
    pub use crate::domain::position::{
        DealConfirmation, DealReference, DealStatus, OrderType, Position,
    };

    // Errors
    pub use crate::error::{AuthError, ConfigError, HttpError, IgError};

    // Network
    pub use crate::network::Platform;

    // Auth types
    pub use crate::auth::{ApiCredentials, LoginResponse, SessionDetails};

    // Client + sub-clients
    pub use crate::client::{
        AccountsClient, AuthClient, IgClient, IgClientBuilder, InstrumentsClient,
        PositionsClient, PricesClient,
    };
    pub use crate::http::retry::{RetryConfig, RetryPolicy};

    // Configuration
    pub use crate::config::{load as load_config, Config};
}
