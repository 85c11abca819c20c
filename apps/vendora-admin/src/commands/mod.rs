//! # Commands Module
//!
//! Everything the console can ask for, as plain async functions over
//! state and API collaborators.
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Categories                                   │
//! │                                                                         │
//! │  ┌───────────────────┐  ┌───────────────────┐  ┌───────────────────┐   │
//! │  │  Auth Commands    │  │ Catalog Commands  │  │  Sale Commands    │   │
//! │  │                   │  │                   │  │                   │   │
//! │  │  • login          │  │  • list_products  │  │  • open_sale      │   │
//! │  │  • logout         │  │  • list_clients   │  │  • add_item       │   │
//! │  │  • restore_session│  │                   │  │  • remove_item    │   │
//! │  │  • whoami         │  │                   │  │  • adjust_quantity│   │
//! │  │                   │  │                   │  │  • submit_sale    │   │
//! │  │                   │  │                   │  │  • cancel_sale    │   │
//! │  │                   │  │                   │  │  • list_sales     │   │
//! │  └───────────────────┘  └───────────────────┘  └───────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Collaborators the sale flow needs are taken as `&dyn` traits from
//! `vendora_api`, so tests run against in-process fakes.

pub mod auth;
pub mod catalog;
pub mod sale;
