//! Core types for the phone catalog.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod currency;
pub mod id;
pub mod page;
pub mod phone;
pub mod request;
pub mod validation;

pub use category::{Category, NewCategory};
pub use currency::{CurrencyCode, CurrencyError};
pub use id::*;
pub use page::{Page, PageRequest};
pub use phone::{PhoneAttributes, PhoneRecord};
pub use request::PhoneRequest;
pub use validation::ValidationErrors;
