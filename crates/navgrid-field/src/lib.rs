//! Board model and unit navigation for navgrid.
//!
//! A [`Field`] is a square board of cells laid over world coordinates. Cells
//! can be blocked, marked and occupied; every change is reported as a
//! [`FieldEvent`]. A [`Navigator`] keeps one path per unit and re-plans it
//! when the caller asks.

pub mod config;
pub mod error;
pub mod field;
pub mod navigator;

pub use config::FieldConfig;
pub use error::FieldError;
pub use field::{Field, FieldEvent};
pub use navigator::{Navigator, UnitId};
