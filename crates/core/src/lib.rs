#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::must_use_candidate
)]

//! GOV.UK style-guide formatting filters for prototype templates.
//!
//! Filters are grouped by the kind of value they take:
//! - [`array`]: list sentences, predicates, selection and de-duplication
//! - [`date`]: ages, date arithmetic, GOV.UK dates and times, date inputs
//! - [`number`]: currency, ordinals, pluralisation
//! - [`object`]: predicates and object-to-array reshaping
//! - [`string`]: GOV.UK Markdown, slugs, orphan control
//!
//! [`filters::register_filters`] binds all of them onto a MiniJinja
//! environment under their template names.

pub mod array;
pub mod config;
pub mod date;
pub mod filters;
pub mod number;
pub mod object;
pub mod string;
pub mod templates;
pub mod utils;

pub use config::types::{Clock, FilterConfig};
pub use filters::{FILTERS, FilterInfo, register_filters};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
