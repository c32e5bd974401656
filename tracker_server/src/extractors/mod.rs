//! Custom request extractors.

mod json_or_form;

pub use json_or_form::JsonOrForm;
