// file: src/parser/mod.rs
// description: batch splitting and document field extraction exports
// reference: internal module structure

pub mod batch;
pub mod email;
pub mod patterns;
pub mod review;

pub use batch::{read_batch, split_batch, try_read_batch};
pub use email::{EmailFields, extract_email_fields};
pub use review::{ReviewFields, extract_review_fields};
