//! Text-level utilities shared by the chunking strategies: sentence
//! splitting, table protection, structural boundary detection, and
//! email-address sanitizing.

pub mod boundary;
pub mod sanitize;
pub mod sentence;
pub mod table_guard;

pub use boundary::{split_emails, split_slides};
pub use sanitize::remove_email_addresses;
pub use sentence::split_sentences;
pub use table_guard::TableGuard;
