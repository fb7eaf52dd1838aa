//! Categorize bank statement transactions with keywords learned from user
//! corrections.
//!
//! ```rust,ignore
//! use statement_categorizer::{Config, Edit, Session};
//!
//! let mut session = Session::open(&Config::default())?;
//! session.on_add_category("Housing")?;
//! session.on_upload(&file_content)?;
//! session.on_apply_edits(&[Edit::new(0, "Housing")]);
//! let summary = session.expense_summary();
//! ```

mod builder;
mod types;

pub mod categorizer;
pub mod config;
pub mod errors;
pub mod feedback;
pub mod parsers;
pub mod session;
pub mod store;
pub mod summary;

pub use builder::ParserBuilder;
pub use categorizer::{Categorizer, ResolutionPolicy, categorize};
pub use config::Config;
pub use feedback::{Correction, Edit, apply_correction, apply_corrections};
pub use parsers::prelude::*;
pub use session::Session;
pub use store::{Category, CategoryStore};
pub use summary::{summarize, total_credits, total_debits};
pub use types::{CategorySummary, Flow, Transaction, UNCATEGORIZED};
