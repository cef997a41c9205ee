//! # Action Handlers
//!
//! Store actions grouped by domain. Each module adds an `impl AppStore` block.

pub mod custody;
pub mod governance;
pub mod savings;
pub mod session;
pub mod yield_farm;
