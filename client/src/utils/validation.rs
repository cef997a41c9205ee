//! Validation of action arguments before anything is sent to a canister

use crate::core::error::{AppError, Result};

const MAX_NAME_LEN: usize = 64;
const MAX_TITLE_LEN: usize = 120;

pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }

    /// Turn a failed validation into [`AppError::Validation`].
    pub fn into_result(self) -> Result<()> {
        match self.error {
            Some(message) if !self.is_valid => Err(AppError::Validation(message)),
            _ => Ok(()),
        }
    }
}

/// Validate a savings pool name
pub fn validate_pool_name(name: &str) -> ValidationResult {
    let name = name.trim();
    if name.is_empty() {
        return ValidationResult::err("Pool name is required");
    }

    if name.chars().count() > MAX_NAME_LEN {
        return ValidationResult::err(format!(
            "Pool name must be at most {} characters",
            MAX_NAME_LEN
        ));
    }

    ValidationResult::ok()
}

/// Validate a native-unit amount (deposits, targets, positions)
pub fn validate_amount(amount: f64) -> ValidationResult {
    if !amount.is_finite() {
        return ValidationResult::err("Amount must be a number");
    }

    if amount <= 0.0 {
        return ValidationResult::err("Amount must be greater than zero");
    }

    ValidationResult::ok()
}

/// Validate a pool deadline given in days from now
pub fn validate_deadline_days(days: u32) -> ValidationResult {
    if days == 0 {
        return ValidationResult::err("Deadline must be at least one day away");
    }

    ValidationResult::ok()
}

/// Validate a governance proposal title and description
pub fn validate_proposal(title: &str, description: &str) -> ValidationResult {
    let title = title.trim();
    if title.is_empty() {
        return ValidationResult::err("Proposal title is required");
    }

    if title.chars().count() > MAX_TITLE_LEN {
        return ValidationResult::err(format!(
            "Proposal title must be at most {} characters",
            MAX_TITLE_LEN
        ));
    }

    if description.trim().is_empty() {
        return ValidationResult::err("Proposal description is required");
    }

    ValidationResult::ok()
}

/// Validate a yield strategy id
pub fn validate_strategy_id(strategy_id: &str) -> ValidationResult {
    if strategy_id.trim().is_empty() {
        return ValidationResult::err("Strategy is required");
    }

    ValidationResult::ok()
}
