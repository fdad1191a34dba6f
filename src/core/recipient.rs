//! Recipient details wizard: bank account first, then contact details.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::LazyLock;
use tracing::{debug, info};

static TEN_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10}$").expect("valid regex"));
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+'-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    pub bank_id: String,
    pub account_number: String,
}

impl BankAccount {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.bank_id.trim().is_empty() {
            errors.push(FieldError {
                field: "bank_id",
                message: "Bank is required",
            });
        }
        if !TEN_DIGITS.is_match(&self.account_number) {
            errors.push(FieldError {
                field: "account_number",
                message: "Account number must be 10 digits",
            });
        }
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    #[serde(default)]
    pub email: Option<String>,
    pub phone: String,
}

impl ContactDetails {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            if !EMAIL.is_match(email) {
                errors.push(FieldError {
                    field: "email",
                    message: "Enter a valid email",
                });
            }
        }
        if !TEN_DIGITS.is_match(&self.phone) {
            errors.push(FieldError {
                field: "phone",
                message: "Phone number must be 10 digits (no country code)",
            });
        }
        errors
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientDetails {
    pub account: BankAccount,
    pub contact: ContactDetails,
    pub account_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    BankAccount,
    Contact,
    Complete,
}

#[derive(Debug, Clone)]
pub struct RecipientWizard {
    step: WizardStep,
    pub account: BankAccount,
    pub contact: ContactDetails,
    pub account_name: Option<String>,
}

impl Default for RecipientWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipientWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::BankAccount,
            account: BankAccount::default(),
            contact: ContactDetails::default(),
            account_name: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Validates the current step and moves forward if it passes.
    pub fn next(&mut self) -> Result<WizardStep, Vec<FieldError>> {
        let errors = match self.step {
            WizardStep::BankAccount => self.account.validate(),
            WizardStep::Contact => self.contact.validate(),
            WizardStep::Complete => Vec::new(),
        };
        if !errors.is_empty() {
            debug!(step = ?self.step, errors = errors.len(), "Step validation failed");
            return Err(errors);
        }
        self.step = match self.step {
            WizardStep::BankAccount => WizardStep::Contact,
            WizardStep::Contact | WizardStep::Complete => WizardStep::Complete,
        };
        Ok(self.step)
    }

    /// Returns to the previous step, keeping entered values.
    pub fn back(&mut self) -> WizardStep {
        self.step = match self.step {
            WizardStep::BankAccount | WizardStep::Contact => WizardStep::BankAccount,
            WizardStep::Complete => WizardStep::Contact,
        };
        self.step
    }

    /// Runs any remaining steps and returns the submitted details.
    pub fn submit(&mut self) -> Result<RecipientDetails, Vec<FieldError>> {
        while self.step != WizardStep::Complete {
            self.next()?;
        }
        let details = RecipientDetails {
            account: self.account.clone(),
            contact: self.contact.clone(),
            account_name: self.account_name.clone(),
        };
        info!(
            bank = %details.account.bank_id,
            account = %details.account.account_number,
            phone = %details.contact.phone,
            "Recipient details submitted"
        );
        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(errors: &[FieldError]) -> Vec<&'static str> {
        errors.iter().map(|e| e.message).collect()
    }

    #[test]
    fn test_bank_account_validation() {
        let empty = BankAccount::default();
        assert_eq!(
            messages(&empty.validate()),
            vec!["Bank is required", "Account number must be 10 digits"]
        );

        let short = BankAccount {
            bank_id: "gtb".to_string(),
            account_number: "12345".to_string(),
        };
        assert_eq!(
            messages(&short.validate()),
            vec!["Account number must be 10 digits"]
        );

        let ok = BankAccount {
            bank_id: "gtb".to_string(),
            account_number: "0123456789".to_string(),
        };
        assert!(ok.validate().is_empty());
    }

    #[test]
    fn test_contact_validation() {
        let mut contact = ContactDetails {
            email: None,
            phone: "8012345678".to_string(),
        };
        assert!(contact.validate().is_empty());

        contact.email = Some(String::new());
        assert!(contact.validate().is_empty());

        contact.email = Some("not-an-email".to_string());
        assert_eq!(messages(&contact.validate()), vec!["Enter a valid email"]);

        contact.email = Some("ada@example.com".to_string());
        contact.phone = "+2348012345678".to_string();
        assert_eq!(
            messages(&contact.validate()),
            vec!["Phone number must be 10 digits (no country code)"]
        );
    }

    #[test]
    fn test_wizard_flow() {
        let mut wizard = RecipientWizard::new();
        assert_eq!(wizard.step(), WizardStep::BankAccount);
        assert!(wizard.next().is_err());
        assert_eq!(wizard.step(), WizardStep::BankAccount);

        wizard.account.bank_id = "access".to_string();
        wizard.account.account_number = "0123456789".to_string();
        assert_eq!(wizard.next(), Ok(WizardStep::Contact));

        assert_eq!(wizard.back(), WizardStep::BankAccount);
        assert_eq!(wizard.account.account_number, "0123456789");
        assert_eq!(wizard.next(), Ok(WizardStep::Contact));

        let errors = wizard.submit().unwrap_err();
        assert_eq!(errors[0].field, "phone");
        assert_eq!(wizard.step(), WizardStep::Contact);

        wizard.contact.phone = "8012345678".to_string();
        wizard.account_name = Some("Ada Obi".to_string());
        let details = wizard.submit().unwrap();
        assert_eq!(wizard.step(), WizardStep::Complete);
        assert_eq!(details.account.bank_id, "access");
        assert_eq!(details.account_name.as_deref(), Some("Ada Obi"));
    }
}
