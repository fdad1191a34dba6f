use super::ui;
use crate::core::currency::{bank_options, find_option};
use crate::core::recipient::{FieldError, RecipientDetails, RecipientWizard};
use crate::core::resolver::{AccountDirectory, AccountNameResolver, AccountQuery, Resolution};
use anyhow::{Result, bail};
use comfy_table::Cell;

#[derive(Debug, Clone, Default)]
pub struct RecipientInput {
    pub bank: String,
    pub account_number: String,
    pub phone: String,
    pub email: Option<String>,
}

fn print_errors(errors: &[FieldError]) {
    for error in errors {
        eprintln!("{}", ui::style_text(&error.to_string(), ui::StyleType::Error));
    }
}

/// Walks the wizard with the given input, resolving the account holder
/// between the two steps.
pub async fn collect<D: AccountDirectory + 'static>(
    input: &RecipientInput,
    resolver: &AccountNameResolver<D>,
) -> Result<RecipientDetails> {
    let mut wizard = RecipientWizard::new();
    wizard.account.bank_id = input.bank.to_lowercase();
    wizard.account.account_number = input.account_number.clone();
    if let Err(errors) = wizard.next() {
        print_errors(&errors);
        bail!("Bank details are invalid");
    }

    let pb = ui::new_spinner("Resolving account name...");
    let handle = resolver
        .submit(AccountQuery::new(&input.bank, &input.account_number))
        .await;
    let resolution = handle.await?;
    pb.finish_and_clear();

    wizard.account_name = match resolution {
        Some(Resolution::Found(name)) => Some(name),
        Some(Resolution::NotFound) | None => None,
    };

    wizard.contact.phone = input.phone.clone();
    wizard.contact.email = input.email.clone();
    match wizard.submit() {
        Ok(details) => Ok(details),
        Err(errors) => {
            print_errors(&errors);
            bail!("Contact details are invalid");
        }
    }
}

pub async fn run<D: AccountDirectory + 'static>(
    input: &RecipientInput,
    resolver: &AccountNameResolver<D>,
) -> Result<()> {
    let details = collect(input, resolver).await?;

    let banks = bank_options();
    let bank_label = find_option(&banks, &details.account.bank_id)
        .map_or_else(|| details.account.bank_id.clone(), |b| b.label.clone());

    println!(
        "\n{}",
        ui::style_text("Recipient details", ui::StyleType::Title)
    );
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Field"), ui::header_cell("Value")]);
    table.add_row(vec![Cell::new("Bank"), Cell::new(bank_label)]);
    table.add_row(vec![
        Cell::new("Account number"),
        Cell::new(&details.account.account_number),
    ]);
    table.add_row(vec![
        Cell::new("Account name"),
        match &details.account_name {
            Some(name) => ui::total_cell(name),
            None => Cell::new(ui::style_text("Not found", ui::StyleType::Error)),
        },
    ]);
    table.add_row(vec![Cell::new("Phone"), Cell::new(&details.contact.phone)]);
    table.add_row(vec![
        Cell::new("Email"),
        ui::format_optional_cell(
            details.contact.email.as_deref().filter(|e| !e.is_empty()),
            |e| e.to_string(),
        ),
    ]);
    println!("{table}");
    Ok(())
}
