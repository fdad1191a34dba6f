use super::ui;
use crate::core::payment::PaymentSummary;
use anyhow::Result;
use comfy_table::{Attribute, Cell};

pub fn run(amount: &str, currency: &str) -> Result<()> {
    let summary = PaymentSummary::new(amount, currency);

    println!(
        "\n{}",
        ui::style_text(&format!("Send {}", summary.currency), ui::StyleType::Title)
    );
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Item"), ui::header_cell("Value")]);
    let amount_text = if summary.amount.is_empty() {
        "0.00".to_string()
    } else {
        summary.amount.clone()
    };
    table.add_row(vec![
        Cell::new("Amount"),
        ui::amount_cell(&format!("{} {}", amount_text, summary.currency)),
    ]);
    table.add_row(vec![
        Cell::new("Network fee"),
        ui::amount_cell(&summary.fee_display()),
    ]);
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        ui::total_cell(&summary.total_display()),
    ]);
    println!("{table}");
    Ok(())
}
