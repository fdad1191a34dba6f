use super::ui;
use crate::core::currency::wallet_options;
use crate::core::{ConversionController, ConversionEngine, LastEdited, Mode};
use crate::core::input::parse_exact_amount;
use anyhow::{Context, Result};
use comfy_table::Cell;
use serde::Serialize;
use std::sync::Arc;

/// Options for a single run of the converter form.
#[derive(Debug, Clone, Default)]
pub struct QuoteRequest {
    pub mode: Option<Mode>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub pay: Option<String>,
    pub receive: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub mode: Mode,
    pub from: String,
    pub to: String,
    pub pay_amount: String,
    pub receive_amount: String,
    pub rate: f64,
    pub last_edited: LastEdited,
    pub action: String,
}

/// Replays the request against a fresh controller in the order the form
/// would see it: mode, currencies, then the edited amount.
pub fn quote(engine: Arc<ConversionEngine>, request: &QuoteRequest, default_mode: Mode) -> Quote {
    let mode = request.mode.unwrap_or(default_mode);
    let mut controller = ConversionController::new(engine, mode);
    if let Some(from) = &request.from {
        controller.select_from(from);
    }
    if let Some(to) = &request.to {
        controller.select_to(to);
    }
    if let Some(receive) = &request.receive {
        controller.on_receive_changed(receive);
    } else if let Some(pay) = &request.pay {
        controller.on_pay_changed(pay);
    }

    let state = controller.state();
    Quote {
        mode: state.mode,
        from: state.from.clone(),
        to: state.to.clone(),
        pay_amount: state.pay_amount.clone(),
        receive_amount: state.receive_amount.clone(),
        rate: controller.rate(),
        last_edited: state.last_edited,
        action: mode.action_label().to_string(),
    }
}

fn warn_unknown(engine: &ConversionEngine, ids: &[&str]) {
    for id in ids {
        if !engine.is_known(id) {
            eprintln!(
                "{}",
                ui::style_text(
                    &format!("Unknown currency '{id}'; unresolved pairs convert at 1"),
                    ui::StyleType::Error
                )
            );
        }
    }
}

fn label(engine: &ConversionEngine, id: &str) -> String {
    engine
        .currency(id)
        .map_or_else(|| id.to_uppercase(), |c| c.label.clone())
}

pub fn run_currencies(engine: &ConversionEngine) -> Result<()> {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Id"),
        ui::header_cell("Label"),
        ui::header_cell("Name"),
        ui::header_cell("Class"),
        ui::header_cell(&format!("Rate to {}", engine.table().anchor().to_uppercase())),
    ]);

    let anchor = engine.table().anchor().to_string();
    for currency in engine.currencies() {
        table.add_row(vec![
            Cell::new(&currency.id),
            Cell::new(&currency.label),
            ui::format_optional_cell(currency.meta.as_deref(), |m| m.to_string()),
            Cell::new(currency.class.to_string()),
            ui::amount_cell(&ui::format_rate(engine.rate(&currency.id, &anchor))),
        ]);
    }

    println!("{table}");

    let mut wallets = ui::new_styled_table();
    wallets.set_header(vec![ui::header_cell("Wallet"), ui::header_cell("Name")]);
    for wallet in wallet_options() {
        wallets.add_row(vec![Cell::new(&wallet.id), Cell::new(&wallet.label)]);
    }
    println!("{wallets}");
    Ok(())
}

pub fn run_rate(engine: &ConversionEngine, from: &str, to: &str) -> Result<()> {
    warn_unknown(engine, &[from, to]);
    let rate = engine.rate(from, to);
    println!(
        "1 {} = {} {}",
        label(engine, from),
        ui::style_text(&ui::format_rate(rate), ui::StyleType::TotalValue),
        label(engine, to)
    );
    Ok(())
}

/// Formats both sides of a one-off conversion. Unlike the form fields, the
/// amount must be a complete number.
pub fn convert_amount(
    engine: &ConversionEngine,
    amount: &str,
    from: &str,
    to: &str,
) -> Result<(String, String)> {
    let value = parse_exact_amount(amount)
        .with_context(|| format!("Invalid amount: {amount}"))?;
    let converted = engine.convert(value, from, to);
    Ok((engine.format(value, from), engine.format(converted, to)))
}

pub fn run_convert(engine: &ConversionEngine, amount: &str, from: &str, to: &str) -> Result<()> {
    warn_unknown(engine, &[from, to]);
    let (paid, received) = convert_amount(engine, amount, from, to)?;
    println!(
        "{} {} = {} {}",
        paid,
        label(engine, from),
        ui::style_text(&received, ui::StyleType::TotalValue),
        label(engine, to)
    );
    Ok(())
}

pub fn run_quote(
    engine: Arc<ConversionEngine>,
    request: &QuoteRequest,
    default_mode: Mode,
    json: bool,
) -> Result<()> {
    let ids: Vec<&str> = request
        .from
        .iter()
        .chain(request.to.iter())
        .map(String::as_str)
        .collect();
    warn_unknown(&engine, &ids);

    let result = quote(Arc::clone(&engine), request, default_mode);
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "\nMode: {}",
        ui::style_text(result.mode.label(), ui::StyleType::Title)
    );
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(""),
        ui::header_cell("Amount"),
        ui::header_cell("Currency"),
    ]);

    let (pay_cell, receive_cell) = match result.last_edited {
        LastEdited::Pay => (
            ui::amount_cell(&result.pay_amount),
            ui::total_cell(&result.receive_amount),
        ),
        LastEdited::Receive => (
            ui::total_cell(&result.pay_amount),
            ui::amount_cell(&result.receive_amount),
        ),
    };
    table.add_row(vec![
        Cell::new("You pay"),
        pay_cell,
        Cell::new(label(&engine, &result.from)),
    ]);
    table.add_row(vec![
        Cell::new("You receive"),
        receive_cell,
        Cell::new(label(&engine, &result.to)),
    ]);
    println!("{table}");

    println!(
        "{}",
        ui::style_text(
            &format!(
                "Rate: 1 {} = {} {}",
                label(&engine, &result.from),
                ui::format_rate(result.rate),
                label(&engine, &result.to)
            ),
            ui::StyleType::Subtle
        )
    );
    println!(
        "{} {}",
        ui::style_text("Action:", ui::StyleType::TotalLabel),
        result.action
    );
    Ok(())
}
