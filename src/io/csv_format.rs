//! CSV format handling for ledger commands and balance output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvCommand structure for deserialization
//! - Conversion from CSV rows to domain commands
//! - Balance sheet output serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{ExpenseInput, HouseId, LedgerCommand, MemberBalance, Money, SettlementInput};
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV row structure for deserialization
///
/// Matches the journal format with columns:
/// `op, house, member, amount, description, participants, counterparty`
///
/// `member` is the payer for an expense and the paying member for a
/// settlement. `participants` is a `;`-separated member list and only
/// applies to expenses; `counterparty` is the settlement recipient and only
/// applies to settlements. For settlements the description column, if
/// present, becomes the settlement note.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvCommand {
    pub op: String,
    pub house: String,
    pub member: String,
    pub amount: Option<String>,
    pub description: Option<String>,
    pub participants: Option<String>,
    pub counterparty: Option<String>,
}

/// Convert a CsvCommand to a LedgerCommand
///
/// This function:
/// - Parses the operation string ("expense" or "settle", case insensitive)
/// - Parses the amount string into integer-cents Money
/// - Validates that expenses carry a description and a participant list
/// - Validates that settlements carry a counterparty
///
/// # Returns
///
/// Result containing either:
/// - Ok(LedgerCommand) - Successfully converted command
/// - Err(String) - Error message describing the conversion failure
pub fn convert_csv_command(csv_command: CsvCommand) -> Result<LedgerCommand, String> {
    let amount = match csv_command.amount {
        Some(ref amount_str) if !amount_str.trim().is_empty() => {
            Money::from_str(amount_str.trim())
                .map_err(|e| format!("Invalid amount '{}': {}", amount_str, e))?
        }
        _ => {
            return Err(format!(
                "{} for house {} requires an amount",
                csv_command.op, csv_command.house
            ))
        }
    };

    match csv_command.op.to_lowercase().as_str() {
        "expense" => {
            let description = match csv_command.description {
                Some(d) if !d.trim().is_empty() => d.trim().to_string(),
                _ => {
                    return Err(format!(
                        "expense for house {} requires a description",
                        csv_command.house
                    ))
                }
            };

            let split_between: Vec<String> = csv_command
                .participants
                .as_deref()
                .unwrap_or("")
                .split(';')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
            if split_between.is_empty() {
                return Err(format!(
                    "expense for house {} requires a participant list",
                    csv_command.house
                ));
            }

            Ok(LedgerCommand::Expense(ExpenseInput {
                house: csv_command.house,
                paid_by: csv_command.member,
                amount,
                description,
                split_between,
            }))
        }
        "settle" => {
            let to = match csv_command.counterparty {
                Some(c) if !c.trim().is_empty() => c.trim().to_string(),
                _ => {
                    return Err(format!(
                        "settle for house {} requires a counterparty",
                        csv_command.house
                    ))
                }
            };

            let note = csv_command
                .description
                .filter(|d| !d.trim().is_empty())
                .map(|d| d.trim().to_string());

            Ok(LedgerCommand::Settle(SettlementInput {
                house: csv_command.house,
                from: csv_command.member,
                to,
                amount,
                note,
            }))
        }
        _ => Err(format!(
            "Invalid operation: '{}' for house {}",
            csv_command.op, csv_command.house
        )),
    }
}

/// Write a balance sheet to CSV format
///
/// Writes rows with columns: house, member, balance. The input is expected
/// to be pre-sorted by (house, member); the order is preserved so output
/// stays deterministic.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_balances_csv(
    balances: &[(HouseId, MemberBalance)],
    output: &mut dyn Write,
) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["house", "member", "balance"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for (house, balance) in balances {
        writer
            .write_record(&[
                house.clone(),
                balance.member.clone(),
                balance.balance.to_string(),
            ])
            .map_err(|e| format!("Failed to write balance record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
