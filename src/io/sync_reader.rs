//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over ledger commands from a CSV journal
//! file. Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! Result<LedgerCommand, String> for each CSV row:
//!
//! ```no_run
//! use house_ledger::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("journal.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(command) => println!("Replaying command: {:?}", command),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual row errors are yielded as Err variants in the iterator
//! - Line numbers are included in error messages for debugging
//!
//! # Memory Efficiency
//!
//! Rows are read and converted one at a time; memory usage is O(1) per
//! command, not O(file_size).

use crate::io::csv_format::{convert_csv_command, CsvCommand};
use crate::types::LedgerCommand;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV journal reader
///
/// Provides an iterator interface over ledger commands with constant
/// memory usage.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// Opens the CSV file and prepares it for streaming iteration.
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (trailing optional columns)
    /// - Use an 8KB buffer for efficient I/O
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if file opened successfully
    /// * `Err(String)` if file could not be opened
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<LedgerCommand, String>;

    /// Get the next ledger command from the CSV file
    ///
    /// Reads the next row, deserializes it to CsvCommand, and converts it
    /// to a LedgerCommand. Line numbers are added to error messages.
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvCommand>();

        match deserializer.next()? {
            Ok(csv_command) => {
                self.line_num += 1;
                Some(
                    convert_csv_command(csv_command)
                        .map_err(|e| format!("Line {}: {}", self.line_num + 1, e)),
                )
            }
            Err(e) => {
                self.line_num += 1;
                Some(Err(format!(
                    "Line {}: CSV parse error: {}",
                    self.line_num + 1,
                    e
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Money;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    const HEADER: &str = "op,house,member,amount,description,participants,counterparty\n";

    #[test]
    fn test_sync_reader_new_opens_file() {
        let file = create_temp_csv(HEADER);
        assert!(SyncReader::new(file.path()).is_ok());
    }

    #[test]
    fn test_sync_reader_new_fails_on_missing_file() {
        let result = SyncReader::new(Path::new("nonexistent.csv"));
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_sync_reader_iterates_valid_commands() {
        let content = format!(
            "{}expense,house-1,alice,90.00,groceries,alice;bob;carol,\nsettle,house-1,bob,30.00,,,alice\n",
            HEADER
        );
        let file = create_temp_csv(&content);

        let commands: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(commands.len(), 2);
        match commands[0].as_ref().unwrap() {
            LedgerCommand::Expense(input) => {
                assert_eq!(input.paid_by, "alice");
                assert_eq!(input.amount, Money::from_cents(9000));
            }
            _ => panic!("expected expense"),
        }
        match commands[1].as_ref().unwrap() {
            LedgerCommand::Settle(input) => {
                assert_eq!(input.from, "bob");
                assert_eq!(input.to, "alice");
            }
            _ => panic!("expected settlement"),
        }
    }

    #[test]
    fn test_sync_reader_yields_error_with_line_number() {
        let content = format!(
            "{}expense,house-1,alice,90.00,groceries,alice;bob,\nexpense,house-1,alice,bogus,food,alice;bob,\n",
            HEADER
        );
        let file = create_temp_csv(&content);

        let commands: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(commands.len(), 2);
        assert!(commands[0].is_ok());
        let err = commands[1].as_ref().unwrap_err();
        assert!(err.starts_with("Line 3:"), "unexpected error: {}", err);
        assert!(err.contains("Invalid amount"));
    }

    #[test]
    fn test_sync_reader_handles_empty_file() {
        let file = create_temp_csv(HEADER);
        let commands: Vec<_> = SyncReader::new(file.path()).unwrap().collect();
        assert!(commands.is_empty());
    }

    #[test]
    fn test_sync_reader_trims_whitespace() {
        let content = format!(
            "{}expense, house-1 , alice , 10.00 , pizza , alice;bob ,\n",
            HEADER
        );
        let file = create_temp_csv(&content);

        let commands: Vec<_> = SyncReader::new(file.path()).unwrap().collect();
        match commands[0].as_ref().unwrap() {
            LedgerCommand::Expense(input) => {
                assert_eq!(input.house, "house-1");
                assert_eq!(input.paid_by, "alice");
            }
            _ => panic!("expected expense"),
        }
    }
}
