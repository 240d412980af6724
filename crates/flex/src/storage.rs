//! JSON persistence of the ledger.
//!
//! The document is an object with a single `customers` array:
//!
//! ```json
//! {
//!   "customers": [
//!     {
//!       "customer_name": "Acme",
//!       "flex_entries": [{ "date": "2021-12-03T00:00:00Z", "amount": 3600000000000 }]
//!     }
//!   ]
//! }
//! ```
//!
//! Amounts are integer nanoseconds. The file name `-` stands for stdin when
//! reading and stdout when writing.
use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
};

use crate::{FlexError, Ledger, ResultFlex};

/// File name selecting stdin/stdout instead of a real file.
pub const STDIO_FILE_NAME: &str = "-";

pub fn open_for_reading(file_name: &str) -> io::Result<Box<dyn Read>> {
    if file_name == STDIO_FILE_NAME {
        return Ok(Box::new(io::stdin().lock()));
    }
    Ok(Box::new(BufReader::new(File::open(file_name)?)))
}

/// Open `file_name` for writing, creating or truncating it.
pub fn open_for_writing(file_name: &str) -> io::Result<Box<dyn Write>> {
    if file_name == STDIO_FILE_NAME {
        return Ok(Box::new(io::stdout().lock()));
    }
    Ok(Box::new(BufWriter::new(File::create(file_name)?)))
}

/// Read a ledger from `reader`.
///
/// Blank input, `null` and documents without customers are
/// [`FlexError::EmptyDb`]; anything that is not a UTF-8 JSON ledger is
/// [`FlexError::InvalidJsonInput`]. The returned ledger is bound to stdio;
/// callers set the file name.
pub fn decode<R: Read>(mut reader: R) -> ResultFlex<Ledger> {
    let mut content = Vec::new();
    reader.read_to_end(&mut content)?;
    if content.iter().all(u8::is_ascii_whitespace) {
        return Err(FlexError::EmptyDb);
    }

    let ledger: Option<Ledger> = serde_json::from_slice(&content)
        .map_err(|err| FlexError::InvalidJsonInput(err.to_string()))?;
    match ledger {
        Some(ledger) if !ledger.is_empty() => Ok(ledger),
        _ => Err(FlexError::EmptyDb),
    }
}

pub fn encode<W: Write>(ledger: &Ledger, mut writer: W) -> ResultFlex<()> {
    serde_json::to_writer_pretty(&mut writer, ledger)
        .map_err(|err| FlexError::Io(io::Error::other(err)))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

impl Ledger {
    /// Load the ledger stored in `file_name`.
    ///
    /// A blank name gives a fresh ledger saving to stdout. A missing file or
    /// one without customers gives a fresh ledger bound to `file_name`, so
    /// the first save creates it. Malformed content is an error.
    pub fn open(file_name: &str) -> ResultFlex<Ledger> {
        if file_name.trim().is_empty() {
            return Ok(Ledger::new());
        }

        let reader = match open_for_reading(file_name) {
            Ok(reader) => reader,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::warn!("\"{file_name}\" not found, starting with an empty ledger");
                return Ok(Ledger::with_file_name(file_name));
            }
            Err(err) => return Err(err.into()),
        };

        let mut ledger = match decode(reader) {
            Ok(ledger) => ledger,
            Err(FlexError::EmptyDb) => {
                tracing::debug!("\"{file_name}\" holds no customers");
                Ledger::new()
            }
            Err(err) => return Err(err),
        };
        ledger.file_name = file_name.to_string();
        tracing::debug!(
            "loaded {} customers from \"{file_name}\"",
            ledger.customers.len()
        );
        Ok(ledger)
    }

    /// Write the ledger back to its file name.
    pub fn save(&self) -> ResultFlex<()> {
        let writer = open_for_writing(&self.file_name)?;
        encode(self, writer)?;
        tracing::debug!("saved ledger to \"{}\"", self.file_name);
        Ok(())
    }
}
