//! Interactive symbol prompt.
//!
//! Kept separate from clap parsing: clap handles flags, the prompt provides the
//! "run `sentiment` and type a ticker" UX.

use std::io::{self, BufRead, Write};

use crate::error::AppError;

/// Ask for a symbol on stdin until a non-empty one is entered.
pub fn prompt_for_symbol() -> Result<String, AppError> {
    let stdin = io::stdin();
    read_symbol(&mut stdin.lock(), &mut io::stdout())
}

/// Prompt on `out`, read from `input`. `q` cancels; EOF is an error.
pub fn read_symbol<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String, AppError> {
    loop {
        write!(out, "Enter the stock or crypto symbol (e.g., AAPL, BTC): ")
            .and_then(|_| out.flush())
            .map_err(|e| AppError::config(format!("Failed to write prompt: {e}")))?;

        let mut line = String::new();
        let bytes = input
            .read_line(&mut line)
            .map_err(|e| AppError::config(format!("Failed to read input: {e}")))?;

        if bytes == 0 {
            return Err(AppError::config(
                "No input received. Provide a symbol with `sentiment analyze -s <SYMBOL>`.",
            ));
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Err(AppError::config("Canceled."));
        }
        if let Some(symbol) = normalize_symbol(line) {
            return Ok(symbol);
        }
        writeln!(out, "Symbol cannot be empty.")
            .map_err(|e| AppError::config(format!("Failed to write prompt: {e}")))?;
    }
}

/// Trim and upper-case a symbol; `None` if nothing remains.
pub fn normalize_symbol(raw: &str) -> Option<String> {
    let s = raw.trim();
    if s.is_empty() { None } else { Some(s.to_uppercase()) }
}
