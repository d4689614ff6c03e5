//! Conversion CLI commands
//!
//! Runs a single value through the attribute codec, the same way a
//! persistence layer would on write (`encrypt`) and on read (`decrypt`).

use std::sync::Arc;

use clap::Subcommand;

use crate::codec::{AttributeKind, ColumnCodec};
use crate::crypto::SharedKey;
use crate::error::FieldCryptResult;

/// Conversion subcommands
#[derive(Subcommand)]
pub enum ConvertCommands {
    /// Convert a canonical value into its stored column text
    Encrypt {
        /// Canonical value (e.g. 2017-03-28 for a date)
        value: String,
        /// Attribute type: text, date or datetime
        #[arg(short, long, default_value = "text")]
        kind: AttributeKind,
    },

    /// Convert stored column text back into its canonical value
    Decrypt {
        /// Text as read from the column
        stored: String,
        /// Attribute type: text, date or datetime
        #[arg(short, long, default_value = "text")]
        kind: AttributeKind,
    },
}

/// Handle a conversion command, returning the text to print
pub fn handle_convert_command(keys: &SharedKey, cmd: ConvertCommands) -> FieldCryptResult<String> {
    let codec = ColumnCodec::new(Arc::new(keys.clone()));

    let output = match cmd {
        ConvertCommands::Encrypt { value, kind } => {
            tracing::debug!(%kind, "converting value to storage");
            codec.encode(kind, Some(&value))?
        }
        ConvertCommands::Decrypt { stored, kind } => {
            tracing::debug!(%kind, "converting value from storage");
            codec.decode(kind, Some(&stored))?
        }
    };

    Ok(output.unwrap_or_default())
}
