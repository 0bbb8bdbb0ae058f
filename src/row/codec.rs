//! Row codec
//!
//! Binary hand-off format for rows on their way to a storage writer.
//!
//! ## Wire Format
//! ```text
//! ┌─────────────┬─────────┬──────────────────────────────────────────┐
//! │ Version (1) │ Len (4) │ bincode(Row)                             │
//! └─────────────┴─────────┴──────────────────────────────────────────┘
//! ```

use crate::error::{Result, TableLogError};

use super::Row;

/// Header size: 1 byte version + 4 bytes length
pub const HEADER_SIZE: usize = 5;

/// Current format version
pub const FORMAT_VERSION: u8 = 0x01;

/// Maximum payload size (16 MB)
pub const MAX_PAYLOAD_SIZE: u32 = 16 * 1024 * 1024;

fn check_payload_len(payload_len: usize) -> Result<()> {
    if payload_len > MAX_PAYLOAD_SIZE as usize {
        return Err(TableLogError::Serialization(format!(
            "Payload too large: {} bytes (max {})",
            payload_len, MAX_PAYLOAD_SIZE
        )));
    }
    Ok(())
}

/// Encode a row to bytes
pub fn encode_row(row: &Row) -> Result<Vec<u8>> {
    let payload =
        bincode::serialize(row).map_err(|e| TableLogError::Serialization(e.to_string()))?;
    check_payload_len(payload.len())?;

    let mut message = Vec::with_capacity(HEADER_SIZE + payload.len());
    message.push(FORMAT_VERSION);
    message.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    message.extend_from_slice(&payload);

    Ok(message)
}

/// Decode a row from bytes produced by `encode_row`
pub fn decode_row(bytes: &[u8]) -> Result<Row> {
    if bytes.len() < HEADER_SIZE {
        return Err(TableLogError::Serialization(format!(
            "Incomplete header: expected {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    let version = bytes[0];
    if version != FORMAT_VERSION {
        return Err(TableLogError::Serialization(format!(
            "Unknown row format version: 0x{:02x}",
            version
        )));
    }

    let payload_len = u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]) as usize;
    check_payload_len(payload_len)?;

    let total_len = HEADER_SIZE + payload_len;
    if bytes.len() < total_len {
        return Err(TableLogError::Serialization(format!(
            "Incomplete payload: expected {} bytes, got {}",
            total_len,
            bytes.len()
        )));
    }

    bincode::deserialize(&bytes[HEADER_SIZE..total_len])
        .map_err(|e| TableLogError::Serialization(e.to_string()))
}
