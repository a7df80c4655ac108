#![allow(clippy::missing_errors_doc)]

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use telekinesis_core::Cell;
use telekinesis_world::{Layout, LayoutError};
use thiserror::Error;

const TRANSFER_DOMAIN: &str = "tk";
const TRANSFER_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded layout payload.
pub(crate) const TRANSFER_HEADER: &str = "tk:v1";
/// Delimiter used to separate the prefix, grid dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Maze layout in a form that fits on a single line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MazeTransfer {
    /// Number of cells in each row.
    pub columns: u32,
    /// Number of rows, north first.
    pub rows: u32,
    /// South-west cell of the layout.
    pub origin: Cell,
    /// Tile rows exactly as written in the text layout.
    pub tiles: Vec<String>,
}

impl MazeTransfer {
    /// Captures a parsed layout.
    #[must_use]
    pub(crate) fn from_layout(layout: &Layout) -> Self {
        Self {
            columns: layout.grid().width(),
            rows: layout.grid().height(),
            origin: layout.origin(),
            tiles: layout.rows().to_vec(),
        }
    }

    /// Parses the captured rows back into a layout.
    pub(crate) fn to_layout(&self) -> Result<Layout, LayoutTransferError> {
        Layout::parse_at(&self.tiles.join("\n"), self.origin)
            .map_err(LayoutTransferError::InvalidLayout)
    }

    /// Encodes the layout into a single-line string suitable for clipboard transfer.
    pub(crate) fn encode(&self) -> Result<String, LayoutTransferError> {
        let payload = SerializableTransfer {
            origin: self.origin,
            tiles: self.tiles.clone(),
        };
        let json = serde_json::to_vec(&payload).map_err(LayoutTransferError::InvalidPayload)?;
        let encoded = STANDARD_NO_PAD.encode(json);
        Ok(format!(
            "{TRANSFER_HEADER}:{}x{}:{encoded}",
            self.columns, self.rows
        ))
    }

    /// Decodes a layout from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, LayoutTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LayoutTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(LayoutTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(LayoutTransferError::MissingVersion)?;
        let dimensions = parts
            .next()
            .ok_or(LayoutTransferError::MissingDimensions)?;
        let payload = parts.next().ok_or(LayoutTransferError::MissingPayload)?;

        if domain != TRANSFER_DOMAIN {
            return Err(LayoutTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != TRANSFER_VERSION {
            return Err(LayoutTransferError::UnsupportedVersion(version.to_owned()));
        }

        let (columns, rows) = parse_dimensions(dimensions)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(LayoutTransferError::InvalidEncoding)?;
        let decoded: SerializableTransfer =
            serde_json::from_slice(&bytes).map_err(LayoutTransferError::InvalidPayload)?;

        let found_rows = u32::try_from(decoded.tiles.len()).unwrap_or(u32::MAX);
        let ragged = decoded
            .tiles
            .iter()
            .any(|row| u32::try_from(row.chars().count()).unwrap_or(u32::MAX) != columns);
        if found_rows != rows || ragged {
            return Err(LayoutTransferError::DimensionMismatch {
                dimensions: dimensions.to_owned(),
            });
        }

        Ok(Self {
            columns,
            rows,
            origin: decoded.origin,
            tiles: decoded.tiles,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct SerializableTransfer {
    origin: Cell,
    tiles: Vec<String>,
}

/// Errors that can occur while decoding layout transfer strings.
#[derive(Debug, Error)]
pub(crate) enum LayoutTransferError {
    /// The provided string was empty or contained only whitespace.
    #[error("transfer string was empty")]
    EmptyPayload,
    /// The prefix segment was missing from the encoded layout.
    #[error("layout string is missing the prefix")]
    MissingPrefix,
    /// The encoded layout did not contain a version segment.
    #[error("layout string is missing the version")]
    MissingVersion,
    /// The encoded layout did not include grid dimensions.
    #[error("layout string is missing the grid dimensions")]
    MissingDimensions,
    /// The encoded layout did not include the payload segment.
    #[error("layout string is missing the payload")]
    MissingPayload,
    /// The encoded layout used an unexpected prefix segment.
    #[error("layout prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The encoded layout used an unsupported version identifier.
    #[error("layout version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The grid dimensions could not be parsed from the encoded layout.
    #[error("could not parse grid dimensions '{0}'")]
    InvalidDimensions(String),
    /// The decoded rows disagree with the advertised dimensions.
    #[error("layout rows do not match the grid dimensions '{dimensions}'")]
    DimensionMismatch {
        /// Dimensions segment as written.
        dimensions: String,
    },
    /// The base64 payload could not be decoded.
    #[error("could not decode layout payload: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The payload could not be (de)serialised.
    #[error("could not parse layout payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
    /// The decoded rows do not describe a valid layout.
    #[error("decoded layout is invalid: {0}")]
    InvalidLayout(#[source] LayoutError),
}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), LayoutTransferError> {
    let (columns, rows) = dimensions
        .split_once(['x', 'X'])
        .ok_or_else(|| LayoutTransferError::InvalidDimensions(dimensions.to_owned()))?;

    let columns = columns
        .trim()
        .parse::<u32>()
        .map_err(|_| LayoutTransferError::InvalidDimensions(dimensions.to_owned()))?;
    let rows = rows
        .trim()
        .parse::<u32>()
        .map_err(|_| LayoutTransferError::InvalidDimensions(dimensions.to_owned()))?;

    if columns == 0 || rows == 0 {
        return Err(LayoutTransferError::InvalidDimensions(
            dimensions.to_owned(),
        ));
    }

    Ok((columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "\
#####
#..F#
#G..#
##P##
";

    #[test]
    fn round_trip_keeps_origin_and_markers() {
        let layout = Layout::parse_at(SMALL, Cell::new(3200, 4100)).expect("layout parses");
        let transfer = MazeTransfer::from_layout(&layout);

        let encoded = transfer.encode().expect("transfer encodes");
        assert!(encoded.starts_with(&format!("{TRANSFER_HEADER}:5x4:")));

        let decoded = MazeTransfer::decode(&encoded).expect("transfer decodes");
        assert_eq!(decoded, transfer);
        assert_eq!(decoded.to_layout().expect("layout parses"), layout);
    }

    #[test]
    fn decode_rejects_foreign_prefix() {
        let result = MazeTransfer::decode("maze:v1:5x4:e30");
        assert!(matches!(
            result,
            Err(LayoutTransferError::InvalidPrefix(prefix)) if prefix == "maze"
        ));
    }

    #[test]
    fn decode_rejects_unknown_version() {
        let result = MazeTransfer::decode("tk:v9:5x4:e30");
        assert!(matches!(
            result,
            Err(LayoutTransferError::UnsupportedVersion(version)) if version == "v9"
        ));
    }

    #[test]
    fn decode_rejects_zero_dimensions() {
        let result = MazeTransfer::decode("tk:v1:0x4:e30");
        assert!(matches!(
            result,
            Err(LayoutTransferError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn decode_rejects_mismatched_dimensions() {
        let layout = Layout::parse(SMALL).expect("layout parses");
        let encoded = MazeTransfer::from_layout(&layout)
            .encode()
            .expect("transfer encodes");
        let tampered = encoded.replacen(":5x4:", ":5x5:", 1);

        let result = MazeTransfer::decode(&tampered);
        assert!(matches!(
            result,
            Err(LayoutTransferError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn decode_rejects_blank_input() {
        assert!(matches!(
            MazeTransfer::decode("   "),
            Err(LayoutTransferError::EmptyPayload)
        ));
    }
}
