/// Convenience result type used across the crate.
pub type BoardResult<T> = Result<T, BoardError>;

/// Top-level error taxonomy used by board APIs.
///
/// Every render failure is fatal: the caller receives exactly one of these and no image bytes.
#[derive(thiserror::Error, Debug)]
pub enum BoardError {
    /// The requested board id is not part of the catalog.
    #[error("config error: unknown board id '{board_id}'")]
    UnknownBoard {
        /// Board id as supplied by the caller.
        board_id: String,
    },

    /// The background template for a board is missing or undecodable.
    #[error("template load error for board '{board_id}' ({template}): {reason}")]
    TemplateLoad {
        /// Board being rendered.
        board_id: String,
        /// Template asset name.
        template: String,
        /// Underlying failure.
        reason: String,
    },

    /// A cover image could not be retrieved.
    #[error("cover fetch error for board '{board_id}' cell {cell} ({url}): {reason}")]
    CoverFetch {
        /// Board being rendered.
        board_id: String,
        /// Grid index of the failing cell.
        cell: usize,
        /// Cover URL that was requested.
        url: String,
        /// Underlying failure.
        reason: String,
    },

    /// A cover image was retrieved but is not a decodable raster.
    #[error("cover decode error for board '{board_id}' cell {cell} ({url}): {reason}")]
    CoverDecode {
        /// Board being rendered.
        board_id: String,
        /// Grid index of the failing cell.
        cell: usize,
        /// Cover URL that was requested.
        url: String,
        /// Underlying failure.
        reason: String,
    },

    /// Icon or font asset failed to load.
    #[error("asset error: {0}")]
    Asset(String),

    /// Invalid caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Final image encoding failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoardError {
    /// Build a [`BoardError::UnknownBoard`] value.
    pub fn unknown_board(board_id: impl Into<String>) -> Self {
        Self::UnknownBoard {
            board_id: board_id.into(),
        }
    }

    /// Build a [`BoardError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`BoardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BoardError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Board id the failure is attributed to, when known.
    pub fn board_id(&self) -> Option<&str> {
        match self {
            Self::UnknownBoard { board_id }
            | Self::TemplateLoad { board_id, .. }
            | Self::CoverFetch { board_id, .. }
            | Self::CoverDecode { board_id, .. } => Some(board_id.as_str()),
            _ => None,
        }
    }

    /// Grid index of the failing cell, for per-cell failures.
    pub fn cell(&self) -> Option<usize> {
        match self {
            Self::CoverFetch { cell, .. } | Self::CoverDecode { cell, .. } => Some(*cell),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
