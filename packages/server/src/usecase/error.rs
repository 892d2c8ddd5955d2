//! UseCase error types.

use thiserror::Error;

use crate::domain::{ConnectionId, StreamError};

/// Terminal error of one relay connection.
///
/// Per-recipient send failures never show up here; they are contained in
/// the broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("error receiving message on '{connection_id}': {source}")]
    StreamRead {
        connection_id: ConnectionId,
        #[source]
        source: StreamError,
    },
}

