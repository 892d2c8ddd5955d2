//! Shared state handed to the axum handlers.

use std::sync::Arc;

use crate::{domain::MembershipRegistry, usecase::RelayConnectionUseCase};

/// Shared application state
pub struct AppState {
    /// Connection lifecycle (register, loop, deregister)
    pub relay_connection_usecase: Arc<RelayConnectionUseCase>,
    /// Membership registry, read for operational endpoints only
    pub registry: Arc<dyn MembershipRegistry>,
}
