//! Shared application state.

use hashlink::Chain;

/// Handed to every handler. The chain handle is an `Arc` inside.
#[derive(Debug, Clone)]
pub struct AppState {
    pub chain: Chain,
}

impl AppState {
    pub fn new(chain: Chain) -> Self {
        Self { chain }
    }
}
