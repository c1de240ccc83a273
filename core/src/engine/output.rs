// Copyright (c) 2022-2023 The MobileCoin Foundation

use super::State;

/// [`Engine`][super::Engine] outputs (in response to events), encoded to
/// wire responses by the transport layer
#[derive(Clone, PartialEq, Debug)]
pub enum Output {
    None,

    /// Session state and remaining action count
    State {
        state: State,
        actions_remaining: u32,
    },

    /// Recoverable signature over the finalized transaction digest
    Signature {
        v: u8,
        r: [u8; 32],
        s: [u8; 32],
    },
}

impl Output {
    /// Fetch state for outputs containing this
    pub fn state(&self) -> Option<State> {
        match self {
            Output::State { state, .. } => Some(*state),
            _ => None,
        }
    }

    /// Fetch signature components for signature outputs
    pub fn signature(&self) -> Option<(u8, &[u8; 32], &[u8; 32])> {
        match self {
            Output::Signature { v, r, s } => Some((*v, r, s)),
            _ => None,
        }
    }
}

impl PartialEq<State> for Output {
    fn eq(&self, other: &State) -> bool {
        match self {
            Output::State { state, .. } => state == other,
            _ => false,
        }
    }
}
