// Copyright (c) 2022-2023 The MobileCoin Foundation

use super::SigningKey;
use crate::tx::{ActionCommon, ActionPayload, TxHeader, CHAIN_ID_LEN};

/// [`Engine`][super::Engine] input events, decoded from wire requests by
/// the transport layer
#[derive(Clone, Debug)]
pub enum Event<'a> {
    None,

    /// Fetch session state / progress
    GetInfo,

    /// Initialise a signing session, superseding any prior session.
    ///
    /// Streams the chain id, header fields and action counts into the
    /// pre-image digest and captures copies of the header and key.
    TxInit {
        chain_id: &'a [u8; CHAIN_ID_LEN],
        num_actions: u32,
        header: TxHeader,
        key: SigningKey,
    },

    /// Compile the next declared action into the pre-image
    TxAddAction {
        common: &'a ActionCommon,
        payload: &'a ActionPayload,
    },

    /// Append the fixed trailer, confirm with the user, and sign
    TxSign,

    /// Abort the session, wiping all sensitive state
    TxAbort,
}
