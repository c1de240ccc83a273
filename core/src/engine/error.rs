// Copyright (c) 2022-2023 The MobileCoin Foundation

/// [Engine][super::Engine] errors
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
#[repr(u8)]
pub enum Error {
    /// Unexpected event for the current state
    #[cfg_attr(feature = "thiserror", error("Unexpected event"))]
    UnexpectedEvent = 0x01,

    /// Operation requires an initialised signing session
    #[cfg_attr(feature = "thiserror", error("Signing session not initialised"))]
    NotInitialized = 0x02,

    /// Action account missing
    #[cfg_attr(feature = "thiserror", error("action account missing"))]
    MissingAccount = 0x03,

    /// Action name missing
    #[cfg_attr(feature = "thiserror", error("action name missing"))]
    MissingName = 0x04,

    /// Action authorization list empty
    #[cfg_attr(feature = "thiserror", error("action authorization empty"))]
    MissingAuthorization = 0x05,

    /// Permission level actor missing
    #[cfg_attr(feature = "thiserror", error("permission level actor missing"))]
    MissingActor = 0x06,

    /// Permission level permission missing
    #[cfg_attr(feature = "thiserror", error("permission level permission missing"))]
    MissingPermission = 0x07,

    /// More actions compiled than declared at init
    #[cfg_attr(feature = "thiserror", error("declared action count exceeded"))]
    TooManyActions = 0x08,

    /// User declined confirmation
    #[cfg_attr(feature = "thiserror", error("Action cancelled"))]
    ActionCancelled = 0x09,

    /// Signing error
    #[cfg_attr(feature = "thiserror", error("Signing error"))]
    SignError = 0x0a,

    /// Invalid asset symbol (non-uppercase symbol code)
    #[cfg_attr(feature = "thiserror", error("invalid asset symbol"))]
    InvalidSymbol = 0x0b,

    /// Display encoding failed (output buffer exhausted)
    #[cfg_attr(feature = "thiserror", error("display encoding failed"))]
    EncodingFailed = 0x0c,
}
