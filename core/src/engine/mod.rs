// Copyright (c) 2022-2023 The MobileCoin Foundation

//! The [Engine] provides the signing session required by hardware
//! wallets.
//!
//! This handles [Event] inputs and returns [Output] responses to the
//! caller, streaming the canonical transaction serialization into a
//! running digest as each event arrives. The session is an owned,
//! single-instance object: the execution model guarantees one signing
//! workflow at a time by construction, not by locking.

use num_enum::TryFromPrimitive;
use strum::{Display, EnumIter, EnumString, EnumVariantNames};
use zeroize::Zeroize;

use secp256k1::{Message, Secp256k1, SecretKey};

use crate::tx::{ActionCommon, ActionPayload, PermissionLevel, TxHeader, CHAIN_ID_LEN};

mod event;
pub use event::Event;

mod output;
pub use output::Output;

mod error;
pub use error::Error;

mod key;
pub use key::SigningKey;

mod preimage;
pub use preimage::Preimage;

/// Placeholder payload compiled for transfer actions.
// TODO: encode the real transfer layout (quantity, memo) once the
// per-action wire formats are pinned down
const TRANSFER_PAYLOAD: [u8; 4] = [0u8; 4];

/// Confirmation prompt for transaction signing
const SIGN_TX_TITLE: &str = "Sign Transaction";
const SIGN_TX_BODY: &str = "Do you really want to sign this EOS transaction?";

/// Engine internal state enumeration
#[derive(Copy, Clone, PartialEq, Debug, EnumString, Display, EnumVariantNames, EnumIter)]
pub enum State {
    /// Idle state, no session running (uninitialised or aborted)
    Init,

    /// Session initialised, actions pending compilation
    Compile,

    /// All declared actions compiled, ready to sign
    Ready,

    /// Signature produced, session spent
    Complete,
}

/// Confirmation request kinds, forwarded to the display driver
#[derive(Copy, Clone, PartialEq, Debug, EnumString, Display, TryFromPrimitive)]
#[repr(u8)]
pub enum ButtonRequest {
    Other = 0x01,
    ConfirmOutput = 0x03,
    SignTx = 0x08,
}

/// [`Driver`] trait provides platform support for [`Engine`] instances
pub trait Driver {
    /// Request user confirmation, blocking until accepted or declined
    fn confirm(&self, kind: ButtonRequest, title: &str, body: &str) -> bool;
}

impl<T: Driver> Driver for &T {
    fn confirm(&self, kind: ButtonRequest, title: &str, body: &str) -> bool {
        T::confirm(self, kind, title, body)
    }
}

/// [Engine] provides hardware-independent transaction signing for EOS
/// wallets.
///
/// Owns the running pre-image digest, a copy of the transaction header,
/// the derived signing key, and the count of actions still to be
/// compiled. All sensitive state is wiped through [`Engine::abort`],
/// which every failure path routes through.
pub struct Engine<DRV: Driver> {
    state: State,

    /// Running digest over the canonical pre-image
    preimage: Preimage,

    /// Header copy, captured at init
    header: TxHeader,

    /// Signing key copy, captured at init, wiped on teardown
    key: SigningKey,

    /// Declared actions not yet compiled
    actions_remaining: u32,

    drv: DRV,
}

impl<DRV: Driver> Engine<DRV> {
    /// Create a new signing engine instance with the provided driver
    pub fn new(drv: DRV) -> Self {
        Self {
            state: State::Init,
            preimage: Preimage::new(),
            header: TxHeader::default(),
            key: SigningKey::default(),
            actions_remaining: 0,
            drv,
        }
    }

    /// Handle incoming session events.
    ///
    /// Any error after initialisation wipes the session before it is
    /// surfaced; a half-hashed session is never left resumable.
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn update(&mut self, evt: &Event) -> Result<Output, Error> {
        #[cfg(feature = "log")]
        log::debug!("event: {:02x?}", evt);

        match self.handle(evt) {
            Ok(v) => Ok(v),
            Err(e) => {
                #[cfg(feature = "log")]
                log::error!("event failed in state {:?}: {:?}, aborting", self.state, e);

                self.abort();
                Err(e)
            }
        }
    }

    fn handle(&mut self, evt: &Event) -> Result<Output, Error> {
        match (self.state, evt) {
            // Empty event / state query, do nothing
            (_, Event::None) | (_, Event::GetInfo) => (),

            // Initialise session, superseding any prior session state
            (
                _,
                Event::TxInit {
                    chain_id,
                    num_actions,
                    header,
                    key,
                },
            ) => {
                self.tx_init(chain_id, *num_actions, header, key);
            }

            // Compile the next declared action
            (State::Compile, Event::TxAddAction { common, payload }) => {
                self.compile_action(common, payload)?;
            }

            // All declared actions are compiled; one more is a
            // validation error, and must not wrap the counter
            (State::Ready, Event::TxAddAction { .. }) => {
                return Err(Error::TooManyActions);
            }

            // Sign whenever a session is initialised (the transport
            // layer sequences completion)
            (State::Compile | State::Ready, Event::TxSign) => {
                return self.sign_tx();
            }

            (_, Event::TxSign) => {
                return Err(Error::NotInitialized);
            }

            // Explicit abort, valid in any state
            (_, Event::TxAbort) => {
                self.abort();
            }

            // Handle unexpected events
            _e => {
                #[cfg(feature = "log")]
                log::error!("Unexpected event in state {:?}: {:02x?}", self.state, _e);

                return Err(Error::UnexpectedEvent);
            }
        }

        // Default to returning updated state
        Ok(Output::State {
            state: self.state,
            actions_remaining: self.actions_remaining,
        })
    }

    /// Fetch current engine state
    pub fn state(&self) -> State {
        self.state
    }

    /// Check whether a signing session is initialised
    pub fn is_initialized(&self) -> bool {
        matches!(self.state, State::Compile | State::Ready)
    }

    /// Check whether all declared actions have been compiled
    pub fn is_finished(&self) -> bool {
        self.state == State::Ready
    }

    /// Wipe all session state: key, header, digest and counter.
    ///
    /// Idempotent, safe in any state; the single teardown path used by
    /// every failure branch.
    pub fn abort(&mut self) {
        self.key.zeroize();
        self.header.zeroize();
        self.preimage.reset();
        self.actions_remaining = 0;
        self.state = State::Init;
    }

    /// Initialise the session, streaming chain id, header and action
    /// counts in canonical order
    #[cfg_attr(feature = "noinline", inline(never))]
    fn tx_init(
        &mut self,
        chain_id: &[u8; CHAIN_ID_LEN],
        num_actions: u32,
        header: &TxHeader,
        key: &SigningKey,
    ) {
        // Supersede any prior session through the common teardown
        self.abort();

        self.preimage.put_bytes(chain_id);
        self.preimage.put_u32(header.expiration);
        self.preimage.put_u16(header.ref_block_num);
        self.preimage.put_u32(header.ref_block_prefix);
        self.preimage.put_varint(header.max_net_usage_words as u64);
        self.preimage.put_u8(header.max_cpu_usage_ms);
        self.preimage.put_varint(header.delay_sec as u64);

        // context_free_actions. count, followed by each action
        self.preimage.put_varint(0);

        // actions. count, followed by each action
        self.preimage.put_varint(num_actions as u64);

        self.header = header.clone();
        self.key = key.clone();
        self.actions_remaining = num_actions;

        self.state = match num_actions {
            0 => State::Ready,
            _ => State::Compile,
        };
    }

    /// Compile one action: common fields, then the kind-specific payload
    fn compile_action(
        &mut self,
        common: &ActionCommon,
        payload: &ActionPayload,
    ) -> Result<(), Error> {
        // Check the declared count _before_ decrementing so the counter
        // can never pass below zero
        if self.actions_remaining == 0 {
            return Err(Error::TooManyActions);
        }

        self.compile_action_common(common)?;

        match payload {
            ActionPayload::Transfer(_transfer) => {
                self.preimage.put_bytes(&TRANSFER_PAYLOAD);
            }
        }

        self.actions_remaining -= 1;
        if self.actions_remaining == 0 {
            self.state = State::Ready;
        }

        Ok(())
    }

    /// Compile action account, name and authorization list.
    ///
    /// Presence is validated before any byte is hashed; a failing
    /// authorization entry short-circuits the remainder.
    fn compile_action_common(&mut self, common: &ActionCommon) -> Result<(), Error> {
        let account = common.account.ok_or(Error::MissingAccount)?;
        let name = common.name.ok_or(Error::MissingName)?;

        if common.authorization.is_empty() {
            return Err(Error::MissingAuthorization);
        }

        self.preimage.put_u64(account);
        self.preimage.put_u64(name);

        self.preimage.put_varint(common.authorization.len() as u64);
        for auth in &common.authorization {
            self.compile_permission_level(auth)?;
        }

        Ok(())
    }

    /// Compile one (actor, permission) authorization entry
    fn compile_permission_level(&mut self, auth: &PermissionLevel) -> Result<(), Error> {
        let actor = auth.actor.ok_or(Error::MissingActor)?;
        let permission = auth.permission.ok_or(Error::MissingPermission)?;

        self.preimage.put_u64(actor);
        self.preimage.put_u64(permission);

        Ok(())
    }

    /// Append the fixed trailer, confirm with the user, finalize the
    /// digest and sign it
    #[cfg_attr(feature = "noinline", inline(never))]
    fn sign_tx(&mut self) -> Result<Output, Error> {
        // transaction_extensions. count, followed by data
        self.preimage.put_varint(0);

        // context_free_data. if nonempty, the sha256 digest of it.
        // otherwise:
        self.preimage.put_bytes(&[0u8; 32]);

        // TODO: surface expiration / delay_sec on the confirmation
        // screen alongside the fixed prompt
        if !self
            .drv
            .confirm(ButtonRequest::SignTx, SIGN_TX_TITLE, SIGN_TX_BODY)
        {
            return Err(Error::ActionCancelled);
        }

        let digest = self.preimage.finalize();

        let secp = Secp256k1::signing_only();
        let mut secret =
            SecretKey::from_slice(self.key.as_ref()).map_err(|_| Error::SignError)?;
        let message = Message::from_digest_slice(&digest).map_err(|_| Error::SignError)?;

        let (recovery_id, sig) = secp
            .sign_ecdsa_recoverable(&message, &secret)
            .serialize_compact();

        // Key material is single-use; wipe immediately after signing
        secret.non_secure_erase();
        self.key.zeroize();
        self.header.zeroize();

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&sig[..32]);
        s.copy_from_slice(&sig[32..]);

        self.state = State::Complete;

        Ok(Output::Signature {
            v: recovery_id.to_i32() as u8,
            r,
            s,
        })
    }
}
