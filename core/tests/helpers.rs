// Copyright (c) 2022-2023 The MobileCoin Foundation

#![allow(unused)]

use std::cell::Cell;

use ledger_eos_core::engine::{ButtonRequest, Driver, Engine};

/// Driver implementation for test use: canned confirmation response
/// plus a prompt counter
pub struct TestDriver {
    pub approve: bool,
    pub prompts: Cell<usize>,
}

impl TestDriver {
    pub fn new(approve: bool) -> Self {
        Self {
            approve,
            prompts: Cell::new(0),
        }
    }
}

impl Driver for TestDriver {
    fn confirm(&self, kind: ButtonRequest, title: &str, body: &str) -> bool {
        log::debug!("confirm {kind:?}: {title} / {body}");

        self.prompts.set(self.prompts.get() + 1);
        self.approve
    }
}

pub fn engine(approve: bool) -> Engine<TestDriver> {
    Engine::new(TestDriver::new(approve))
}
