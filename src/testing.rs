//! Recording backend for the unit tests.

use std::{vec, vec::Vec};

use crate::backend::{Phase, SSD1306Backend};

macro_rules! send {
    ([$($d:expr),*]) => { Sent::Data(vec![$($d,)*]) };
    ($c:expr) => { Sent::Cmd($c) };
}

macro_rules! sends {
    ($($e:tt),* $(,)?) => { vec![$(send!($e),)*] };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Cmd(u8),
    Data(Vec<u8>),
}

/// Records every transaction. Fails every transaction once `fail_after` have gone through.
#[derive(Debug, Default)]
pub struct SpyBackend {
    pub sent: Vec<Sent>,
    pub fail_after: Option<usize>,
}

impl SpyBackend {
    pub fn new() -> Self {
        SpyBackend::default()
    }

    pub fn failing_after(count: usize) -> Self {
        SpyBackend {
            sent: vec![],
            fail_after: Some(count),
        }
    }

    /// the command bytes only, in order
    pub fn commands(&self) -> Vec<u8> {
        self.sent
            .iter()
            .filter_map(|sent| match sent {
                Sent::Cmd(byte) => Some(*byte),
                Sent::Data(_) => None,
            })
            .collect()
    }

    pub fn take(&mut self) -> Vec<Sent> {
        core::mem::take(&mut self.sent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusDown;

impl SSD1306Backend for SpyBackend {
    type Error = BusDown;

    fn send(&mut self, phase: Phase, bytes: &[u8]) -> Result<(), BusDown> {
        if self.fail_after == Some(self.sent.len()) {
            return Err(BusDown);
        }
        match phase {
            Phase::Command => {
                assert_eq!(bytes.len(), 1, "command bytes must be sent one by one");
                self.sent.push(Sent::Cmd(bytes[0]));
            }
            Phase::Data => self.sent.push(Sent::Data(bytes.to_vec())),
        }
        Ok(())
    }
}
