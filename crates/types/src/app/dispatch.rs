// Path: crates/types/src/app/dispatch.rs
//! Runtime dispatch errors, SCALE-compatible with the layout a node reports.

use parity_scale_codec::{Decode, Encode};
use std::fmt;

/// Size of the module-specific error payload.
pub const MAX_MODULE_ERROR_ENCODED_SIZE: usize = 4;

/// A custom error raised by a runtime pallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub struct ModuleError {
    /// Pallet index, matching the metadata pallet index.
    pub index: u8,
    /// Pallet-specific error value. The first byte is the error variant index.
    pub error: [u8; MAX_MODULE_ERROR_ENCODED_SIZE],
}

impl ModuleError {
    /// The error variant index within the pallet's error enum.
    pub fn error_index(&self) -> u8 {
        let [variant, ..] = self.error;
        variant
    }
}

/// An error related to tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub enum TokenError {
    /// Funds are unavailable.
    FundsUnavailable,
    /// Some part of the balance gives the only provider reference to the account.
    OnlyProvider,
    /// The account cannot exist with the funds that would be given.
    BelowMinimum,
    /// The account cannot be created.
    CannotCreate,
    /// The asset in question is unknown.
    UnknownAsset,
    /// Funds exist but are frozen.
    Frozen,
    /// The operation is not supported by the asset.
    Unsupported,
}

/// An arithmetic error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub enum ArithmeticError {
    /// Underflow.
    Underflow,
    /// Overflow.
    Overflow,
    /// Division by zero.
    DivisionByZero,
}

/// The reason an extrinsic failed to dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub enum DispatchError {
    /// Some error occurred.
    Other(String),
    /// Failed to lookup some data.
    CannotLookup,
    /// A bad origin.
    BadOrigin,
    /// A custom error in a module.
    Module(ModuleError),
    /// At least one consumer is remaining so the account cannot be destroyed.
    ConsumerRemaining,
    /// There are no providers so the account cannot be created.
    NoProviders,
    /// There are too many consumers so the account cannot be created.
    TooManyConsumers,
    /// An error to do with tokens.
    Token(TokenError),
    /// An arithmetic error.
    Arithmetic(ArithmeticError),
    /// Resources exhausted.
    Exhausted,
    /// The state is corrupt.
    Corruption,
    /// Some resource is unavailable right now.
    Unavailable,
}

impl DispatchError {
    /// Decodes a SCALE-encoded dispatch error as carried in a `System.ExtrinsicFailed` event.
    pub fn from_scale_bytes(mut bytes: &[u8]) -> Result<Self, parity_scale_codec::Error> {
        Self::decode(&mut bytes)
    }

    /// Returns the module error if this is a pallet-specific error.
    pub fn as_module(&self) -> Option<&ModuleError> {
        match self {
            Self::Module(m) => Some(m),
            _ => None,
        }
    }
}

/// The generic string representation, used when a module error cannot be resolved.
impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(reason) => write!(f, "{{\"other\":\"{}\"}}", reason),
            Self::Module(m) => write!(
                f,
                "{{\"module\":{{\"index\":{},\"error\":\"0x{}\"}}}}",
                m.index,
                hex::encode(m.error)
            ),
            Self::Token(t) => write!(f, "{{\"token\":\"{:?}\"}}", t),
            Self::Arithmetic(a) => write!(f, "{{\"arithmetic\":\"{:?}\"}}", a),
            unit => write!(f, "{:?}", unit),
        }
    }
}
