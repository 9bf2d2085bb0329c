//! Yandex Cloud KMS symmetric-key API — wire types and REST client.

pub mod client;
pub mod types;

pub use client::{KmsClient, SymmetricKeyApi};
pub use types::{
    CreateSymmetricKeyRequest, KeyStatus, ListSymmetricKeysResponse, Operation, OperationError,
    SymmetricAlgorithm, SymmetricKey,
};
