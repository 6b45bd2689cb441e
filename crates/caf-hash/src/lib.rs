//! Hash primitive and digest identity for the caf object store.
//!
//! This crate provides the `ObjectHash` text digest, the streaming
//! `Hasher` over SHA-1 and SHA-256, hex helpers, and the `HashPrimitive`
//! seam through which the object model reduces bytes to an identity.

mod algorithm;
mod error;
mod hash;
pub mod hasher;
pub mod hex;
mod primitive;

pub use algorithm::HashAlgorithm;
pub use error::HashError;
pub use hash::ObjectHash;
pub use primitive::HashPrimitive;
