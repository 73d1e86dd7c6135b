//! A small client for the Oomnitza REST API (v3), along with the credential
//! handling used by the `oomnitzactl` binary.

pub mod api;
pub mod credentials;
