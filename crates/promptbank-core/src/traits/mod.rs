// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for pluggable PromptBank backends.
//!
//! Backends use `#[async_trait]` for dynamic dispatch compatibility.

pub mod store;

pub use store::SecretStore;
