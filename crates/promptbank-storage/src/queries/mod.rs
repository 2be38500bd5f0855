// SPDX-FileCopyrightText: 2026 PromptBank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules. Each accepts `&Database` and runs through its single
//! background connection.

pub mod secrets;
