// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Code generation support.
//!
//! - **`layout`**: object layouts and dispatch tables derived from the class
//!   graph, in root-to-leaf inheritance order

pub mod layout;
