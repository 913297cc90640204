// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Business logic services.

pub mod aggregator;
pub mod data_dragon;
pub mod riot;

pub use data_dragon::DataDragonClient;
pub use riot::RiotClient;
