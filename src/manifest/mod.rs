// SPDX-License-Identifier: GPL-3.0-only
pub mod models;

pub use models::{Manifest, PostStep, Resource};
