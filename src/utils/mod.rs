// SPDX-License-Identifier: GPL-3.0-only
pub mod path_sanitizer;
pub mod url_validator;

pub use url_validator::{file_name_from_url, validate_url};
