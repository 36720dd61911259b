// SPDX-License-Identifier: GPL-3.0-only
pub mod traits;
pub mod client;
pub mod http;

pub use traits::Downloader;
pub use http::HttpDownloader;
