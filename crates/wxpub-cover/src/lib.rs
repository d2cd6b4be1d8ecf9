//! Cover image fetch and hosting.
//!
//! [`UnsplashClient`] picks a random stock photo for the article cover and
//! downloads it. [`QiniuUploader`] uploads the image to Qiniu object storage
//! and returns its public URL.
//!
//! Both talk HTTP synchronously through `ureq`; one article is prepared per
//! run, so there is nothing to overlap.

mod error;
mod http;
mod qiniu;
mod unsplash;

pub use error::CoverError;
pub use qiniu::QiniuUploader;
pub use unsplash::{Photo, UnsplashClient};
