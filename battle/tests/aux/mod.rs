#![allow(unused)]

pub mod catalog;
pub mod fixture;

pub use catalog::*;
pub use fixture::*;

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
