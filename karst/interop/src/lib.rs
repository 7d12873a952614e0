mod associations;
mod bridge;
mod config;
mod ctx;
mod error;
mod evm;
mod gas;
mod query;
mod registry;
mod standard;
mod state;
mod testing;
mod version;

pub use crate::{
    associations::*, bridge::*, config::*, ctx::*, error::*, evm::*, gas::*, query::*,
    registry::*, standard::*, state::*, testing::*, version::*,
};
