mod address;
mod binary;
mod block;
mod buffer;
mod error;
mod query;
mod serializers;
mod shared;
mod storage;
mod testing;
mod utils;

pub use crate::{
    address::*, binary::*, block::*, buffer::*, error::*, query::*, serializers::*, shared::*,
    storage::*, testing::*, utils::*,
};
