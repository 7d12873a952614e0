mod codec;
mod item;
mod key;
mod map;
mod path;
mod prefix;

pub use crate::{codec::*, item::*, key::*, map::*, path::*, prefix::*};
