mod arena;
mod balance;
mod handle;
mod node;
mod path;
mod raw_sorted_set;
mod rotation;
mod weight;

pub(crate) use node::Dir;
pub(crate) use raw_sorted_set::RawSortedSet;
