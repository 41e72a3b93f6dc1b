pub mod pick;

pub use pick::WeightedTable;
