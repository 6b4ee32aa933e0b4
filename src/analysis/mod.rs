pub mod filter;
pub mod sort;
pub mod aggregate;
pub mod paginate;
pub mod cluster;
pub mod mock;
pub mod mutate;
