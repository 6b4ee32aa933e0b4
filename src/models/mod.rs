pub mod issue;
pub mod user;
pub mod filter;
pub mod view;
pub mod page;
