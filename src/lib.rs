pub mod analysis;
pub mod booter;
pub mod listing;
pub mod marketplaces;
pub mod server;
pub mod utils;
