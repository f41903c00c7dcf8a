pub mod advisor;
pub mod formatting;
pub mod health;
pub mod portfolios;
pub mod sentiment;
pub mod simulations;
pub mod valuations;
