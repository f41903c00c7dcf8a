pub mod converters;
pub mod responses;
