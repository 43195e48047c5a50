//! Screen/world coordinate handling

pub mod mapper;

pub use mapper::CoordinateMapper;
