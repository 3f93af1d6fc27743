//! Star-schema construction for building-energy simulation runs.
//!
//! This crate turns extracted [`RunRecord`](energy_model::RunRecord)s into
//! the nine tables of the warehouse:
//!
//! - **dimensions**: building, scenario, zone, AHU and time dimensions with
//!   surrogate keys
//! - **facts**: zone conditions, HVAC, meter and weather facts at their grain
//! - **assembler**: the single entry point building all of them in order

pub mod assembler;
pub mod dimensions;
pub mod error;
pub mod facts;
mod frame;
mod lookup;

pub use assembler::build_star_schema;
pub use dimensions::{
    build_dim_ahu, build_dim_building, build_dim_scenario, build_dim_time, build_dim_zone,
};
pub use error::{Result, TransformError};
pub use facts::{
    build_fact_hvac, build_fact_meters, build_fact_weather, build_fact_zone_conditions, cop_proxy,
};
