//! field-route planning engine
//!
//! Picks a working set of units, builds a cost matrix (road network with
//! geodesic fallback) and orders the visits from a depot.

pub mod traits;
pub mod unit;
pub mod error;
pub mod matrix;
pub mod haversine;
pub mod osrm;
pub mod cost;
pub mod catalog;
pub mod select;
pub mod tour;
pub mod improve;
pub mod policy;
pub mod export;
pub mod planner;
pub mod polyline;
