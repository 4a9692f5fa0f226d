//! # kdcloud
//!
//! `kdcloud` is a Rust library for neighbor queries on 3D point clouds, designed to be used in
//! Rust as well as compiled to WebAssembly (WASM). Points are collected in a [`PointCloud`], a
//! k-d tree is built over them once, and the tree then answers queries until the cloud changes.
//!
//! ## Features
//!
//! - **k-nearest neighbors**: branch-and-bound search with a per-query shrinking bound.
//! - **Fixed-radius search**: all points within a squared radius of a center.
//! - **Custom point types**: anything implementing [`Point`] can be stored, extra payload is
//!   carried along untouched.
//! - **WASM-first**: Built with `wasm-bindgen`, see `PointCloud3D` for the flat-array interface.
//!
//! ## Example
//!
//! See the `demos/` directory for a runnable driver.
//!
//! ## Main Interface
//!
//! The primary entry point is the [`PointCloud`] struct, which owns the points and the tree.

mod bounds;
mod cloud;
mod config;
mod error;
mod node;
mod point;
mod tree;
mod wasm;

pub use bounds::BoundingBox;
pub use cloud::PointCloud;
pub use config::CloudConfig;
pub use error::{CloudError, Result};
pub use node::{KNearestSearch, Leaves, PartitionNode, LEAF_CAPACITY};
pub use point::{smaller_distance, Point, Point3};
pub use tree::KdTree;
pub use wasm::PointCloud3D;
