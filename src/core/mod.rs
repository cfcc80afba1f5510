//! Core functionality: catalog, prerequisite engine, completion tracking,
//! grid rendering and the interaction controller

pub mod completion;
pub mod controller;
pub mod engine;
pub mod grid;
pub mod models;
pub mod render;
pub mod storage;
