//! Program one-time-programmable fuses on i.MX SoCs
//!
//! The OCOTP array is accessed through the files the kernel exposes, either
//! the `fsl_otp` register directory or the `imx-ocotp` nvmem image. Every fuse
//! can be queried, verified against an expected value, or committed. A commit
//! never touches a fuse which already holds a different value.

pub use self::{
    controller::{CommitOutcome, FuseController},
    error::Error,
    fuse::{DesiredValue, FuseDescriptor, FuseValue, ProgrammedState},
    store::{FuseStore, StoreLayout},
    targets::Chip,
};

pub mod cli;
pub mod codec;
pub mod controller;
pub mod error;
pub mod fuse;
pub mod logging;
pub mod store;
pub mod targets;
