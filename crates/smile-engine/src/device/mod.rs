//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - gating startup on the adapter's API level
//! - creating & configuring the Surface (swapchain) and its depth buffer
//! - acquiring frames and providing encoders/views for rendering

mod capability;
mod depth;
mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use capability::{api_level, require_api_level, MIN_API_LEVEL};
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
