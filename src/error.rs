use std::io;

use ash::vk;

/// Failures of the environment the report is captured from or written to.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to load the Vulkan loader: {0}")]
    Loading(#[from] ash::LoadingError),

    #[error("Vulkan call failed: {0}")]
    Vulkan(#[from] vk::Result),

    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),

    #[cfg(feature = "window")]
    #[error("failed to create the event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[cfg(feature = "window")]
    #[error("failed to open a window for surface queries: {0}")]
    Window(#[from] winit::error::OsError),

    #[cfg(feature = "window")]
    #[error("window handle unavailable: {0}")]
    Handle(#[from] raw_window_handle::HandleError),
}

/// The device picked for the compact json does not exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("The selected gpu ({selected}) is not in the valid range of 0 to {}.", last_index(.gpu_count))]
pub struct GpuSelectionError {
    pub selected: usize,
    pub gpu_count: usize,
}

fn last_index(gpu_count: &usize) -> i64 {
    *gpu_count as i64 - 1
}
