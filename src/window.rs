use std::ffi;

use raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawDisplayHandle};
use winit::{event_loop::EventLoop, window::Window};

use crate::{Instance, PresentationSurface, ReportError};

/// An invisible native window, kept open while its surface is queried.
///
/// Fields drop in declaration order: the surface goes before its window,
/// and the window before the event loop it belongs to.
pub struct NativeWindow {
    surface: Option<PresentationSurface>,
    window: Window,
    event_loop: EventLoop<()>,
}

impl NativeWindow {
    /// Connect to the window system of the current session.
    pub fn open() -> Result<Self, ReportError> {
        let event_loop = EventLoop::new()?;

        let attributes = Window::default_attributes()
            .with_title("vulkaninfo")
            .with_visible(false);

        #[allow(deprecated)]
        let window = event_loop.create_window(attributes)?;

        Ok(Self {
            surface: None,
            window,
            event_loop,
        })
    }

    fn display_handle(&self) -> Result<RawDisplayHandle, ReportError> {
        Ok(self.event_loop.display_handle()?.as_raw())
    }

    /// Instance extensions needed to create a surface for this window.
    pub fn required_extensions(&self) -> Result<Vec<String>, ReportError> {
        let extensions = ash_window::enumerate_required_extensions(self.display_handle()?)?;

        let names = extensions.iter().map(|&ext| {
            // SAFETY: ash-window returns pointers to static nul terminated names
            unsafe { ffi::CStr::from_ptr(ext) }
                .to_string_lossy()
                .into_owned()
        });

        Ok(names.collect())
    }

    /// Create the surface of this window on `instance`, replacing any
    /// previous one.
    pub fn create_surface(
        &mut self,
        instance: &Instance,
    ) -> Result<&PresentationSurface, ReportError> {
        let display_handle = self.display_handle()?;
        let window_handle = self.window.window_handle()?.as_raw();

        let backend = self
            .required_extensions()?
            .into_iter()
            .find(|name| name != "VK_KHR_surface")
            .unwrap_or_else(|| String::from("VK_KHR_surface"));

        // drop the previous surface before creating its replacement
        self.surface = None;

        let surface = unsafe {
            let handle = ash_window::create_surface(
                instance.entry(),
                instance.handle(),
                display_handle,
                window_handle,
                None,
            )?;

            PresentationSurface::from_raw(instance, handle, &backend)
        };

        Ok(self.surface.insert(surface))
    }

    pub fn surface(&self) -> Option<&PresentationSurface> {
        self.surface.as_ref()
    }
}
