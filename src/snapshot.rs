use crate::{
    DeviceGroup, Entry, ExtensionProperties, GpuInfo, Instance, LayerExtensions,
    PresentationSurface, ReportError, SurfaceInfo, Version,
};

/// Everything a report is rendered from, captured once.
///
/// A snapshot owns plain data only, so it can be built by hand and rendered
/// any number of times.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub api_version: Version,
    pub instance_extensions: Vec<ExtensionProperties>,
    pub layers: Vec<LayerExtensions>,
    /// Extensions surfaces were created with, in creation order.
    pub surface_backends: Vec<String>,
    /// One entry per backend and gpu, backend major.
    pub surfaces: Vec<SurfaceInfo>,
    /// `None` when the instance cannot enumerate device groups.
    pub device_groups: Option<Vec<DeviceGroup>>,
    pub gpus: Vec<GpuInfo>,
}

impl Snapshot {
    /// Query the Vulkan implementation behind `entry`.
    pub fn capture(entry: &Entry) -> Result<Self, ReportError> {
        let api_version = entry.instance_version()?;
        let instance_extensions = entry.instance_extensions(None)?;
        let layers = entry.layers()?;

        tracing::debug!(%api_version, layers = layers.len(), "Capturing snapshot");

        #[cfg(feature = "window")]
        let mut window = match crate::NativeWindow::open() {
            Ok(window) => Some(window),
            Err(error) => {
                tracing::warn!(%error, "Failed to open a window, skipping its surface");
                None
            }
        };

        #[cfg(feature = "window")]
        let extra_extensions = match &window {
            Some(window) => window.required_extensions()?,
            None => Vec::new(),
        };

        #[cfg(not(feature = "window"))]
        let extra_extensions = Vec::new();

        let instance = entry.create_instance(&extra_extensions)?;

        let headless = match instance.is_extension_enabled("VK_EXT_headless_surface") {
            true => match PresentationSurface::headless(&instance) {
                Ok(surface) => Some(surface),
                Err(error) => {
                    tracing::warn!(%error, "Failed to create a headless surface");
                    None
                }
            },
            false => None,
        };

        #[cfg(feature = "window")]
        if let Some(window) = &mut window {
            if let Err(error) = window.create_surface(&instance) {
                tracing::warn!(%error, "Failed to create a window surface");
            }
        }

        let mut surfaces: Vec<&PresentationSurface> = Vec::new();

        #[cfg(feature = "window")]
        surfaces.extend(window.as_ref().and_then(|window| window.surface()));

        surfaces.extend(headless.as_ref());

        capture_with_surfaces(&instance, api_version, instance_extensions, layers, &surfaces)
    }
}

fn capture_with_surfaces(
    instance: &Instance,
    api_version: Version,
    instance_extensions: Vec<ExtensionProperties>,
    layers: Vec<LayerExtensions>,
    surfaces: &[&PresentationSurface],
) -> Result<Snapshot, ReportError> {
    let physical_devices = unsafe { instance.handle().enumerate_physical_devices()? };

    let layer_names: Vec<String> = (layers.iter())
        .filter_map(|layer| layer.properties.name.clone())
        .collect();

    let gpus = (physical_devices.iter().enumerate())
        .map(|(id, &physical_device)| {
            instance.capture_gpu(id, physical_device, &layer_names, |family| {
                (surfaces.iter())
                    .map(|surface| {
                        let supported = surface.supports_present(physical_device, family);
                        (surface.backend().to_owned(), supported)
                    })
                    .collect()
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut surface_infos = Vec::new();

    for surface in surfaces {
        for (gpu, &physical_device) in gpus.iter().zip(&physical_devices) {
            match surface.capture(gpu.id, physical_device, &gpu.chain_context) {
                Ok(info) => surface_infos.push(info),
                Err(error) => tracing::warn!(
                    backend = surface.backend(),
                    gpu = gpu.id,
                    %error,
                    "Failed to query surface",
                ),
            }
        }
    }

    let device_groups = instance.capture_device_groups(&physical_devices)?;

    Ok(Snapshot {
        api_version,
        instance_extensions,
        layers,
        surface_backends: surfaces.iter().map(|s| s.backend().to_owned()).collect(),
        surfaces: surface_infos,
        device_groups,
        gpus,
    })
}
