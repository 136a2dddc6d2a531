//! Themes: discovery, descriptors, template helpers and rendering.

pub mod descriptor;
pub mod helpers;
pub mod registry;
pub mod renderer;

pub use descriptor::{AssetSpec, TemplateSpec, ThemeDescriptor, DESCRIPTOR_FILE};
pub use helpers::HelperTable;
pub use registry::{TemplateSource, Theme, ThemeRegistry, ThemeTemplates};
pub use renderer::{Renderer, TeraRenderer};
