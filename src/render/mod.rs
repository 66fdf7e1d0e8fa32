pub mod frame;
pub mod marcher;
pub mod settings;
pub mod shading;
pub mod validation;
pub mod view;
pub mod volumetric;

pub use frame::{render_frame, FrameStats};
pub use marcher::{HitRecord, MarchOutcome};
pub use settings::{MarchTuning, RenderSettings};
pub use validation::{cpu_capabilities, validate_scene_against_capabilities};
pub use view::View;
pub use volumetric::VolumeSample;
