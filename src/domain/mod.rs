pub mod fractal;
pub mod light;
pub mod material;
pub mod node;
pub mod ops;
pub mod presets;
pub mod primitive;
pub mod scene;

pub use fractal::Fractal;
pub use light::{Light, LightKind, LightSample};
pub use material::{Material, MaterialId};
pub use node::{SdfNode, SdfSample};
pub use ops::BooleanOp;
pub use primitive::Primitive;
pub use scene::{CloudLayer, Scene, ShadingOptions};
