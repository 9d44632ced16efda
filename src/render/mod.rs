pub mod scene;

pub use scene::{build_scene, SceneNode};
