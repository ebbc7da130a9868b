//! Morph Camera - orbit camera, pointer probe and framing
//!
//! - `Camera` - perspective orbit camera with auto-rotation and NDC rays
//! - `InteractionProbe` - maps the pointer to a world point on a fixed plane
//! - `CameraFramer` - fits the camera to the model and runs camera transitions

pub mod camera;
pub mod framer;
pub mod probe;

pub use camera::{Camera, CameraPose, Ray};
pub use framer::{
    frame_target, framing_distance, named_view, CameraFramer, CameraTransitionPlan, NamedView,
    FRAMING_MARGIN, TRANSITION_SECONDS,
};
pub use probe::InteractionProbe;
