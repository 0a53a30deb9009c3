pub mod renderer;
pub mod signup;
pub mod templates;

pub use renderer::Renderer;
