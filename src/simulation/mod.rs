pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod geometry;
pub mod descent;
pub mod ascent;
pub mod scenario;
