use flock_shared::{Frame, Point, TickInput};

/// The host that feeds a [`Simulation`](crate::Simulation) and draws its output.
///
/// Windowing and frame pacing live behind this trait.
pub trait DisplayAdapter {
    /// Width and height of the world; positions wrap at these bounds
    fn world_size(&self) -> (f32, f32);

    /// Uniformly random position inside the world, used when seeding boids
    fn random_position(&mut self) -> Point;

    /// Input gathered since the previous tick. May block for frame pacing.
    fn poll_input(&mut self) -> TickInput;

    fn present(&mut self, frame: &Frame);
}
