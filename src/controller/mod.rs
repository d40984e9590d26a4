pub mod course;
pub mod profile;
pub mod round;

pub use round::RoundHandle;
