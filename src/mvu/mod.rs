pub mod round;
pub mod runtime;

pub use round::{Deps, Effect, Msg, RoundModel};
pub use runtime::run_round;
