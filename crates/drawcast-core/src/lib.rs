pub mod draw;
pub mod predict;

pub use draw::{DrawResult, NumberSeries, PeriodError, Verdict, next_period};
pub use predict::{Calculation, Prediction, Trace, predict};
