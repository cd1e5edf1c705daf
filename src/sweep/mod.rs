pub mod clock;
pub mod scheduler;
pub mod sweep_service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use scheduler::start_daily_sweep_scheduler;
pub use sweep_service::{SweepOutcome, SweepService};
