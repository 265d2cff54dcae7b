use mockall::automock;

/// Time source seam.  Everything that stamps `created` timestamps or needs
/// "today" goes through this so tests can pin the clock.
#[automock]
pub trait ClockService {
    fn time_now(&self) -> time::Time;
    fn date_now(&self) -> time::Date;
    fn date_time_now(&self) -> time::PrimitiveDateTime;
}
