use visual_core::Clock;

/// Local wall-clock hour from the browser's `Date`.
pub struct WallClock;

impl Clock for WallClock {
    fn local_hour(&self) -> u32 {
        js_sys::Date::new_0().get_hours()
    }
}
