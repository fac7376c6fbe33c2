#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::FrameClock;

    #[test]
    fn test_whole_ticks_are_counted() {
        let mut clock = FrameClock::new(0.125);
        assert!((clock.step_seconds() - 0.125).abs() < 1e-6);
        assert_eq!(clock.until_next_step(), Duration::from_millis(125));

        assert_eq!(clock.advance(Duration::from_millis(300)), 2);
        assert_eq!(clock.until_next_step(), Duration::from_millis(75));

        assert_eq!(clock.advance(Duration::from_millis(80)), 1);
        assert_eq!(clock.until_next_step(), Duration::from_millis(95));
    }

    #[test]
    fn test_long_stall_is_capped() {
        let mut clock = FrameClock::new(0.125);
        assert_eq!(clock.advance(Duration::from_secs(10)), 8);
        // The backlog is dropped rather than replayed
        assert_eq!(clock.until_next_step(), Duration::from_millis(125));
        assert_eq!(clock.advance(Duration::from_millis(10)), 0);
    }
}
