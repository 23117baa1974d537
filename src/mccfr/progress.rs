use std::time::Duration;

/// Something that trains and can say how far along it is.
pub trait Progress {
    /// iterations completed
    fn epoch(&self) -> usize;
    /// game tree nodes visited
    fn nodes(&self) -> usize;
    /// information sets discovered
    fn infos(&self) -> usize;
    /// wall time spent training
    fn elapsed(&self) -> Duration;

    fn throughput(&self) -> f32 {
        match self.elapsed().as_secs_f32() {
            secs if secs > 0. => self.epoch() as f32 / secs,
            _ => 0.,
        }
    }
    fn report(&self) {
        log::info!(
            "{:<32}{:<32}",
            format!("epoch {:>12}", self.epoch()),
            format!("nodes {:>14}", self.nodes())
        );
        log::info!(
            "{:<32}{:<32}",
            format!("infos {:>12}", self.infos()),
            format!("I/sec {:>14.1}", self.throughput())
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(usize, Duration);
    impl Progress for Fixed {
        fn epoch(&self) -> usize {
            self.0
        }
        fn nodes(&self) -> usize {
            self.0 * 10
        }
        fn infos(&self) -> usize {
            self.0 / 2
        }
        fn elapsed(&self) -> Duration {
            self.1
        }
    }

    #[test]
    fn throughput_per_second() {
        assert_eq!(Fixed(500, Duration::from_secs(10)).throughput(), 50.);
        assert_eq!(Fixed(500, Duration::ZERO).throughput(), 0.);
    }
}
