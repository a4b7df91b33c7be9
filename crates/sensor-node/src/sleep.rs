use embassy_time::Duration;
use rand_core::RngCore;

/// Largest value of the halved 8-bit draw.
const JITTER_STEPS: u64 = (u8::MAX / 2) as u64;

/// The deep low-power state that ends every wake cycle.
///
/// On hardware `deep_sleep` never returns: the chip powers down, RAM is lost
/// and the next wake starts from reset.
pub trait DeepSleep {
    fn deep_sleep(&mut self, duration: Duration);
}

impl<P: DeepSleep + ?Sized> DeepSleep for &mut P {
    fn deep_sleep(&mut self, duration: Duration) {
        (**self).deep_sleep(duration)
    }
}

/// `base` plus a random share of `max_jitter`.
///
/// The share comes from the low byte of one draw, halved, so with a
/// `max_jitter` of 127 s the jitter is exactly that many whole seconds. The
/// spread keeps nodes sharing a channel from colliding cycle after cycle.
pub fn sleep_duration<R: RngCore + ?Sized>(
    base: Duration,
    max_jitter: Duration,
    rng: &mut R,
) -> Duration {
    let steps = u64::from(rng.next_u32() as u8 / 2);
    let jitter = Duration::from_millis(max_jitter.as_millis() * steps / JITTER_STEPS);
    base + jitter
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::{impls, Error};

    /// Steps through every 32-bit value by a fixed stride.
    struct Sweep(u32);

    impl RngCore for Sweep {
        fn next_u32(&mut self) -> u32 {
            self.0 = self.0.wrapping_add(0x0101_0101);
            self.0
        }

        fn next_u64(&mut self) -> u64 {
            impls::next_u64_via_u32(self)
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            impls::fill_bytes_via_next(self, dest)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn stays_within_base_and_ceiling() {
        let base = Duration::from_secs(300);
        let max_jitter = Duration::from_secs(127);
        let mut rng = Sweep(0);

        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..512 {
            let sleep = sleep_duration(base, max_jitter, &mut rng);
            assert!(sleep >= base, "{sleep:?}");
            assert!(sleep <= base + max_jitter, "{sleep:?}");
            assert_eq!(sleep.as_millis() % 1000, 0);

            seen_min |= sleep == base;
            seen_max |= sleep == base + max_jitter;
        }
        assert!(seen_min && seen_max);
    }

    #[test]
    fn scales_to_other_ceilings() {
        let base = Duration::from_secs(60);
        let max_jitter = Duration::from_secs(10);
        let mut rng = Sweep(7);

        for _ in 0..256 {
            let sleep = sleep_duration(base, max_jitter, &mut rng);
            assert!(sleep >= base && sleep <= base + max_jitter);
        }

        let sleep = sleep_duration(base, Duration::from_secs(0), &mut rng);
        assert_eq!(sleep, base);
    }
}
