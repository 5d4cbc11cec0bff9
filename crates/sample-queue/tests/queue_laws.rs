//! Property tests for the FIFO and drop-oldest laws.

use proptest::prelude::*;
use sample_queue::{Sample, SampleQueue};

fn arb_sample() -> impl Strategy<Value = Sample> {
    (any::<i16>(), any::<i16>(), any::<i16>()).prop_map(|(x, y, z)| Sample::new(x, y, z))
}

proptest! {
    /// With at most `capacity` pushes, pops return samples in push order.
    #[test]
    fn fifo_law(samples in proptest::collection::vec(arb_sample(), 0..=16)) {
        let mut queue = SampleQueue::new(16);
        for &s in &samples {
            prop_assert!(queue.push(s).is_none());
        }
        for &s in &samples {
            prop_assert_eq!(queue.pop(), Some(s));
        }
        prop_assert_eq!(queue.pop(), None);
    }

    /// With more pushes than capacity, the queue holds exactly the last
    /// `capacity` samples, oldest first, and evictions come out in push order.
    #[test]
    fn drop_oldest_law(
        samples in proptest::collection::vec(arb_sample(), 17..=64),
        capacity in 1usize..=16,
    ) {
        let mut queue = SampleQueue::new(capacity);
        let mut evicted = Vec::new();
        for &s in &samples {
            if let Some(old) = queue.push(s) {
                evicted.push(old);
            }
        }
        prop_assert_eq!(queue.len(), capacity);

        let cut = samples.len() - capacity;
        prop_assert_eq!(&evicted[..], &samples[..cut]);
        for &s in &samples[cut..] {
            prop_assert_eq!(queue.pop(), Some(s));
        }
        prop_assert!(queue.is_empty());
    }
}
