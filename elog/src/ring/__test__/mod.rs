#[cfg(test)]
mod __test__ {
    use crate::ring::{EventRecord, EventRing};

    fn rec(t: u64) -> EventRecord {
        EventRecord {
            time: t as f64,
            ..Default::default()
        }
    }

    #[test]
    fn capacity_rounds_up_to_power_of_two() {
        let ring = EventRing::new(5);
        assert_eq!(ring.capacity(), 8);
    }

    #[test]
    fn zero_capacity_is_a_legal_no_op_sink() {
        let mut ring = EventRing::new(0);
        assert_eq!(ring.capacity(), 0);
        ring.emit(rec(1), u64::MAX);
        assert_eq!(ring.n_total_events(), 0);
        assert!(ring.peek().is_empty());
    }

    #[test]
    fn peek_returns_all_events_before_wraparound() {
        let mut ring = EventRing::new(4);
        for i in 0..3 {
            ring.emit(rec(i), u64::MAX);
        }
        let times: Vec<f64> = ring.peek().iter().map(|r| r.time).collect();
        assert_eq!(times, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn overflow_silently_overwrites_oldest_slot() {
        let mut ring = EventRing::new(4);
        for i in 0..6 {
            ring.emit(rec(i), u64::MAX);
        }
        let times: Vec<f64> = ring.peek().iter().map(|r| r.time).collect();
        assert_eq!(times, vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn disable_limit_boundary_event_is_recorded_next_is_dropped() {
        let mut ring = EventRing::new(8);
        for i in 0..3 {
            ring.emit(rec(i), 2);
        }
        assert_eq!(ring.n_total_events(), 2);
        let times: Vec<f64> = ring.peek().iter().map(|r| r.time).collect();
        assert_eq!(times, vec![0.0, 1.0]);
    }

    #[test]
    fn disable_limit_zero_records_nothing() {
        let mut ring = EventRing::new(8);
        ring.emit(rec(0), 0);
        assert_eq!(ring.n_total_events(), 0);
        assert!(ring.peek().is_empty());
    }
}
