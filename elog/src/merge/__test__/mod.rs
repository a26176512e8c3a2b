#[cfg(test)]
mod __test__ {
    use crate::clock::TimeSample;
    use crate::merge::{clock_offset_seconds, merge_sorted, Timestamped};

    #[derive(Debug, Clone, PartialEq)]
    struct Ev(f64);
    impl Timestamped for Ev {
        fn time(&self) -> f64 {
            self.0
        }
        fn set_time(&mut self, t: f64) {
            self.0 = t;
        }
    }

    #[test]
    fn agreeing_rates_and_offsets_prefer_cpu_derived_delta() {
        let dst_init = TimeSample { os_nsec: 1_000_000_000, cpu: 0 };
        // both logs measure 1 ns/cycle, so the cpu-derived dt (1000ns) and
        // the os-derived dt (1_000_001_000 - 1_000_000_000 = 1000ns) agree.
        let src_init = TimeSample { os_nsec: 1_000_001_000, cpu: 1000 };
        let dt = clock_offset_seconds(dst_init, 1.0, src_init, 1.0);
        assert!((dt - 1e-6).abs() < 1e-9);
    }

    #[test]
    fn disagreeing_rates_fall_back_to_os_clock_delta() {
        let dst_init = TimeSample { os_nsec: 0, cpu: 0 };
        let src_init = TimeSample { os_nsec: 5_000, cpu: 1000 };
        // src measures 10 ns/cycle vs dst's 1 ns/cycle: rates disagree, so
        // the os-derived delta (5000ns = 5us) must win regardless of what
        // the cpu-derived estimate would have said.
        let dt = clock_offset_seconds(dst_init, 1.0, src_init, 10.0);
        assert!((dt - 5e-6).abs() < 1e-9);
    }

    #[test]
    fn positive_offset_shifts_src_events_forward() {
        let dst = vec![Ev(0.0), Ev(1.0)];
        let src = vec![Ev(0.0), Ev(0.5)];
        let merged = merge_sorted(dst, src, 10.0);
        let times: Vec<f64> = merged.iter().map(|e| e.0).collect();
        assert_eq!(times, vec![0.0, 1.0, 10.0, 10.5]);
    }

    #[test]
    fn negative_offset_shifts_dst_events_instead() {
        let dst = vec![Ev(0.0), Ev(1.0)];
        let src = vec![Ev(0.0), Ev(0.5)];
        let merged = merge_sorted(dst, src, -10.0);
        let times: Vec<f64> = merged.iter().map(|e| e.0).collect();
        assert_eq!(times, vec![-10.0, -9.0, 0.0, 0.5]);
    }

    #[test]
    fn zero_offset_leaves_both_sides_untouched() {
        let dst = vec![Ev(2.0)];
        let src = vec![Ev(1.0)];
        let merged = merge_sorted(dst, src, 0.0);
        let times: Vec<f64> = merged.iter().map(|e| e.0).collect();
        assert_eq!(times, vec![1.0, 2.0]);
    }
}
