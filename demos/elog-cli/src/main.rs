//! Demonstrates the deployment pattern `elog` is built around: one `Log`
//! per worker thread, no locking between them, combined after the fact.
//!
//! Each worker owns its `Log` for its entire lifetime and hands it off to
//! a collector thread over a channel only once it's done recording —
//! `elog` never shares a `Log` across threads while it's live. The
//! collector merges every log it receives into one, which also aligns
//! each worker's clock against the collector's running one, then
//! round-trips the merged log through the binary envelope to prove the
//! serializer survives a real write-then-read.

use std::io::Cursor;

use crossbeam_channel::bounded;
use elog::codec::ArgValue;
use elog::log::Log;

const WORKER_COUNT: usize = 4;
const EVENTS_PER_WORKER: u32 = 64;
const RING_CAPACITY: usize = 256;

const RESET: &str = "\x1b[0m";
const CYAN: &str = "\x1b[36m";
const YELLOW: &str = "\x1b[33m";

fn worker(id: usize) -> Log {
    let mut log = Log::init(RING_CAPACITY);
    let request_ty = log.register_type("worker %d handled request %d in %fms", Some("handle_request"));
    let track = log.register_track(&format!("worker-{id}"));

    for seq in 0..EVENTS_PER_WORKER {
        // A little jitter so the merged timeline isn't perfectly uniform.
        std::thread::sleep(std::time::Duration::from_micros((seq % 5) as u64));
        let latency_ms = 0.1 * (1 + (seq % 7)) as f64;
        log.emit(
            request_ty,
            track,
            &[ArgValue::U32(id as u32), ArgValue::U32(seq), ArgValue::F64(latency_ms)],
        );
    }
    log
}

fn main() {
    let (tx, rx) = bounded(WORKER_COUNT);

    let handles: Vec<_> = (0..WORKER_COUNT)
        .map(|id| {
            let tx = tx.clone();
            std::thread::spawn(move || {
                let log = worker(id);
                tx.send(log).expect("collector still listening");
            })
        })
        .collect();
    drop(tx);

    let mut collector = Log::init(RING_CAPACITY * WORKER_COUNT);
    for log in rx.iter() {
        collector.merge(&log);
    }
    for h in handles {
        h.join().expect("worker thread panicked");
    }

    println!("{CYAN}merged {} events from {WORKER_COUNT} workers{RESET}", collector.peek().len());

    let mut bytes = Vec::new();
    collector
        .serialize(&mut bytes)
        .expect("serializing a freshly-merged in-memory log never fails");
    println!("{CYAN}serialized to {} bytes{RESET}", bytes.len());

    let reloaded = Log::deserialize(&mut Cursor::new(&bytes)).expect("we just wrote this envelope ourselves");

    for event in reloaded.peek().iter().take(10) {
        println!("{YELLOW}[{:>8.3}] {}{RESET}", event.time, reloaded.format_event(event));
    }
}
