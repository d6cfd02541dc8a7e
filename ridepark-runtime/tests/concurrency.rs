//! Concurrent use of one `Park` from many threads.


use std::sync::Arc;
use std::thread;

use park_support::{TestPark, add_crowd, empty_park, ride, sample_park, visitor};
use ridepark_core::test_support::{sample_rides, sample_walkways};
use ridepark_core::{EngineError, TicketType};
use ridepark_runtime::ParkConfig;
use rstest::rstest;

const THREADS: u32 = 8;
const ROUNDS: u32 = 200;

fn assert_send_sync<T: Send + Sync>() {}

#[rstest]
fn park_is_send_and_sync() {
    assert_send_sync::<TestPark>();
}

/// Sample rides and walkways with `THREADS` visitors per ticket type.
fn crowded_park() -> TestPark {
    let park = empty_park(ParkConfig {
        history_bound: 10_000,
        ..ParkConfig::default()
    });
    for spec in sample_rides() {
        park.add_ride(spec).expect("sample ride");
    }
    for edge in sample_walkways() {
        park.connect(edge.from, edge.to, edge.distance).expect("walkway");
    }
    add_crowd(&park, 2001, THREADS, TicketType::Normal);
    add_crowd(&park, 3001, THREADS, TicketType::Premium);
    park
}

#[rstest]
fn concurrent_rides_and_undos_keep_counts_consistent() {
    let park = Arc::new(crowded_park());
    let handles: Vec<_> = (0..THREADS)
        .map(|worker| {
            let park = Arc::clone(&park);
            thread::spawn(move || {
                let guests = [visitor(2001 + worker), visitor(3001 + worker)];
                for round in 0..ROUNDS {
                    let target = ride(1 + (worker + round).rem_euclid(5));
                    let guest = if round.is_multiple_of(2) { guests[0] } else { guests[1] };
                    match round.rem_euclid(4) {
                        0 => {
                            park.enqueue(target, guest).ok();
                        }
                        1 => {
                            park.dequeue_batch(target).ok();
                        }
                        _ => {}
                    }
                    if park.experience(target, guest).is_ok() && round.is_multiple_of(3) {
                        park.undo(guest).expect("just rode");
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker panicked");
    }

    let served: u64 = park.rides().iter().map(|summary| summary.visitors_served).sum();
    let completed: u64 = park
        .visitors()
        .iter()
        .map(|summary| u64::from(summary.rides_completed))
        .sum();
    assert_eq!(served, completed);
    for summary in park.visitors() {
        assert_eq!(
            u32::try_from(summary.history_len).expect("small history"),
            summary.rides_completed
        );
        assert!((0.0..=100.0).contains(&summary.satisfaction));
    }
}

#[rstest]
fn stats_never_observe_a_half_committed_ride() {
    let park = Arc::new(crowded_park());
    let riders: Vec<_> = (0..THREADS)
        .map(|worker| {
            let park = Arc::clone(&park);
            thread::spawn(move || {
                let guest = visitor(2001 + worker);
                let mut kept = 0_u64;
                for round in 0..ROUNDS {
                    let target = ride(1 + (worker + round).rem_euclid(5));
                    park.experience(target, guest).expect("open ride");
                    if round.is_multiple_of(2) {
                        park.undo(guest).expect("just rode");
                    } else {
                        kept += 1;
                    }
                }
                kept
            })
        })
        .collect();
    let sampler = {
        let park = Arc::clone(&park);
        thread::spawn(move || {
            for _ in 0..ROUNDS {
                let stats = park.stats();
                let served: u64 = stats.top_rides.iter().map(|usage| usage.visitors_served).sum();
                assert_eq!(served, stats.rides_completed);
            }
        })
    };
    let kept: u64 = riders
        .into_iter()
        .map(|handle| handle.join().expect("rider panicked"))
        .sum();
    sampler.join().expect("sampler saw a torn report");
    assert_eq!(park.stats().rides_completed, kept);
}

#[rstest]
fn toggling_while_queueing_never_leaves_closed_rides_queued() {
    let park = Arc::new(crowded_park());
    let toggler = {
        let park = Arc::clone(&park);
        thread::spawn(move || {
            for _ in 0..ROUNDS {
                park.toggle_operational(ride(2)).expect("known ride");
            }
        })
    };
    let queuers: Vec<_> = (0..THREADS)
        .map(|worker| {
            let park = Arc::clone(&park);
            thread::spawn(move || {
                let guest = visitor(2001 + worker);
                for _ in 0..ROUNDS {
                    match park.enqueue(ride(2), guest) {
                        Ok(_) | Err(EngineError::RideClosed { .. } | EngineError::InvalidInput { .. }) => {}
                        Err(other) => panic!("unexpected error: {other}"),
                    }
                    park.dequeue_batch(ride(2)).ok();
                }
            })
        })
        .collect();
    toggler.join().expect("toggler panicked");
    for handle in queuers {
        handle.join().expect("queuer panicked");
    }

    let snapshot = park
        .queues()
        .into_iter()
        .find(|queue| queue.ride_id == ride(2))
        .expect("ride 2 listed");
    // An even number of toggles leaves the ride open.
    assert!(snapshot.is_operational);
    let listed = park
        .rides_by_wait_time()
        .into_iter()
        .find(|entry| entry.ride_id == ride(2))
        .expect("open ride indexed");
    assert_eq!(listed.wait_time, snapshot.wait_time);
}

#[rstest]
fn removals_race_with_operations_without_panicking() {
    let park = Arc::new(sample_park());
    let remover = {
        let park = Arc::clone(&park);
        thread::spawn(move || {
            park.remove_ride(ride(3)).expect("ride 3 present");
            park.remove_visitor(visitor(1002)).expect("Grace present");
        })
    };
    let workers: Vec<_> = [1001_u32, 1002, 1003]
        .into_iter()
        .map(|raw| {
            let park = Arc::clone(&park);
            thread::spawn(move || {
                for _ in 0..ROUNDS {
                    park.enqueue(ride(3), visitor(raw)).ok();
                    park.experience(ride(3), visitor(raw)).ok();
                    park.undo(visitor(raw)).ok();
                    park.suggest(visitor(raw)).ok();
                    park.find_path(ride(1), ride(5)).ok();
                }
            })
        })
        .collect();
    remover.join().expect("remover panicked");
    for handle in workers {
        handle.join().expect("worker panicked");
    }

    assert!(park.rides().iter().all(|summary| summary.ride_id != ride(3)));
    assert!(park.rides_by_wait_time().iter().all(|entry| entry.ride_id != ride(3)));
    assert_eq!(park.visitors().len(), 2);
    assert_eq!(park.find_path(ride(1), ride(3)), Err(EngineError::ride_not_found(ride(3))));
}
