//! End-to-end tests for `Park` operations over the sample layout.


use park_support::{TestPark, add_crowd, add_ride, level, ride, sample_park, visitor};
use ridepark_core::{
    EngineError, EntityKind, Lane, NewRide, NewVisitor, RideId, TicketType,
};
use rstest::{fixture, rstest};

const ADA: u32 = 1001;
const GRACE: u32 = 1002;
const LINUS: u32 = 1003;

#[fixture]
fn park() -> TestPark {
    sample_park()
}

fn wait_of(park: &TestPark, ride_id: RideId) -> Option<u32> {
    park.rides_by_wait_time()
        .into_iter()
        .find(|entry| entry.ride_id == ride_id)
        .map(|entry| entry.wait_time)
}

#[rstest]
fn sample_layout_is_registered(park: TestPark) {
    assert_eq!(park.rides().len(), 5);
    assert_eq!(park.visitors().len(), 3);
    let ada = park
        .visitors()
        .into_iter()
        .find(|summary| summary.visitor_id == visitor(ADA))
        .expect("Ada registered");
    assert_eq!(ada.satisfaction, 50.0);
    assert_eq!(ada.rides_completed, 0);
    assert_eq!(ada.location, None);
}

#[rstest]
fn duplicate_ids_are_rejected(park: TestPark) {
    let ride_err = park
        .add_ride(NewRide::new(ride(1), "Second Loop", level(4), 8))
        .expect_err("ride 1 exists");
    assert_eq!(ride_err, EngineError::Duplicate { kind: EntityKind::Ride, id: 1 });

    let visitor_err = park
        .add_visitor(NewVisitor::new(ADA, "Other Ada", level(4), TicketType::Normal))
        .expect_err("visitor 1001 exists");
    assert_eq!(visitor_err, EngineError::Duplicate { kind: EntityKind::Visitor, id: ADA });
}

#[rstest]
#[case(0)]
#[case(999)]
fn reserved_visitor_ids_are_rejected(park: TestPark, #[case] raw: u32) {
    let err = park
        .add_visitor(NewVisitor::new(raw, "Early Bird", level(5), TicketType::Normal))
        .expect_err("reserved id");
    assert_eq!(err, EngineError::InvalidId { raw });
}

#[rstest]
fn zero_capacity_ride_is_rejected(park: TestPark) {
    let err = park
        .add_ride(NewRide::new(ride(9), "Broken", level(5), 0))
        .expect_err("zero capacity");
    assert!(matches!(err, EngineError::InvalidInput { field: "capacity", .. }));
}

#[rstest]
fn enqueue_uses_the_ticket_lane(park: TestPark) {
    let premium = park.enqueue(ride(1), visitor(ADA)).expect("enqueue Ada");
    assert_eq!(premium.lane, Lane::Premium);
    let regular = park.enqueue(ride(1), visitor(GRACE)).expect("enqueue Grace");
    assert_eq!(regular.lane, Lane::Regular);
    assert_eq!(regular.wait_time, 7);
    assert_eq!(wait_of(&park, ride(1)), Some(7));
}

#[rstest]
fn enqueue_rejects_unknown_closed_and_repeated(park: TestPark) {
    assert_eq!(
        park.enqueue(ride(42), visitor(ADA)),
        Err(EngineError::ride_not_found(ride(42)))
    );
    assert_eq!(
        park.enqueue(ride(1), visitor(4242)),
        Err(EngineError::visitor_not_found(visitor(4242)))
    );

    park.enqueue(ride(2), visitor(GRACE)).expect("first place");
    assert!(matches!(
        park.enqueue(ride(2), visitor(GRACE)),
        Err(EngineError::InvalidInput { .. })
    ));

    park.toggle_operational(ride(3)).expect("close carousel");
    assert_eq!(
        park.enqueue(ride(3), visitor(GRACE)),
        Err(EngineError::RideClosed { ride: ride(3) })
    );
}

#[rstest]
fn closing_a_ride_drains_both_lanes(park: TestPark) {
    let regular = add_crowd(&park, 2001, 5, TicketType::Normal);
    let premium = add_crowd(&park, 3001, 2, TicketType::Premium);
    for id in regular.iter().chain(&premium) {
        park.enqueue(ride(4), *id).expect("enqueue");
    }
    assert_eq!(wait_of(&park, ride(4)), Some(7));

    let closed = park.toggle_operational(ride(4)).expect("close");
    assert!(!closed.is_operational);
    assert_eq!(closed.evicted, 7);
    let snapshot = park
        .queues()
        .into_iter()
        .find(|queue| queue.ride_id == ride(4))
        .expect("ride 4 listed");
    assert_eq!((snapshot.regular_size, snapshot.premium_size), (0, 0));
    assert_eq!(wait_of(&park, ride(4)), None);

    let reopened = park.toggle_operational(ride(4)).expect("reopen");
    assert!(reopened.is_operational);
    assert_eq!(reopened.evicted, 0);
    assert_eq!(wait_of(&park, ride(4)), Some(0));
}

#[rstest]
fn dispatch_holds_a_regular_seat(park: TestPark) {
    let small = add_ride(&park, 6, "Twin Swing", 4, 2);
    let premium = add_crowd(&park, 3001, 3, TicketType::Premium);
    let regular = add_crowd(&park, 2001, 1, TicketType::Normal);
    for id in premium.iter().chain(&regular) {
        park.enqueue(small, *id).expect("enqueue");
    }

    let batch = park.dequeue_batch(small).expect("dispatch");
    assert_eq!(batch.admitted.premium, premium[..1]);
    assert_eq!(batch.admitted.regular, regular);
    assert_eq!(batch.wait_time, 7);
}

#[rstest]
fn dispatch_rejects_closed_rides(park: TestPark) {
    park.toggle_operational(ride(5)).expect("close");
    assert_eq!(park.dequeue_batch(ride(5)), Err(EngineError::RideClosed { ride: ride(5) }));
    assert_eq!(park.dequeue_batch(ride(77)), Err(EngineError::ride_not_found(ride(77))));
}

#[rstest]
fn experience_updates_visitor_and_ride(park: TestPark) {
    let first = park.experience(ride(4), visitor(ADA)).expect("Sky Drop");
    assert_eq!(first.message, "Ride completed!");
    assert_eq!(first.thrill_match, 10);
    assert_eq!(first.satisfaction, 70.0);
    assert_eq!(first.distance_delta, 0);

    let second = park.experience(ride(1), visitor(ADA)).expect("Thunder Loop");
    assert_eq!(second.thrill_match, 9);
    assert_eq!(second.satisfaction, 88.0);
    assert_eq!(second.distance_delta, 150);

    let ada = park
        .visitors()
        .into_iter()
        .find(|summary| summary.visitor_id == visitor(ADA))
        .expect("Ada registered");
    assert_eq!(ada.rides_completed, 2);
    assert_eq!(ada.total_distance, 150);
    assert_eq!(ada.location, Some(ride(1)));

    let served: Vec<u64> = park.rides().iter().map(|summary| summary.visitors_served).collect();
    assert_eq!(served, vec![1, 0, 0, 1, 0]);
}

#[rstest]
fn experience_clamps_satisfaction_and_undo_is_exact(park: TestPark) {
    park.experience(ride(4), visitor(ADA)).expect("first");
    park.experience(ride(1), visitor(ADA)).expect("second");
    let before = park.visitors();

    let capped = park.experience(ride(4), visitor(ADA)).expect("third");
    assert_eq!(capped.satisfaction, 100.0);
    assert_eq!(capped.satisfaction_delta, 12.0);

    let undone = park.undo(visitor(ADA)).expect("undo");
    assert_eq!(undone.ride_id, ride(4));
    assert_eq!(undone.satisfaction, 88.0);
    assert_eq!(park.visitors(), before);
}

#[rstest]
fn undo_restores_the_starting_state(park: TestPark) {
    let visitors_before = park.visitors();
    let rides_before = park.rides();

    park.experience(ride(3), visitor(GRACE)).expect("experience");
    park.undo(visitor(GRACE)).expect("undo");

    assert_eq!(park.visitors(), visitors_before);
    assert_eq!(park.rides(), rides_before);
    assert_eq!(
        park.undo(visitor(GRACE)),
        Err(EngineError::NoHistory { visitor: visitor(GRACE) })
    );
}

#[rstest]
fn experience_leaves_queues_alone(park: TestPark) {
    park.enqueue(ride(2), visitor(LINUS)).expect("enqueue");
    let outcome = park.experience(ride(2), visitor(LINUS)).expect("experience");
    assert_eq!(outcome.observed_wait, 7);
    assert_eq!(wait_of(&park, ride(2)), Some(7));
}

#[rstest]
fn experience_checks_existence_before_status(park: TestPark) {
    park.toggle_operational(ride(1)).expect("close");
    assert_eq!(
        park.experience(ride(1), visitor(4242)),
        Err(EngineError::visitor_not_found(visitor(4242)))
    );
    assert_eq!(
        park.experience(ride(1), visitor(ADA)),
        Err(EngineError::RideClosed { ride: ride(1) })
    );
    assert_eq!(park.history(visitor(ADA)).map(|records| records.len()), Ok(0));
}

#[rstest]
fn history_lists_most_recent_first(park: TestPark) {
    park.experience(ride(1), visitor(LINUS)).expect("first");
    park.clock().advance(600);
    park.experience(ride(5), visitor(LINUS)).expect("second");

    let history = park.history(visitor(LINUS)).expect("history");
    let names: Vec<&str> = history.iter().map(|record| record.ride_name.as_str()).collect();
    assert_eq!(names, ["Teacup Spin", "Thunder Loop"]);
    assert_eq!(history[0].distance_delta, 330);
    assert_eq!((history[0].timestamp - history[1].timestamp).num_seconds(), 600);
    assert_eq!(park.was_recently_ridden(visitor(LINUS), ride(1)), Ok(true));
    assert_eq!(park.was_recently_ridden(visitor(LINUS), ride(2)), Ok(false));
}

#[rstest]
fn suggestions_skip_closed_rides(park: TestPark) {
    park.toggle_operational(ride(4)).expect("close Sky Drop");
    let suggestions = park.suggest(visitor(ADA)).expect("suggest");
    assert_eq!(suggestions.len(), 4);
    assert!(suggestions.iter().all(|suggestion| suggestion.ride_id != ride(4)));
    assert_eq!(suggestions[0].ride_id, ride(1));
}

#[rstest]
fn close_thrill_match_beats_long_queue() {
    let park = park_support::empty_park(ridepark_runtime::ParkConfig::default());
    let thrilling = add_ride(&park, 1, "Ride A", 8, 1);
    let gentle = add_ride(&park, 2, "Ride B", 2, 1);
    park.add_visitor(NewVisitor::new(ADA, "Ada", level(8), TicketType::Normal))
        .expect("Ada");
    for id in add_crowd(&park, 2001, 6, TicketType::Normal) {
        park.enqueue(thrilling, id).expect("enqueue A");
    }
    for id in add_crowd(&park, 3001, 1, TicketType::Normal) {
        park.enqueue(gentle, id).expect("enqueue B");
    }

    let suggestions = park.suggest(visitor(ADA)).expect("suggest");
    let order: Vec<RideId> = suggestions.iter().map(|suggestion| suggestion.ride_id).collect();
    assert_eq!(order, [thrilling, gentle]);
    assert_eq!(suggestions[0].wait_time, 42);
    assert_eq!(suggestions[1].wait_time, 7);
}

#[rstest]
fn thrill_match_still_wins_against_a_very_long_queue() {
    let park = park_support::empty_park(ridepark_runtime::ParkConfig::default());
    let thrilling = add_ride(&park, 1, "Ride A", 8, 4);
    let gentle = add_ride(&park, 2, "Ride B", 2, 4);
    park.add_visitor(NewVisitor::new(ADA, "Ada", level(8), TicketType::Normal))
        .expect("Ada");
    for id in add_crowd(&park, 2001, 280, TicketType::Normal) {
        park.enqueue(thrilling, id).expect("enqueue A");
    }

    let suggestions = park.suggest(visitor(ADA)).expect("suggest");
    let order: Vec<RideId> = suggestions.iter().map(|suggestion| suggestion.ride_id).collect();
    assert_eq!(order, [thrilling, gentle]);
    assert_eq!(suggestions[0].wait_time, 490);
    assert_eq!(suggestions[1].wait_time, 0);
    assert!(suggestions[0].priority_score > suggestions[1].priority_score);
}

#[rstest]
fn suggestions_flag_recent_rides(park: TestPark) {
    park.experience(ride(4), visitor(ADA)).expect("experience");
    let suggestions = park.suggest(visitor(ADA)).expect("suggest");
    let sky_drop = suggestions
        .iter()
        .find(|suggestion| suggestion.ride_id == ride(4))
        .expect("Sky Drop suggested");
    assert!(sky_drop.recently_ridden);
    assert!(
        suggestions
            .iter()
            .filter(|suggestion| suggestion.ride_id != ride(4))
            .all(|suggestion| !suggestion.recently_ridden)
    );
}

#[rstest]
fn rides_by_wait_time_orders_by_wait_then_id(park: TestPark) {
    park.enqueue(ride(5), visitor(ADA)).expect("enqueue");
    park.enqueue(ride(2), visitor(GRACE)).expect("enqueue");
    let order: Vec<u32> = park
        .rides_by_wait_time()
        .iter()
        .map(|entry| entry.ride_id.get())
        .collect();
    assert_eq!(order, [1, 3, 4, 2, 5]);
}

#[rstest]
fn rides_with_wait_filters_an_inclusive_range(park: TestPark) {
    park.enqueue(ride(5), visitor(ADA)).expect("enqueue");
    park.enqueue(ride(2), visitor(GRACE)).expect("enqueue");
    let ids = |entries: Vec<ridepark_runtime::WaitTimeEntry>| -> Vec<u32> {
        entries.iter().map(|entry| entry.ride_id.get()).collect()
    };

    assert_eq!(ids(park.rides_with_wait(0..=0)), [1, 3, 4]);
    assert_eq!(ids(park.rides_with_wait(1..=7)), [2, 5]);
    assert_eq!(ids(park.rides_with_wait(0..=7)), [1, 3, 4, 2, 5]);
    assert!(park.rides_with_wait(8..=600).is_empty());

    park.toggle_operational(ride(2)).expect("close Log Flume");
    assert_eq!(ids(park.rides_with_wait(1..=7)), [5]);
}

#[rstest]
fn shortest_wait_ride_skips_closed_rides(park: TestPark) {
    assert_eq!(park.shortest_wait_ride().map(|entry| entry.ride_id), Some(ride(1)));
    park.toggle_operational(ride(1)).expect("close Thunder Loop");
    assert_eq!(park.shortest_wait_ride().map(|entry| entry.ride_id), Some(ride(3)));

    let empty = park_support::empty_park(ridepark_runtime::ParkConfig::default());
    assert!(empty.shortest_wait_ride().is_none());
}

#[rstest]
fn find_path_reports_each_stop(park: TestPark) {
    let report = park.find_path(ride(1), ride(5)).expect("path");
    let stops: Vec<(&str, u32, u64)> = report
        .path
        .iter()
        .map(|stop| (stop.name.as_str(), stop.distance, stop.cumulative_distance))
        .collect();
    assert_eq!(
        stops,
        [
            ("Thunder Loop", 0, 0),
            ("Log Flume", 120, 120),
            ("Carousel", 90, 210),
            ("Teacup Spin", 120, 330),
        ]
    );
    assert_eq!(report.total_distance, 330);
}

#[rstest]
fn find_path_edge_cases(park: TestPark) {
    let own = park.find_path(ride(3), ride(3)).expect("self path");
    assert_eq!(own.path.len(), 1);
    assert_eq!(own.total_distance, 0);

    add_ride(&park, 9, "Far Field", 1, 4);
    assert_eq!(
        park.find_path(ride(1), ride(9)),
        Err(EngineError::NoPath { from: ride(1), to: ride(9) })
    );
    assert_eq!(park.find_path(ride(1), ride(99)), Err(EngineError::ride_not_found(ride(99))));
}

#[rstest]
fn disconnect_reroutes_walks(park: TestPark) {
    assert_eq!(park.disconnect(ride(2), ride(3)), Ok(true));
    assert_eq!(park.disconnect(ride(2), ride(3)), Ok(false));
    assert_eq!(park.find_path(ride(1), ride(5)).map(|path| path.total_distance), Ok(380));
    assert_eq!(park.disconnect(ride(2), ride(99)), Err(EngineError::ride_not_found(ride(99))));
}

#[rstest]
fn unroutable_walks_add_no_distance(park: TestPark) {
    let island = add_ride(&park, 9, "Far Field", 8, 4);
    park.experience(ride(1), visitor(ADA)).expect("first");
    let outcome = park.experience(island, visitor(ADA)).expect("second");
    assert_eq!(outcome.distance_delta, 0);
}

#[rstest]
fn removing_a_ride_keeps_history(park: TestPark) {
    park.enqueue(ride(4), visitor(GRACE)).expect("enqueue");
    park.experience(ride(4), visitor(ADA)).expect("experience");

    let removed = park.remove_ride(ride(4)).expect("remove");
    assert_eq!(removed.name, "Sky Drop");
    assert_eq!(removed.evicted, 1);
    assert_eq!(park.rides().len(), 4);
    assert_eq!(wait_of(&park, ride(4)), None);
    assert_eq!(park.find_path(ride(1), ride(4)), Err(EngineError::ride_not_found(ride(4))));
    assert_eq!(park.enqueue(ride(4), visitor(GRACE)), Err(EngineError::ride_not_found(ride(4))));

    let undone = park.undo(visitor(ADA)).expect("undo after removal");
    assert_eq!(undone.ride_name, "Sky Drop");
    assert_eq!(undone.satisfaction, 50.0);
    assert_eq!(park.remove_ride(ride(4)), Err(EngineError::ride_not_found(ride(4))));
}

#[rstest]
fn undo_spares_a_ride_re_added_under_the_same_id(park: TestPark) {
    park.experience(ride(4), visitor(ADA)).expect("ride the original");
    park.remove_ride(ride(4)).expect("remove");
    add_ride(&park, 4, "New Drop", 9, 8);
    park.experience(ride(4), visitor(GRACE)).expect("ride the replacement");

    let undone = park.undo(visitor(ADA)).expect("undo the original ride");
    assert_eq!(undone.ride_name, "Sky Drop");
    let replacement = park
        .rides()
        .into_iter()
        .find(|summary| summary.ride_id == ride(4))
        .expect("replacement registered");
    assert_eq!(replacement.visitors_served, 1);

    let undone = park.undo(visitor(GRACE)).expect("undo the replacement ride");
    assert_eq!(undone.ride_name, "New Drop");
    let served: u64 = park.rides().iter().map(|summary| summary.visitors_served).sum();
    assert_eq!(served, 0);
}

#[rstest]
fn removing_a_visitor_releases_queue_places(park: TestPark) {
    park.enqueue(ride(1), visitor(LINUS)).expect("enqueue 1");
    park.enqueue(ride(2), visitor(LINUS)).expect("enqueue 2");

    let removed = park.remove_visitor(visitor(LINUS)).expect("remove");
    assert_eq!(removed.released_places, 2);
    assert_eq!(wait_of(&park, ride(1)), Some(0));
    assert_eq!(wait_of(&park, ride(2)), Some(0));
    assert_eq!(
        park.history(visitor(LINUS)),
        Err(EngineError::visitor_not_found(visitor(LINUS)))
    );
}

#[rstest]
fn stats_summarise_the_park(park: TestPark) {
    park.experience(ride(4), visitor(ADA)).expect("first");
    park.experience(ride(1), visitor(ADA)).expect("second");
    park.experience(ride(4), visitor(GRACE)).expect("third");
    park.enqueue(ride(2), visitor(LINUS)).expect("enqueue");
    park.toggle_operational(ride(3)).expect("close");

    let stats = park.stats();
    assert_eq!(stats.total_visitors, 3);
    assert_eq!(stats.premium_visitors, 1);
    assert_eq!(stats.total_rides, 5);
    assert_eq!(stats.active_rides, 4);
    assert_eq!(stats.total_capacity, 92);
    assert_eq!(stats.total_distance, 150);
    assert_eq!(stats.rides_completed, 3);
    assert_eq!(stats.average_wait_time, 1.75);
    let top: Vec<(u32, u64)> = stats
        .top_rides
        .iter()
        .map(|usage| (usage.ride_id.get(), usage.visitors_served))
        .collect();
    assert_eq!(top, [(4, 2), (1, 1), (2, 0), (3, 0), (5, 0)]);
}

#[rstest]
fn empty_park_stats_are_zero() {
    let stats = park_support::empty_park(ridepark_runtime::ParkConfig::default()).stats();
    assert_eq!(stats.total_visitors, 0);
    assert_eq!(stats.premium_ratio, 0.0);
    assert_eq!(stats.average_satisfaction, 0.0);
    assert_eq!(stats.average_wait_time, 0.0);
    assert!(stats.top_rides.is_empty());
}

#[rstest]
fn reports_serialise_with_snake_case_fields(park: TestPark) {
    let outcome = park.experience(ride(2), visitor(GRACE)).expect("experience");
    let json = serde_json::to_value(&outcome).expect("serialise outcome");
    assert_eq!(json["message"], "Ride completed!");
    assert_eq!(json["ride_name"], "Log Flume");
    assert_eq!(json["visitor_id"], GRACE);
}
