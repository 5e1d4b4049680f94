use std::{
    sync::{Arc, Mutex},
    thread,
};

use crumbs_history::{
    BreadcrumbEvent, BreadcrumbHistory, BreadcrumbListener, Entry, HistoryError, HistoryOptions,
};

type Event = BreadcrumbEvent<&'static str, u32>;

fn recorder(
    history: &BreadcrumbHistory<&'static str, u32>,
) -> (
    Arc<dyn BreadcrumbListener<&'static str, u32>>,
    Arc<Mutex<Vec<Event>>>,
) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let listener: Arc<dyn BreadcrumbListener<&'static str, u32>> =
        Arc::new(move |event: &Event| sink.lock().unwrap().push(event.clone()));

    assert!(history.add_listener(&listener));

    (listener, events)
}

fn changed(
    state: Option<&'static str>,
    value: Option<u32>,
    index: Option<usize>,
    old_state: Option<&'static str>,
    old_value: Option<u32>,
) -> Event {
    BreadcrumbEvent::CurrentChanged {
        state,
        value,
        index,
        old_state,
        old_value,
    }
}

fn added(state: &'static str, value: Option<u32>, index: usize) -> Event {
    BreadcrumbEvent::StateAdded {
        state,
        value,
        index,
    }
}

#[test]
fn push_on_empty_history_sets_current() {
    let history = BreadcrumbHistory::new();
    history.push_state("a", Some(1));

    assert_eq!(Some("a"), history.current_state());
    assert_eq!(Some(1), history.current_value());
    assert_eq!(Some(0), history.index_of_state(&"a"));
    assert!(!history.is_empty());
}

#[test]
fn pushes_keep_states_and_values_in_sync() {
    let history = BreadcrumbHistory::new();
    let states = ["a", "b", "c", "d", "e"];
    for (value, state) in states.iter().enumerate() {
        history.push_state(*state, Some(value as u32));
        assert_eq!(history.states().len(), history.values().len());
    }

    for (value, state) in states.iter().enumerate() {
        assert_eq!(Some(value as u32), history.value(state));
    }
}

#[test]
fn duplicate_pushes_share_one_value_slot() {
    let history = BreadcrumbHistory::new();
    history.push_state("a", Some(1));
    history.push_state("b", Some(2));
    history.push_state("a", Some(3));

    assert_eq!(vec!["a", "b", "a"], history.states());
    assert_eq!(vec![Some(3), Some(2)], history.values());
    assert_eq!(Some(3), history.value(&"a"));

    history.pop_state();

    assert_eq!(vec!["a", "b"], history.states());
    assert_eq!(Some(3), history.value(&"a"));
    assert_eq!(vec![Some(3), Some(2)], history.values());
}

#[test]
fn goto_truncates_above_target() {
    let history = BreadcrumbHistory::new();
    for (value, state) in ["a", "b", "c", "d"].into_iter().enumerate() {
        history.push_state(state, Some(value as u32));
    }

    history.goto_state(&"b");

    assert_eq!(2, history.len());
    assert!(!history.contains_state(&"c"));
    assert!(!history.contains_state(&"d"));
    assert_eq!(None, history.value(&"c"));
    assert_eq!(vec![Some(0), Some(1)], history.values());
}

#[test]
fn goto_absent_state_changes_nothing() {
    let history = BreadcrumbHistory::new();
    history.push_state("a", Some(1));
    history.push_state("b", Some(2));
    let (_listener, events) = recorder(&history);

    history.goto_state(&"x");

    assert_eq!(vec!["a", "b"], history.states());
    assert_eq!(Some("b"), history.current_state());
    assert!(events.lock().unwrap().is_empty());
}

#[test]
fn pop_until_empty() {
    let history = BreadcrumbHistory::new();
    history.push_state("a", Some(1));

    assert_eq!(Some(Entry::new("a", Some(1))), history.pop_state());
    assert!(history.is_empty());
    assert_eq!(None, history.pop_state());
    assert_eq!(None, history.current_state());
    assert_eq!(None, history.current_index());
}

#[test]
fn pop_emits_current_changed_only() {
    let history = BreadcrumbHistory::new();
    history.push_state("a", Some(1));
    history.push_state("b", Some(2));
    let (_listener, events) = recorder(&history);

    history.pop_state();
    history.pop_state();

    assert_eq!(
        vec![
            changed(Some("a"), Some(1), Some(0), Some("b"), Some(2)),
            changed(None, None, None, Some("a"), Some(1)),
        ],
        *events.lock().unwrap()
    );
}

#[test]
fn clear_emits_once_and_only_when_not_empty() {
    let history = BreadcrumbHistory::new();
    let (_listener, events) = recorder(&history);

    history.clear();
    assert!(events.lock().unwrap().is_empty());

    history.push_state("a", Some(1));
    history.push_state("b", Some(2));
    events.lock().unwrap().clear();

    history.clear();

    assert!(history.is_empty());
    assert!(history.values().is_empty());
    assert_eq!(
        vec![changed(None, None, None, Some("b"), Some(2))],
        *events.lock().unwrap()
    );
}

#[test]
fn replace_all_sets_new_content() {
    let history = BreadcrumbHistory::<&str, u32>::new();
    history.push_state("x", Some(9));
    history.push_state("y", Some(8));

    history.replace_all(vec![("a", 1).into(), ("b", 2).into(), ("c", 3).into()]);

    assert_eq!(vec!["a", "b", "c"], history.states());
    assert_eq!(Some("c"), history.current_state());
    assert_eq!(Some(3), history.current_value());
    assert!(!history.contains_state(&"x"));
}

#[test]
fn replace_all_event_sequence() {
    let history = BreadcrumbHistory::new();
    history.push_state("x", Some(9));
    let (_listener, events) = recorder(&history);

    history.replace_all(vec![Entry::new("a", Some(1)), Entry::new("b", None)]);

    assert_eq!(
        vec![
            changed(None, None, None, Some("x"), Some(9)),
            added("a", Some(1), 0),
            added("b", None, 1),
            changed(Some("b"), None, Some(1), Some("x"), Some(9)),
        ],
        *events.lock().unwrap()
    );
}

#[test]
fn replace_all_on_empty_history_skips_clear_event() {
    let history = BreadcrumbHistory::new();
    let (_listener, events) = recorder(&history);

    history.replace_all(vec![Entry::new("a", Some(1))]);

    assert_eq!(
        vec![
            added("a", Some(1), 0),
            changed(Some("a"), Some(1), Some(0), None, None),
        ],
        *events.lock().unwrap()
    );
}

#[test]
fn replace_all_with_nothing_on_empty_history_is_silent() {
    let history = BreadcrumbHistory::new();
    let (_listener, events) = recorder(&history);

    history.replace_all(Vec::new());

    assert!(history.is_empty());
    assert!(events.lock().unwrap().is_empty());
}

#[test]
fn push_emits_added_before_changed() {
    let history = BreadcrumbHistory::new();
    let (_listener, events) = recorder(&history);

    history.push_state("a", Some(1));
    history.push_state("b", None);

    assert_eq!(
        vec![
            added("a", Some(1), 0),
            changed(Some("a"), Some(1), Some(0), None, None),
            added("b", None, 1),
            changed(Some("b"), None, Some(1), Some("a"), Some(1)),
        ],
        *events.lock().unwrap()
    );
}

#[test]
fn goto_emits_single_event_from_original_tail() {
    let history = BreadcrumbHistory::new();
    history.push_state("a", Some(1));
    history.push_state("b", Some(2));
    history.push_state("c", Some(3));
    let (_listener, events) = recorder(&history);

    history.goto_state(&"a");

    assert_eq!(
        vec![changed(Some("a"), Some(1), Some(0), Some("c"), Some(3))],
        *events.lock().unwrap()
    );
}

#[test]
fn goto_current_state_notifies_by_default() {
    let history = BreadcrumbHistory::new();
    history.push_state("a", Some(1));
    let (_listener, events) = recorder(&history);

    history.goto_state(&"a");

    assert_eq!(
        vec![changed(Some("a"), Some(1), Some(0), Some("a"), Some(1))],
        *events.lock().unwrap()
    );
}

#[test]
fn goto_current_state_is_silent_when_disabled() {
    let history = BreadcrumbHistory::with_options(HistoryOptions {
        notify_same_state_goto: false,
    });
    history.push_state("a", Some(1));
    history.push_state("b", Some(2));
    let (_listener, events) = recorder(&history);

    history.goto_state(&"b");
    assert!(events.lock().unwrap().is_empty());

    history.goto_state(&"a");
    assert_eq!(1, events.lock().unwrap().len());
}

#[test]
fn peek_state_reports_out_of_range() {
    let history = BreadcrumbHistory::<&str, u32>::new();
    assert_eq!(
        Err(HistoryError::IndexOutOfRange { index: 0, len: 0 }),
        history.peek_state(0)
    );

    history.push_state("a", None);
    history.push_state("b", None);

    assert_eq!(Ok("a"), history.peek_state(0));
    assert_eq!(Ok("b"), history.peek_state(1));
    assert!(history.peek_state(2).is_err());
}

#[test]
fn set_value_replaces_value_of_present_state() {
    let history = BreadcrumbHistory::new();
    history.push_state("a", Some(1));
    history.push_state("b", Some(2));

    history.set_value(&"a", Some(10));

    assert_eq!(Some(10), history.value(&"a"));
    assert_eq!(vec![Some(10), Some(2)], history.values());
}

#[test]
fn listener_can_unregister_itself_during_dispatch() {
    let history = Arc::new(BreadcrumbHistory::<&'static str, u32>::new());
    let calls = Arc::new(Mutex::new(0));

    let slot: Arc<Mutex<Option<Arc<dyn BreadcrumbListener<&'static str, u32>>>>> =
        Arc::new(Mutex::new(None));

    let listener: Arc<dyn BreadcrumbListener<&'static str, u32>> = {
        let history = Arc::downgrade(&history);
        let calls = calls.clone();
        let slot = slot.clone();
        Arc::new(move |_: &Event| {
            *calls.lock().unwrap() += 1;

            let own = slot.lock().unwrap().clone();
            if let (Some(history), Some(own)) = (history.upgrade(), own) {
                history.remove_listener(&own);
            }
        })
    };
    *slot.lock().unwrap() = Some(listener.clone());
    history.add_listener(&listener);

    history.push_state("a", Some(1));
    history.push_state("b", Some(2));

    assert_eq!(1, *calls.lock().unwrap());
    assert_eq!(0, history.listener_count());
}

#[test]
fn listener_can_mutate_history_during_dispatch() {
    let history = Arc::new(BreadcrumbHistory::<&'static str, u32>::new());

    let listener: Arc<dyn BreadcrumbListener<&'static str, u32>> = {
        let history = Arc::downgrade(&history);
        Arc::new(move |event: &Event| {
            if let BreadcrumbEvent::StateAdded { state: "b", .. } = event {
                if let Some(history) = history.upgrade() {
                    history.goto_state(&"a");
                }
            }
        })
    };
    history.add_listener(&listener);

    history.push_state("a", Some(1));
    history.push_state("b", Some(2));

    assert_eq!(vec!["a"], history.states());
}

#[test]
fn events_of_nested_mutation_arrive_after_outer_events() {
    let history = Arc::new(BreadcrumbHistory::<&'static str, u32>::new());

    let listener: Arc<dyn BreadcrumbListener<&'static str, u32>> = {
        let history = Arc::downgrade(&history);
        Arc::new(move |event: &Event| {
            if let BreadcrumbEvent::StateAdded { state: "b", .. } = event {
                if let Some(history) = history.upgrade() {
                    history.goto_state(&"a");
                }
            }
        })
    };
    history.add_listener(&listener);
    let (_recorder, events) = recorder(&history);

    history.push_state("a", Some(1));
    history.push_state("b", Some(2));

    assert_eq!(
        vec![
            added("a", Some(1), 0),
            changed(Some("a"), Some(1), Some(0), None, None),
            added("b", Some(2), 1),
            changed(Some("b"), Some(2), Some(1), Some("a"), Some(1)),
            changed(Some("a"), Some(1), Some(0), Some("b"), Some(2)),
        ],
        *events.lock().unwrap()
    );
    assert_eq!(Some("a"), history.current_state());
}

#[test]
fn last_change_seen_matches_current_state_with_concurrent_writers() {
    let history = Arc::new(BreadcrumbHistory::<u32, u32>::new());

    let last = Arc::new(Mutex::new(None));
    let listener: Arc<dyn BreadcrumbListener<u32, u32>> = {
        let last = last.clone();
        Arc::new(move |event: &BreadcrumbEvent<u32, u32>| {
            if let BreadcrumbEvent::CurrentChanged { state, .. } = event {
                *last.lock().unwrap() = *state;
            }
        })
    };
    history.add_listener(&listener);

    let writers: Vec<_> = (0..4)
        .map(|writer| {
            let history = history.clone();
            thread::spawn(move || {
                for round in 0..100 {
                    let state = writer * 1000 + round;
                    history.push_state(state, Some(round));
                    if round % 3 == 0 {
                        history.pop_state();
                    }
                }
            })
        })
        .collect();

    for writer in writers {
        writer.join().unwrap();
    }

    assert_eq!(history.current_state(), *last.lock().unwrap());
}

#[test]
fn dropped_listener_is_not_notified() {
    let history = BreadcrumbHistory::new();
    let (listener, events) = recorder(&history);
    drop(listener);

    history.push_state("a", Some(1));

    assert!(events.lock().unwrap().is_empty());
    assert_eq!(0, history.listener_count());
}

#[test]
fn concurrent_readers_never_see_torn_state() {
    let history = Arc::new(BreadcrumbHistory::<u32, u32>::new());

    let writer = {
        let history = history.clone();
        thread::spawn(move || {
            for round in 0..200 {
                history.replace_all((0..10).map(|it| Entry::new(it, Some(it * round))));
                history.goto_state(&3);
                history.pop_state();
            }
        })
    };

    for _ in 0..200 {
        let entries = history.entries();
        let states = history.states();
        assert!(entries.iter().all(|entry| entry.value.is_some()));
        assert!(states.len() <= 10);
    }

    writer.join().unwrap();
}

#[test]
fn navigation_scenario() {
    let history = BreadcrumbHistory::new();
    history.push_state("home", Some("Home"));
    history.push_state("docs", Some("Documents"));
    history.push_state("report", Some("Report.docx"));

    assert_eq!(vec!["home", "docs", "report"], history.states());
    assert_eq!(Some("report"), history.current_state());

    history.goto_state(&"docs");

    assert_eq!(vec!["home", "docs"], history.states());
    assert_eq!(Some("docs"), history.current_state());
    assert!(!history.contains_state(&"report"));
}
