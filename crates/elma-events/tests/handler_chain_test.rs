use elma_events::{json, Event, Map, Propagation, Value};
use elma_telemetry::{init_subscriber, TelemetryConfig};
use std::sync::{Arc, Mutex};
use std::thread;

type Handler = Box<dyn Fn(&mut Event, &mut Vec<String>)>;

/// Mock handler that records its name and optionally stops the chain
fn handler(name: &'static str, stops: bool) -> Handler {
    Box::new(move |event: &mut Event, log: &mut Vec<String>| {
        log.push(format!("{}:{}", name, event.value()));
        if stops {
            event.stop_propagation();
        }
    })
}

/// Minimal driver: run handlers in order until one stops propagation
fn run_chain(event: &mut Event, handlers: &[Handler]) -> Vec<String> {
    let mut log = Vec::new();
    for handler in handlers {
        handler(event, &mut log);
        if !event.propagate() {
            break;
        }
    }
    log
}

fn init_tracing() {
    let config = TelemetryConfig {
        level: "trace".to_string(),
        ..Default::default()
    };
    init_subscriber(&config);
}

#[test]
fn test_all_handlers_run_when_nobody_stops() {
    init_tracing();
    let handlers = vec![handler("a", false), handler("b", false), handler("c", false)];
    let mut event = Event::new(42);

    let log = run_chain(&mut event, &handlers);

    assert_eq!(log, ["a:42", "b:42", "c:42"]);
    assert!(event.propagate());
}

#[test]
fn test_chain_stops_after_stopping_handler() {
    init_tracing();
    let handlers = vec![handler("a", false), handler("b", true), handler("c", false)];
    let mut event = Event::new("ping");

    let log = run_chain(&mut event, &handlers);

    assert_eq!(log, ["a:\"ping\"", "b:\"ping\""]);
    assert_eq!(event.state(), Propagation::Stopped);
    assert_eq!(event.value(), &json!("ping"));
}

#[test]
fn test_reset_allows_reuse_across_emissions() {
    init_tracing();
    let handlers = vec![handler("first", true), handler("second", false)];
    let mut event = Event::new(json!({"k": [1, 2, 3]}));

    let first = run_chain(&mut event, &handlers);
    assert_eq!(first.len(), 1);
    assert!(!event.propagate());

    event.reset();
    let second = run_chain(&mut event, &handlers);
    assert_eq!(first, second);
    assert_eq!(event.value(), &json!({"k": [1, 2, 3]}));
}

#[test]
fn test_empty_chain_leaves_event_untouched() {
    let mut event = Event::new(Value::Null);
    let log = run_chain(&mut event, &[]);

    assert!(log.is_empty());
    assert_eq!(event, Event::default());
}

#[test]
fn test_event_built_from_map() {
    let mut map = Map::new();
    map.insert("joint".to_string(), json!("elbow"));
    map.insert("angle".to_string(), json!(1.25));

    let mut event = Event::from(Value::Object(map.clone()));
    let log = run_chain(&mut event, &[handler("arm", true)]);

    assert_eq!(log, [r#"arm:{"joint":"elbow","angle":1.25}"#]);
    assert_eq!(event.value().as_object(), Some(&map));
    assert!(event.is_stopped());
}

fn apply_from_threads(event: &Arc<Mutex<Event>>, stop: bool) {
    let workers: Vec<_> = (0..4)
        .map(|_| {
            let event = Arc::clone(event);
            thread::spawn(move || {
                let mut event = event.lock().unwrap();
                if stop {
                    event.stop_propagation();
                } else {
                    event.reset();
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }
}

#[test]
fn test_shared_event_behind_mutex() {
    let event = Arc::new(Mutex::new(Event::new(json!([1, 2, 3]))));

    apply_from_threads(&event, true);
    {
        let event = event.lock().unwrap();
        assert!(!event.propagate());
        assert_eq!(event.value(), &json!([1, 2, 3]));
    }

    apply_from_threads(&event, false);
    let event = event.lock().unwrap();
    assert!(event.propagate());
    assert_eq!(event.value(), &json!([1, 2, 3]));
}
