//! # Lifecycle Properties
//!
//! Random acyclic systems, started and stopped for real:
//! - every component sees each of its dependencies' start results, in
//!   declaration order, and only after those dependencies started
//! - stop runs in the exact reverse of start

#[cfg(test)]
mod tests {
    use electrician::{BoxError, Component, System};
    use proptest::prelude::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Start(usize),
        Stop(usize),
    }

    impl Event {
        fn component(self) -> usize {
            match self {
                Event::Start(i) | Event::Stop(i) => i,
            }
        }
    }

    type Log = Arc<Mutex<Vec<Event>>>;

    /// Component `i` depends on a set of components `j < i`; registration
    /// order is shuffled.
    fn dag_strategy() -> impl Strategy<Value = (Vec<Vec<usize>>, Vec<usize>)> {
        (1usize..16).prop_flat_map(|n| {
            let deps = (0..n)
                .map(|i| {
                    if i == 0 {
                        Just(Vec::new()).boxed()
                    } else {
                        prop::collection::btree_set(0..i, 0..4)
                            .prop_map(|set| set.into_iter().collect())
                            .boxed()
                    }
                })
                .collect::<Vec<_>>();
            let registration = Just((0..n).collect::<Vec<_>>()).prop_shuffle();
            (deps, registration)
        })
    }

    fn tracked(i: usize, expected: Vec<usize>, log: &Log) -> Component {
        let names: Vec<String> = expected.iter().map(|d| format!("c{d}")).collect();
        let started = Arc::clone(log);
        let stopped = Arc::clone(log);

        Component::new()
            .depends_on(names)
            .with_start_value(move |deps| {
                let expected = expected.clone();
                let started = Arc::clone(&started);
                async move {
                    for (position, dependency) in expected.iter().enumerate() {
                        if deps.get::<usize>(position)? != dependency {
                            return Err("dependency injected out of order".into());
                        }
                    }
                    started.lock().unwrap().push(Event::Start(i));
                    Ok::<_, BoxError>(i)
                }
            })
            .with_stop(move || {
                stopped.lock().unwrap().push(Event::Stop(i));
                async { Ok(()) }
            })
    }

    fn build(deps: &[Vec<usize>], registration: &[usize], log: &Log) -> System {
        registration.iter().fold(System::new(), |system, &i| {
            system.with_component(format!("c{i}"), tracked(i, deps[i].clone(), log))
        })
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
    }

    proptest! {
        #[test]
        fn prop_executed_order_respects_dependencies((deps, registration) in dag_strategy()) {
            let log = Log::default();
            let mut system = build(&deps, &registration, &log);

            let context = runtime().block_on(system.start()).unwrap();
            prop_assert_eq!(context.len(), deps.len());

            let events = log.lock().unwrap().clone();
            let started_at = |c: usize| events.iter().position(|e| *e == Event::Start(c));
            for (i, dependencies) in deps.iter().enumerate() {
                let own = started_at(i).unwrap();
                for &d in dependencies {
                    prop_assert!(started_at(d).unwrap() < own);
                }
                let name = format!("c{i}");
                prop_assert_eq!(context.get::<usize>(&name), Some(&i));
            }
        }

        #[test]
        fn prop_stop_mirrors_start((deps, registration) in dag_strategy()) {
            let log = Log::default();
            let mut system = build(&deps, &registration, &log);

            let runtime = runtime();
            runtime.block_on(system.start()).unwrap();
            runtime.block_on(system.stop()).unwrap();

            let events = log.lock().unwrap().clone();
            let (starts, stops): (Vec<Event>, Vec<Event>) =
                events.iter().partition(|e| matches!(e, Event::Start(_)));
            let started: Vec<usize> = starts.into_iter().map(Event::component).collect();
            let mut stopped: Vec<usize> = stops.into_iter().map(Event::component).collect();
            stopped.reverse();

            prop_assert_eq!(started, stopped);
        }
    }
}
