//! # Struct-Style Components
//!
//! Components implemented through the `Lifecycle` trait, passing typed
//! handles to each other, watched by observers.

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use electrician::{
        BoxError, Component, ComponentName, ComponentValue, Dependencies, Lifecycle,
        LifecycleApi, LifecycleObserver, LifecycleState, Phase, System, SystemId,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    #[derive(Debug, Clone, PartialEq)]
    struct Settings {
        pool_size: usize,
    }

    #[derive(Debug)]
    struct Pool {
        size: usize,
        open: AtomicUsize,
    }

    struct SettingsLoader;

    #[async_trait]
    impl Lifecycle for SettingsLoader {
        async fn start(&self, _deps: Dependencies) -> Result<ComponentValue, BoxError> {
            Ok(ComponentValue::new(Settings { pool_size: 4 }))
        }
    }

    /// Opens a pool sized from the settings; closes it on stop.
    #[derive(Default)]
    struct Database {
        pool: Mutex<Option<Arc<Pool>>>,
    }

    #[async_trait]
    impl Lifecycle for Database {
        fn dependencies(&self) -> Vec<ComponentName> {
            vec!["settings".into()]
        }

        async fn start(&self, deps: Dependencies) -> Result<ComponentValue, BoxError> {
            let settings = deps.by_name::<Settings>("settings")?;
            let pool = Arc::new(Pool {
                size: settings.pool_size,
                open: AtomicUsize::new(settings.pool_size),
            });
            *self.pool.lock().unwrap() = Some(Arc::clone(&pool));
            Ok(ComponentValue::new(pool))
        }

        async fn stop(&self) -> Result<(), BoxError> {
            if let Some(pool) = self.pool.lock().unwrap().take() {
                pool.open.store(0, Ordering::SeqCst);
            }
            Ok(())
        }
    }

    struct Api;

    #[async_trait]
    impl Lifecycle for Api {
        fn dependencies(&self) -> Vec<ComponentName> {
            vec!["database".into(), "settings".into()]
        }

        async fn start(&self, deps: Dependencies) -> Result<ComponentValue, BoxError> {
            let pool = deps.get::<Arc<Pool>>(0)?;
            let settings = deps.get::<Settings>(1)?;
            Ok(ComponentValue::new(format!(
                "api on {} of {} connections",
                pool.open.load(Ordering::SeqCst),
                settings.pool_size
            )))
        }
    }

    /// Observer that keeps every callback as text
    struct Journal {
        label: &'static str,
        entries: Arc<Mutex<Vec<String>>>,
    }

    impl LifecycleObserver for Journal {
        fn on_transition(&self, _system: SystemId, from: LifecycleState, to: LifecycleState) {
            self.entries
                .lock()
                .unwrap()
                .push(format!("{}: {from} -> {to}", self.label));
        }

        fn on_component_started(&self, component: &ComponentName, _elapsed: Duration) {
            self.entries
                .lock()
                .unwrap()
                .push(format!("{}: started {component}", self.label));
        }

        fn on_component_failed(
            &self,
            component: &ComponentName,
            phase: Phase,
            error: &(dyn std::error::Error + Send + Sync + 'static),
        ) {
            self.entries
                .lock()
                .unwrap()
                .push(format!("{}: {phase} of {component} failed: {error}", self.label));
        }
    }

    fn service_system(database: Arc<Database>) -> System {
        System::new()
            .with_component("api", Component::from_lifecycle(Arc::new(Api)))
            .with_component("database", Component::from_lifecycle(database))
            .with_component("settings", Component::from_lifecycle(Arc::new(SettingsLoader)))
    }

    // =============================================================================
    // TESTS
    // =============================================================================

    #[tokio::test]
    async fn test_typed_handles_flow_between_components() {
        let database = Arc::new(Database::default());
        let mut system = service_system(Arc::clone(&database));

        let context = system.start().await.unwrap();

        assert_eq!(
            context.get::<Settings>("settings"),
            Some(&Settings { pool_size: 4 })
        );
        assert_eq!(context.get::<Arc<Pool>>("database").unwrap().size, 4);
        assert_eq!(
            context.get::<String>("api").unwrap(),
            "api on 4 of 4 connections"
        );
        let names: Vec<&str> = context.names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["settings", "database", "api"]);
    }

    #[tokio::test]
    async fn test_stop_releases_shared_handle() {
        let database = Arc::new(Database::default());
        let mut system = service_system(Arc::clone(&database));

        let context = system.start().await.unwrap();
        let pool = context.get::<Arc<Pool>>("database").cloned().unwrap();
        system.stop().await.unwrap();

        assert_eq!(pool.open.load(Ordering::SeqCst), 0);
        assert!(database.pool.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_observers_called_in_registration_order() {
        let entries = Arc::new(Mutex::new(Vec::new()));
        let mut system = System::new()
            .with_component("settings", Component::from_lifecycle(Arc::new(SettingsLoader)))
            .with_observer(Arc::new(Journal {
                label: "first",
                entries: Arc::clone(&entries),
            }))
            .with_observer(Arc::new(Journal {
                label: "second",
                entries: Arc::clone(&entries),
            }));

        system.start().await.unwrap();

        assert_eq!(
            entries.lock().unwrap().clone(),
            vec![
                "first: unstarted -> starting",
                "second: unstarted -> starting",
                "first: started settings",
                "second: started settings",
                "first: starting -> started",
                "second: starting -> started",
            ]
        );
    }

    #[tokio::test]
    async fn test_observer_sees_type_mismatch_failure() {
        let entries = Arc::new(Mutex::new(Vec::new()));
        let mut system = System::new()
            .with_component(
                "settings",
                Component::new().with_start_value(|_| async { Ok::<_, BoxError>("not settings") }),
            )
            .with_component("database", Component::from_lifecycle(Arc::new(Database::default())))
            .with_observer(Arc::new(Journal {
                label: "journal",
                entries: Arc::clone(&entries),
            }));

        let err = system.start().await.unwrap_err();

        assert!(err.to_string().starts_with("database: Dependency settings is &str"));
        assert!(entries
            .lock()
            .unwrap()
            .iter()
            .any(|e| e.starts_with("journal: start of database failed")));
    }

    #[tokio::test]
    async fn test_driven_through_api_port() {
        async fn run(api: &mut dyn LifecycleApi) -> Result<usize, electrician::LifecycleError> {
            let started = api.start().await?.len();
            api.stop().await?;
            Ok(started)
        }

        let mut system = service_system(Arc::new(Database::default()));

        assert_eq!(run(&mut system).await.unwrap(), 3);
        assert_eq!(system.state(), LifecycleState::Stopped);
    }
}
