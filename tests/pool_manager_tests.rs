use esox_randompool::{
    ErrorKind, Object, Pants, PoolConfiguration, PoolError, PoolManager, Shirt, Sock,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

fn manager_with_capacity(max_pool_size: usize) -> PoolManager {
    let config = PoolConfiguration::new().with_max_pool_size(max_pool_size);
    PoolManager::with_builtin_types(&config).unwrap()
}

fn shirt(size: &str, color: &str) -> Object {
    Object::from(Shirt::new(size, color))
}

#[test]
fn shirt_pool_walkthrough() {
    let manager = manager_with_capacity(100);
    manager.create_pool("shirt", "shirt").unwrap();

    manager.add_object("shirt", shirt("M", "blue")).unwrap();
    manager.add_object("shirt", shirt("L", "red")).unwrap();

    let picked = manager.random_object("shirt").unwrap();
    assert!(picked == shirt("M", "blue") || picked == shirt("L", "red"));

    manager.remove_object("shirt", &shirt("M", "blue")).unwrap();
    for _ in 0..20 {
        assert_eq!(manager.random_object("shirt").unwrap(), shirt("L", "red"));
    }

    manager.remove_object("shirt", &shirt("L", "red")).unwrap();
    assert_eq!(manager.random_object("shirt"), Err(PoolError::EmptyPool));
}

#[test]
fn capacity_of_one() {
    let manager = manager_with_capacity(1);
    manager.create_pool("shirt", "shirt").unwrap();

    manager.add_object("shirt", shirt("M", "blue")).unwrap();
    let err = manager.add_object("shirt", shirt("S", "green")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
    assert_eq!(manager.get_pool("shirt").unwrap().len(), 1);
}

#[test]
fn insert_then_remove_restores_count() {
    let manager = manager_with_capacity(100);
    manager.create_pool("socks", "sock").unwrap();
    manager.add_object("socks", Object::from(Sock::new("S", "white"))).unwrap();
    let before = manager.get_pool("socks").unwrap().len();

    let sock = Object::from(Sock::new("M", "black"));
    manager.add_object("socks", sock.clone()).unwrap();
    manager.remove_object("socks", &sock).unwrap();
    assert_eq!(manager.get_pool("socks").unwrap().len(), before);

    assert_eq!(manager.remove_object("socks", &sock), Err(PoolError::ObjectNotFound));
}

#[test]
fn mismatched_insert_leaves_count_unchanged() {
    let manager = manager_with_capacity(100);
    manager.create_pool("pants", "pants").unwrap();
    manager.add_object("pants", Object::from(Pants::new("32", "navy"))).unwrap();

    let err = manager.add_object("pants", shirt("M", "blue")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(manager.get_pool("pants").unwrap().len(), 1);
}

#[test]
fn pool_name_is_independent_of_type_name() {
    let manager = manager_with_capacity(100);
    manager.create_pool("summer", "shirt").unwrap();
    manager.create_pool("winter", "shirt").unwrap();

    manager.add_object("summer", shirt("S", "yellow")).unwrap();
    assert_eq!(manager.get_pool("winter").unwrap().len(), 0);
    assert_eq!(manager.random_object("winter"), Err(PoolError::EmptyPool));
    assert_eq!(
        manager.random_object("shirt"),
        Err(PoolError::PoolNotFound("shirt".to_string()))
    );
}

#[test]
fn random_selection_is_roughly_uniform() {
    let manager = manager_with_capacity(100);
    manager.create_pool("shirt", "shirt").unwrap();
    let colors = ["red", "green", "blue", "black"];
    for color in colors {
        manager.add_object("shirt", shirt("M", color)).unwrap();
    }

    let trials = 40_000;
    let mut counts: HashMap<Object, usize> = HashMap::new();
    for _ in 0..trials {
        *counts.entry(manager.random_object("shirt").unwrap()).or_default() += 1;
    }

    // Expected 10 000 each; the standard deviation is about 87.
    assert_eq!(counts.len(), colors.len());
    for (object, count) in counts {
        assert!(
            (9_200..=10_800).contains(&count),
            "{object:?} picked {count} times out of {trials}"
        );
    }
}

#[test]
fn concurrent_inserts_never_exceed_capacity() {
    let manager = Arc::new(manager_with_capacity(500));
    manager.create_pool("shirt", "shirt").unwrap();
    manager.add_object("shirt", shirt("M", "seed")).unwrap();

    thread::scope(|scope| {
        for worker in 0..8 {
            let manager = Arc::clone(&manager);
            scope.spawn(move || {
                for i in 0..100 {
                    let _ = manager.add_object("shirt", shirt("L", &format!("{worker}-{i}")));
                    assert!(manager.random_object("shirt").is_ok());
                }
            });
        }
    });

    let pool = manager.get_pool("shirt").unwrap();
    assert_eq!(pool.len(), 500);
    let metrics = pool.get_metrics();
    assert_eq!(metrics.total_inserted, 500);
    assert_eq!(metrics.rejected_inserts, 301);
}

#[test]
fn concurrent_creation_of_one_name_succeeds_once() {
    let manager = Arc::new(manager_with_capacity(10));

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let manager = Arc::clone(&manager);
                scope.spawn(move || manager.create_pool("shared", "sock"))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| e.kind() == ErrorKind::AlreadyExists)
    );
    assert_eq!(manager.len(), 1);
}
