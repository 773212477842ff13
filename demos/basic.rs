//! Basic usage examples for PoolManager

use esox_randompool::{Object, Pants, PoolConfiguration, PoolManager, Shirt, Sock};

fn main() {
    println!("=== EsoxSolutions.RandomPool - Basic Examples ===\n");

    // Example 1: Create, fill and draw from a pool
    simple_pool();

    // Example 2: Errors the manager reports
    rejected_operations();

    // Example 3: Metrics and health
    metrics_and_health();
}

fn simple_pool() {
    println!("1. Simple Pool:");
    let manager = PoolManager::with_builtin_types(&PoolConfiguration::default()).unwrap();
    manager.create_pool("shirt", "shirt").unwrap();

    manager.add_object("shirt", Object::from(Shirt::new("M", "blue"))).unwrap();
    manager.add_object("shirt", Object::from(Shirt::new("L", "red"))).unwrap();

    for _ in 0..3 {
        println!("   Random pick: {:?}", manager.random_object("shirt").unwrap());
    }

    manager.remove_object("shirt", &Object::from(Shirt::new("M", "blue"))).unwrap();
    println!("   Only one left: {:?}\n", manager.random_object("shirt").unwrap());
}

fn rejected_operations() {
    println!("2. Rejected Operations:");
    let config = PoolConfiguration::new().with_max_pool_size(1);
    let manager = PoolManager::with_builtin_types(&config).unwrap();
    manager.create_pool("socks", "sock").unwrap();

    let attempts = [
        manager.create_pool("socks", "sock"),
        manager.create_pool("hats", "hat"),
        manager.add_object("socks", Object::from(Pants::new("32", "navy"))),
        manager.add_object("socks", Object::from(Sock::new("S", "white"))),
        manager.add_object("socks", Object::from(Sock::new("M", "black"))),
        manager.remove_object("socks", &Object::from(Sock::new("XL", "red"))),
        manager.add_object("gloves", Object::from(Sock::new("S", "white"))),
    ];

    for result in attempts {
        match result {
            Ok(()) => println!("   Ok"),
            Err(e) => println!("   Error ({:?}): {}", e.kind(), e),
        }
    }
    println!();
}

fn metrics_and_health() {
    println!("3. Metrics and Health:");
    let config = PoolConfiguration::new().with_max_pool_size(10);
    let manager = PoolManager::with_builtin_types(&config).unwrap();
    manager.create_pool("pants", "pants").unwrap();

    for size in ["30", "32", "34"] {
        manager.add_object("pants", Object::from(Pants::new(size, "grey"))).unwrap();
    }
    let _ = manager.random_object("pants");

    let pool = manager.get_pool("pants").unwrap();
    let health = pool.get_health_status();
    println!("   Health: {}", if health.is_healthy { "Healthy" } else { "Unhealthy" });
    println!("   Utilization: {:.1}%", health.utilization * 100.0);

    println!("\n   Metrics:");
    for (key, value) in pool.get_metrics().export() {
        println!("     {}: {}", key, value);
    }
}
