//! Concurrent access from async tasks

use esox_randompool::{Object, PoolConfiguration, PoolManager, Sock};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

#[tokio::main]
async fn main() {
    println!("=== EsoxSolutions.RandomPool - Concurrent Access ===\n");

    let config = PoolConfiguration::new().with_max_pool_size(20);
    let manager = Arc::new(PoolManager::with_builtin_types(&config).unwrap());
    manager.create_pool("socks", "sock").unwrap();

    let mut handles = vec![];

    for i in 0..10 {
        let manager = Arc::clone(&manager);
        let handle = tokio::spawn(async move {
            let sock = Object::from(Sock::new("M", format!("color-{}", i)));
            if let Err(e) = manager.add_object("socks", sock) {
                println!("   Task {} couldn't add: {}", i, e);
            }
            sleep(Duration::from_millis(10)).await;
            match manager.random_object("socks") {
                Ok(obj) => println!("   Task {} drew: {:?}", i, obj),
                Err(e) => println!("   Task {} drew nothing: {}", i, e),
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.await.unwrap();
    }

    println!("\n   Final size: {}", manager.get_pool("socks").unwrap().len());
}
