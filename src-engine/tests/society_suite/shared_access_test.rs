// FICHIER : src-engine/tests/society_suite/shared_access_test.rs

use crate::common::{init_test_env, sample_society, seeded};
use lore_engine::utils::Arc;
use std::thread;

/// Un écrivain, plusieurs lecteurs concurrents sur la même société.
#[test]
fn test_single_writer_many_readers() {
    init_test_env();
    let shared = sample_society(12, 4, 13).into_shared();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let society = Arc::clone(&shared);
            thread::spawn(move || {
                for _ in 0..20 {
                    let guard = society.read().expect("verrou empoisonné");
                    let stats = guard.get_society_stats();
                    assert_eq!(stats.total_agents, 12);
                    assert_eq!(stats.total_connections, guard.edge_count());
                }
            })
        })
        .collect();

    let writer = {
        let society = Arc::clone(&shared);
        thread::spawn(move || {
            let mut rng = seeded(13);
            for _ in 0..10 {
                let mut guard = society.write().expect("verrou empoisonné");
                guard.simulate_interactions(10, &mut rng).unwrap();
                guard.tick_all();
            }
        })
    };

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    let guard = shared.read().unwrap();
    assert_eq!(guard.total_interactions(), 100);
    assert!(guard.agents().all(|a| a.age() == 10));
}
