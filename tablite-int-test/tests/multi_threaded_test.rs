use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use tablite::doc;
use tablite_int_test::test_util::{cleanup, create_test_context, run_test};

#[test]
fn test_multi_threaded_insert() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.create_table("concurrent")?;

            let num_threads = 5;
            let inserts_per_thread = 20;
            let barrier = Arc::new(Barrier::new(num_threads));

            let mut handles = vec![];
            for thread_id in 0..num_threads {
                let db_clone = db.clone();
                let barrier_clone = Arc::clone(&barrier);

                let handle = thread::spawn(move || {
                    // wait for all threads to be ready
                    barrier_clone.wait();

                    for i in 0..inserts_per_thread {
                        let value = format!("thread_{}_seq_{}", thread_id, i);
                        let _ = db_clone.insert_into(
                            "concurrent",
                            doc! { thread_id: (thread_id), sequence: (i), value: (value) },
                        );
                    }
                });
                handles.push(handle);
            }

            for handle in handles {
                let _ = handle.join();
            }

            assert_eq!(
                db.read_from("concurrent", &doc! {})?.len(),
                num_threads * inserts_per_thread
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_contested_create_has_one_winner() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();

            let num_threads = 8;
            let barrier = Arc::new(Barrier::new(num_threads));
            let winners = Arc::new(AtomicUsize::new(0));

            let mut handles = vec![];
            for _ in 0..num_threads {
                let db_clone = db.clone();
                let barrier_clone = Arc::clone(&barrier);
                let winners_clone = Arc::clone(&winners);

                let handle = thread::spawn(move || {
                    barrier_clone.wait();
                    if db_clone.create_table("contested").is_ok() {
                        winners_clone.fetch_add(1, Ordering::SeqCst);
                    }
                });
                handles.push(handle);
            }

            for handle in handles {
                let _ = handle.join();
            }

            assert_eq!(winners.load(Ordering::SeqCst), 1);
            assert!(db.has_table("contested"));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_multi_threaded_update_on_disjoint_documents() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.create_table("counters")?;
            for i in 0..5 {
                db.insert_into("counters", doc! { slot: (i), state: "new" })?;
            }

            let num_threads = 5;
            let barrier = Arc::new(Barrier::new(num_threads));

            let mut handles = vec![];
            for slot in 0..num_threads {
                let db_clone = db.clone();
                let barrier_clone = Arc::clone(&barrier);

                let handle = thread::spawn(move || {
                    barrier_clone.wait();
                    let _ = db_clone.update_in(
                        "counters",
                        &doc! { slot: (slot) },
                        &doc! { state: "done" },
                    );
                });
                handles.push(handle);
            }

            for handle in handles {
                let _ = handle.join();
            }

            assert_eq!(db.read_from("counters", &doc! { state: "done" })?.len(), 5);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_concurrent_reads_during_writes() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.create_table("stream")?;

            let writer = {
                let db_clone = db.clone();
                thread::spawn(move || {
                    for i in 0..50 {
                        let _ = db_clone.insert_into("stream", doc! { seq: (i) });
                    }
                })
            };

            let readers: Vec<_> = (0..3)
                .map(|_| {
                    let db_clone = db.clone();
                    thread::spawn(move || {
                        let mut last_seen = 0;
                        for _ in 0..50 {
                            if let Ok(matched) = db_clone.read_from("stream", &doc! {}) {
                                // the table only ever grows
                                assert!(matched.len() >= last_seen);
                                last_seen = matched.len();
                            }
                        }
                    })
                })
                .collect();

            let _ = writer.join();
            for reader in readers {
                let _ = reader.join();
            }

            assert_eq!(db.read_from("stream", &doc! {})?.len(), 50);
            Ok(())
        },
        cleanup,
    )
}
