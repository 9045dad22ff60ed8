use tablite::doc;
use tablite::errors::TabliteResult;
use tablite_int_test::test_util::{cleanup, create_test_context};

fn main() -> TabliteResult<()> {
    println!("Starting stress run...");
    let ctx = create_test_context()?;

    let db = ctx.db();
    db.create_table("stress")?;
    db.use_table("stress")?;

    let count = 10_000;
    let start = std::time::Instant::now();
    for i in 0..count {
        db.insert(doc! {
            id: (uuid::Uuid::new_v4().to_string()),
            seq: (i),
            bucket: (i % 10),
            processed: false,
        })?;
    }
    let elapsed = start.elapsed();
    println!("Inserted {} documents in {:?}", count, elapsed);

    let start = std::time::Instant::now();
    let matched = db.read(&doc! { bucket: 3 })?;
    let elapsed = start.elapsed();
    println!("Read {} documents in {:?}", matched.len(), elapsed);

    let start = std::time::Instant::now();
    let result = db.update(&doc! { bucket: 3 }, &doc! { processed: true })?;
    let elapsed = start.elapsed();
    println!("Updated {} documents in {:?}", result.count(), elapsed);

    let start = std::time::Instant::now();
    let result = db.delete(&doc! { processed: true })?;
    let elapsed = start.elapsed();
    println!("Deleted {} documents in {:?}", result.count(), elapsed);

    println!("Remaining documents: {}", db.read(&doc! {})?.len());

    cleanup(ctx)?;
    println!("Stress run finished");
    Ok(())
}
