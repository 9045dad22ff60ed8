use std::path::{Path, PathBuf};
use std::{env, fs};

use tablite::collection::Document;
use tablite::doc;
use tablite::errors::TabliteResult;
use tablite::tablite::Tablite;

/// Runs a test against a fresh catalog and a scratch export directory.
///
/// The `after` step runs even when the test body fails or panics, so a
/// broken test never leaves its export directory behind.
pub fn run_test<B, T, A>(before: B, test: T, after: A)
where
    B: FnOnce() -> TabliteResult<TestContext>,
    T: FnOnce(TestContext) -> TabliteResult<()>,
    A: FnOnce(TestContext) -> TabliteResult<()>,
{
    let ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| test(ctx.clone())));

    if let Err(e) = after(ctx) {
        eprintln!("Warning: after run failed: {:?}", e);
    }

    match outcome {
        Ok(Ok(())) => (),
        Ok(Err(e)) => panic!("Test failed: {:?}", e),
        Err(panic_err) => std::panic::resume_unwind(panic_err),
    }
}

#[derive(Clone)]
pub struct TestContext {
    export_dir: PathBuf,
    db: Tablite,
}

impl TestContext {
    pub fn new(export_dir: PathBuf, db: Tablite) -> Self {
        Self { export_dir, db }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    pub fn db(&self) -> Tablite {
        self.db.clone()
    }
}

pub fn random_export_dir() -> PathBuf {
    let id = uuid::Uuid::new_v4();
    env::temp_dir().join(format!("tablite-int-test-{}", id))
}

pub fn create_test_context() -> TabliteResult<TestContext> {
    let export_dir = random_export_dir();
    fs::create_dir_all(&export_dir)?;
    Ok(TestContext::new(export_dir, Tablite::new()))
}

pub fn cleanup(ctx: TestContext) -> TabliteResult<()> {
    if ctx.export_dir().exists() {
        fs::remove_dir_all(ctx.export_dir())?;
    }
    Ok(())
}

pub fn create_test_records() -> Vec<Document> {
    vec![
        doc! { key: "A", value: "B", others: "X" },
        doc! { key: "C", value: "D", others: "X" },
        doc! { key: "E", value: "F", profile: { city: "Kolkata", pin: 700014 } },
    ]
}

pub fn create_people_records() -> Vec<Document> {
    vec![
        doc! {
            first_name: "fn1",
            last_name: "ln1",
            address: { city: "Pune", street: { name: "MG Road", number: 12 } },
            tags: ["alpha", "beta"],
        },
        doc! {
            first_name: "fn2",
            last_name: "ln2",
            address: { city: "Pune", street: { name: "FC Road", number: 7 } },
            tags: ["beta"],
        },
        doc! {
            first_name: "fn3",
            last_name: "ln2",
            address: { city: "Delhi", street: { name: "Ring Road", number: 42 } },
        },
    ]
}

pub fn seed_test_records(db: &Tablite, table: &str) -> TabliteResult<()> {
    db.create_table_with(table, create_test_records())?;
    Ok(())
}

pub fn seed_people_records(db: &Tablite, table: &str) -> TabliteResult<()> {
    db.create_table_with(table, create_people_records())?;
    Ok(())
}
