use std::{
    process::ExitCode,
    sync::atomic::{AtomicU32, Ordering},
};

use grouptest::{Error, Group, Registry, TestGroup, handle::AssertionFailure, setup};

static BEFORE_EACH: AtomicU32 = AtomicU32::new(0);
static AFTER_EACH: AtomicU32 = AtomicU32::new(0);
static ALL: AtomicU32 = AtomicU32::new(0);

fn group_1(r: &mut Registry) -> Result<(), Error> {
    let (one, two) = (1, 2);

    r.test("Test Pass", |_| ())?;
    r.test("Assert Pass", move |t| {
        t.assert(one < two);
    })?;
    r.test("Assert Fail", move |t| {
        t.assert_with(one == two, "Test Assert message");
    })?;
    r.test("Expect Pass", |t| {
        t.expect(1, 1);
    })?;
    r.test("Expect Fail", |t| {
        t.expect_with(1, 2, "Test expect message");
    })?;
    r.test("Fail", |t| t.fail_with("Test Fail Message"))?;
    r.test("Fail No Message", |t| t.fail())?;
    r.test("Duplicate Test Name Pass", |t| {
        let mut inner = Registry::new();
        let first = inner.test("This shouldn't run 1", |_| ());
        let second = inner.test("This shouldn't run 1", |_| ());
        t.assert_with(first.is_ok(), "first registration failed");
        t.assert_with(
            matches!(second, Err(Error::DuplicateTest { .. })),
            "No DuplicateTest error returned",
        );
    })?;
    r.test("Exception", |_| -> Result<(), std::num::ParseIntError> {
        "asdf".parse::<u32>()?;
        Ok(())
    })
}

fn group_2(r: &mut Registry) -> Result<(), Error> {
    r.only("Only Test", |_| ())?;
    r.test("This shouldn't run 2", |_| ())?;
    r.test("This shouldn't run 3", |_| ())
}

fn callbacks(r: &mut Registry) -> Result<(), Error> {
    r.before_each(|| {
        BEFORE_EACH.fetch_add(1, Ordering::SeqCst);
    });
    r.after_each(|| {
        AFTER_EACH.fetch_add(1, Ordering::SeqCst);
    });
    r.before_all(|| {
        ALL.fetch_add(1, Ordering::SeqCst);
    });
    r.after_all(|| {
        ALL.fetch_sub(1, Ordering::SeqCst);
    });

    for (name, before_each, after_each) in [("one", 1, 0), ("two", 2, 1), ("three", 3, 2)] {
        r.test(name, move |t| {
            t.expect_with(
                BEFORE_EACH.load(Ordering::SeqCst),
                before_each,
                "Before Each count was wrong",
            );
            t.expect_with(
                AFTER_EACH.load(Ordering::SeqCst),
                after_each,
                "After Each count was wrong",
            );
            t.expect_with(ALL.load(Ordering::SeqCst), 1, "All Count was wrong");
        })?;
    }
    Ok(())
}

fn post_callbacks(r: &mut Registry) -> Result<(), Error> {
    r.test("Callbacks Reset", |t| {
        t.expect_with(BEFORE_EACH.load(Ordering::SeqCst), 3, "Before Each count was wrong");
        t.expect_with(AFTER_EACH.load(Ordering::SeqCst), 3, "After Each count was wrong");
        t.expect_with(ALL.load(Ordering::SeqCst), 0, "All Count was wrong");
    })
}

struct Inventory {
    items: Vec<&'static str>,
    restocks: u32,
}

struct Greeting {
    value: &'static str,
}

fn declarative_groups() -> Result<Vec<Box<dyn TestGroup>>, Error> {
    let inventory = Group::new(
        "Inventory",
        Inventory {
            items: Vec::new(),
            restocks: 0,
        },
    )
    .with_before_all(|inv: &mut Inventory| inv.items.extend(["apple", "pear"]))
    .with_before_each(|inv: &mut Inventory| inv.restocks += 1)
    .with_after_all(|inv: &mut Inventory| inv.items.clear())
    .with_test("has items", |t| {
        t.expect(t.items.len(), 2);
    })?
    .with_test("counts restocks", |t| -> Result<(), AssertionFailure> {
        t.ensure(t.restocks == 2, "restocks are counted per test")?;
        Ok(())
    })?;

    let greeting = Group::unnamed(Greeting { value: "hello" })
        .with_test("reads its own context", |t| {
            t.expect(t.value, "hello");
        })?
        .with_only("focused", |t| {
            t.assert_with(t.value.starts_with('h'), "unexpected greeting");
        })?;

    Ok(vec![Box::new(inventory), Box::new(greeting)])
}

fn main() -> Result<ExitCode, Error> {
    let imperative = grouptest::harness()
        .with_group(setup("Group 1", group_1))
        .with_group(setup("Group 2", group_2))
        .with_group(setup("Callbacks", callbacks))
        .with_group(setup("Post Callbacks", post_callbacks))
        .run()?;

    let declarative = grouptest::run_tests(declarative_groups()?)?;

    Ok(match imperative.is_success() && declarative.is_success() {
        true => ExitCode::SUCCESS,
        false => ExitCode::FAILURE,
    })
}
