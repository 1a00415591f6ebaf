// crates/testify-cli/src/suites.rs
// ============================================================================
// Module: Built-in Suites
// Description: Self-verification and demonstration suites shipped with the CLI.
// Purpose: Give the binary something to run and the framework a check on itself.
// Dependencies: testify-core
// ============================================================================

//! ## Overview
//! Three suites ship with the CLI:
//! - `self-check`: one suite asserting on the verdicts a second, private
//!   recorder returns. Every assertion is expected to pass.
//! - `basic`: the assertion API on a passing case and a deliberately failing
//!   case.
//! - `data-bag`: `before_each` fixtures that cases mutate through the data bag.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use testify_core::AssertionRecorder;
use testify_core::DataBag;
use testify_core::RegistrationError;
use testify_core::SourceOptions;
use testify_core::Suite;
use testify_core::TestContext;
use testify_core::TestValue;
use testify_core::identical;
use testify_core::loose_equal;
use testify_core::values;

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Suites the CLI can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinSuite {
    /// The framework checking its own verdicts.
    SelfCheck,
    /// Basic assertions with one failing case.
    Basic,
    /// `before_each` fixtures and the data bag.
    DataBag,
}

impl BuiltinSuite {
    /// All built-in suites in presentation order.
    pub const ALL: [Self; 3] = [Self::SelfCheck, Self::Basic, Self::DataBag];

    /// Returns the command-line name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SelfCheck => "self-check",
            Self::Basic => "basic",
            Self::DataBag => "data-bag",
        }
    }

    /// Returns the suite title used in reports.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::SelfCheck => "Testify tests itself",
            Self::Basic => "A basic test suite",
            Self::DataBag => "A bit more advanced test suite",
        }
    }

    /// Looks a suite up by its command-line name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|suite| suite.name() == name.trim())
    }

    /// Returns true when every assertion of the suite is expected to pass.
    #[must_use]
    pub const fn expects_success(self) -> bool {
        !matches!(self, Self::Basic)
    }

    /// Builds a fresh suite in the `Building` state.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError`] when a case or hook cannot be registered.
    pub fn build(self) -> Result<Suite, RegistrationError> {
        match self {
            Self::SelfCheck => self_check(),
            Self::Basic => basic(),
            Self::DataBag => data_bag(),
        }
    }
}

// ============================================================================
// SECTION: Self Check
// ============================================================================

/// Case name the subject records under.
const SUBJECT_CASE: &str = "//";
/// Label of negated loose-equality checks.
const NOT_EQUAL_KIND: &str = "NotEqual";
/// Label of negated identity checks.
const NOT_IDENTICAL_KIND: &str = "NotIdentical";
/// Class name of object fixtures.
const FIXTURE_CLASS: &str = "Fixture";

/// Recorder and data bag whose verdicts the self-check inspects.
#[derive(Debug)]
struct Subject {
    /// Records the subject's assertions.
    recorder: AssertionRecorder,
    /// Subject data bag, filled by the `before` hook.
    data: DataBag,
}

/// Subject shared between the self-check hooks and cases.
type SharedSubject = Rc<RefCell<Subject>>;

/// Runs `check` against a context over the subject and returns its verdict.
fn with_subject<R>(subject: &SharedSubject, check: impl FnOnce(&mut TestContext<'_>) -> R) -> R {
    let mut guard = subject.borrow_mut();
    let Subject {
        recorder,
        data,
    } = &mut *guard;
    let mut context = TestContext::new(recorder, SUBJECT_CASE, data);
    check(&mut context)
}

/// Records a `NotEqual` check.
#[track_caller]
fn assert_not_equal(
    context: &mut TestContext<'_>,
    left: impl Into<TestValue>,
    right: impl Into<TestValue>,
) -> bool {
    let passed = !loose_equal(&left.into(), &right.into());
    context.check(passed, NOT_EQUAL_KIND)
}

/// Records a `NotIdentical` check.
#[track_caller]
fn assert_not_identical(
    context: &mut TestContext<'_>,
    left: impl Into<TestValue>,
    right: impl Into<TestValue>,
) -> bool {
    let passed = !identical(&left.into(), &right.into());
    context.check(passed, NOT_IDENTICAL_KIND)
}

/// Builds the suite that checks the verdicts of a second recorder.
fn self_check() -> Result<Suite, RegistrationError> {
    let subject: SharedSubject = Rc::new(RefCell::new(Subject {
        recorder: AssertionRecorder::new(SourceOptions::default()),
        data: DataBag::new(),
    }));
    let mut suite = Suite::new(BuiltinSuite::SelfCheck.title());

    let fixture = Rc::clone(&subject);
    suite.before(move |_t| {
        fixture.borrow_mut().data.insert("arr", values![1, 2, 3]);
        Ok(())
    })?;

    let s = Rc::clone(&subject);
    suite.test("Pass/Fail test", move |t| {
        t.check(true, "To be sure that initial test pass !");
        t.assert_false(false);

        t.assert_true(with_subject(&s, |c| c.pass()));
        t.assert_false(!with_subject(&s, |c| c.pass()));
        t.assert_true(!with_subject(&s, |c| c.fail()));
        t.assert_false(with_subject(&s, |c| c.fail()));
        Ok(())
    })?;

    let s = Rc::clone(&subject);
    suite.test("Basic assert test", move |t| {
        t.assert_true(with_subject(&s, |c| c.assert_true(true)));
        t.assert_true(!with_subject(&s, |c| c.assert_true(false)));

        t.assert_false(with_subject(&s, |c| c.assert_true(false)));
        t.assert_false(!with_subject(&s, |c| c.assert_true(true)));
        t.assert_true(with_subject(&s, |c| c.assert_true("non-empty")));
        t.assert_true(with_subject(&s, |c| c.assert_false("0")));
        Ok(())
    })?;

    let s = Rc::clone(&subject);
    suite.test("assertEqual test", move |t| {
        t.assert_true(with_subject(&s, |c| c.assert_equal(1, 1)));
        t.assert_true(with_subject(&s, |c| c.assert_equal(-1337, "-1337")));
        t.assert_true(with_subject(&s, |c| c.assert_equal(42.0, 42)));
        t.assert_true(with_subject(&s, |c| c.assert_equal(0, ())));
        t.assert_true(with_subject(&s, |c| c.assert_equal(1, true)));
        t.assert_true(with_subject(&s, |c| {
            c.assert_equal(values![0, 1, 1], values![false, "1", true])
        }));
        t.assert_true(with_subject(&s, |c| {
            c.assert_equal(TestValue::empty_object(FIXTURE_CLASS), TestValue::empty_object(FIXTURE_CLASS))
        }));
        t.assert_true(with_subject(&s, |c| assert_not_equal(c, -1, "")));

        t.assert_false(with_subject(&s, |c| c.assert_equal(0, "")));
        t.assert_false(with_subject(&s, |c| c.assert_equal(-1, "")));
        t.assert_false(with_subject(&s, |c| c.assert_equal(values![1], 1)));
        t.assert_false(with_subject(&s, |c| {
            c.assert_equal(values![9, 8], TestValue::object(FIXTURE_CLASS, [("0", 9), ("1", 8)]))
        }));
        t.assert_false(with_subject(&s, |c| assert_not_equal(c, 1.0, 1)));
        Ok(())
    })?;

    let s = Rc::clone(&subject);
    suite.test("assertIdentical test", move |t| {
        t.assert_true(with_subject(&s, |c| c.assert_identical(-1, -1)));
        t.assert_true(with_subject(&s, |c| assert_not_identical(c, -1, -1.0)));
        t.assert_true(with_subject(&s, |c| c.assert_identical(2E10, 2E10)));
        t.assert_true(with_subject(&s, |c| c.assert_identical("$", "$")));
        t.assert_true(with_subject(&s, |c| {
            c.assert_identical(values![0, 1, true], values![0, 1, true])
        }));
        t.assert_true(with_subject(&s, |c| c.assert_identical(255, 0xFF)));
        t.assert_true(with_subject(&s, |c| {
            c.assert_identical(TestValue::empty_object(FIXTURE_CLASS), TestValue::empty_object(FIXTURE_CLASS))
        }));

        t.assert_false(with_subject(&s, |c| c.assert_identical(1, "1")));
        t.assert_false(with_subject(&s, |c| c.assert_identical(1.0, 1)));
        t.assert_false(with_subject(&s, |c| c.assert_identical(2, 2.0)));
        t.assert_false(with_subject(&s, |c| {
            c.assert_identical(TestValue::empty_object(FIXTURE_CLASS), TestValue::empty_object("Other"))
        }));
        Ok(())
    })?;

    let s = Rc::clone(&subject);
    suite.test("assertInArray/assertNotInArray test", move |t| {
        let arr = values![1, 2, (), false, "1", "2"];

        t.assert_true(with_subject(&s, |c| c.assert_in_array(1, &arr)));
        t.assert_true(with_subject(&s, |c| c.assert_in_array(true, &arr)));
        t.assert_true(with_subject(&s, |c| c.assert_in_array(false, &arr)));
        t.assert_true(with_subject(&s, |c| c.assert_in_array(0, &arr)));
        t.assert_true(with_subject(&s, |c| c.assert_not_in_array(3, &arr)));
        t.assert_true(with_subject(&s, |c| c.assert_not_in_array("str", &arr)));

        t.assert_false(with_subject(&s, |c| c.assert_in_array(-1, &arr)));
        t.assert_false(with_subject(&s, |c| c.assert_in_array(values![0], &arr)));
        Ok(())
    })?;

    let s = Rc::clone(&subject);
    suite.test("data set test", move |t| {
        let arr = s.borrow().data.value("arr");
        t.assert_true(with_subject(&s, |c| c.assert_in_array(2, &arr)));
        t.assert_true(with_subject(&s, |c| c.assert_in_array(3, &arr)));
        t.assert_true(with_subject(&s, |c| c.assert_not_in_array(9, &arr)));
        Ok(())
    })?;

    Ok(suite)
}

// ============================================================================
// SECTION: Demonstrations
// ============================================================================

/// Builds the basic demonstration suite.
fn basic() -> Result<Suite, RegistrationError> {
    let mut suite = Suite::new(BuiltinSuite::Basic.title());
    suite.test("Just testing around", |t| {
        t.check(true, "Must pass !");
        t.assert_false(false);
        t.assert_equal(1, "1");
        t.assert_identical(1, 1);
        t.assert_in_array("a", values![1, 2, 3, 4, 5, "a"]);
        t.pass_as("Always pass");
        Ok(())
    })?;
    suite.test("I've got a bad feeling about this one", |t| {
        t.assert_true(false);
        t.assert_false(true);
        t.assert_equal(1, "-21");
        t.assert_identical(1, "1");
        t.assert_in_array("b", values![1, 2, 3, 4, 5, "a"]);
        t.fail();
        Ok(())
    })?;
    Ok(suite)
}

/// Removes and returns the last element of the list stored under `key`.
fn pop(data: &mut DataBag, key: &str) -> Option<TestValue> {
    data.get_mut(key).and_then(TestValue::as_list_mut).and_then(Vec::pop)
}

/// Builds the data bag demonstration suite.
fn data_bag() -> Result<Suite, RegistrationError> {
    let mut suite = Suite::new(BuiltinSuite::DataBag.title());
    suite.before_each(|t| {
        t.data_mut().insert("arr", values!["a", "b", "c", "d", "e", "f"]);
        Ok(())
    })?;
    suite.test("Testing Array Pop", |t| {
        for expected in ["f", "e", "d", "c"] {
            let popped = pop(t.data_mut(), "arr");
            t.assert_equal(popped, expected);
        }
        Ok(())
    })?;
    suite.test("Testing In Array", |t| {
        let arr = t.data().value("arr");
        for item in ["a", "b", "c", "d", "e", "f"] {
            t.assert_in_array(item, &arr);
        }
        t.assert_not_in_array("g", &arr);
        Ok(())
    })?;
    Ok(suite)
}
