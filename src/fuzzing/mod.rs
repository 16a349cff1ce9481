//! Module for testing using fuzzing (quickcheck)

use std::fmt::Debug;

use crate::brute::BruteRanger;
use crate::*;
use quickcheck::Arbitrary;

mod basic;

type TestEntry = (Network, i32);

#[derive(Debug, PartialEq, Clone, Copy)]
enum Operation {
    Add(TestNetwork, i32),
    Remove(TestNetwork),
}

#[cfg(miri)]
const DEFAULT_NUM_TESTS: usize = 10;
#[cfg(not(miri))]
const DEFAULT_NUM_TESTS: usize = 2000;
const DEFAULT_GEN_SIZE: usize = 100;

fn proptest_runner<A: Arbitrary + Debug + PartialEq, F: Fn(A) -> bool>(f: F) {
    let _ = env_logger::builder().is_test(true).try_init();

    let num_tests: usize = std::env::var("QUICKCHECK_TESTS")
        .ok()
        .and_then(|x| x.parse::<usize>().ok())
        .unwrap_or(DEFAULT_NUM_TESTS);

    let gen_size: usize = std::env::var("QUICKCHECK_GENERATOR_SIZE")
        .ok()
        .and_then(|x| x.parse::<usize>().ok())
        .unwrap_or(DEFAULT_GEN_SIZE);

    let mut gen = quickcheck::Gen::new(gen_size);

    // sample all inputs
    for _ in 0..num_tests {
        let input = A::arbitrary(&mut gen);
        let input_c = input.clone();
        let success = f(input_c);
        if !success {
            shrink_failure(f, input)
        }
    }
}

fn shrink_failure<A: Arbitrary + Debug + PartialEq, F: Fn(A) -> bool>(f: F, input: A) -> ! {
    for i in input.shrink() {
        let i_c = i.clone();
        let success = f(i_c);
        if !success {
            shrink_failure(f, i)
        }
    }
    // if we reach this point, then all shrunken inputs work. Therefore, `inputs` is the minimal
    // input
    panic!(
        "[QUICKCHECK] Test case failed!\n  Minimal input:\n    {:?}",
        input
    );
}

#[allow(missing_docs)]
#[macro_export]
macro_rules! qc {
    ($name:ident, $f:ident) => {
        #[test]
        fn $name() {
            proptest_runner($f)
        }
    };
}

/// Apply all operations to the ranger, in order.
fn apply<R: Ranger<TestEntry>>(ranger: &mut R, ops: &[Operation]) {
    for op in ops {
        match *op {
            Operation::Add(n, t) => ranger.insert((n.0, t)).unwrap(),
            Operation::Remove(n) => {
                ranger.remove(&n.0).unwrap();
            }
        }
    }
}

/// Build both the ranger under test and the reference from the same operations.
fn build(ops: &[Operation]) -> (VersionedRanger<TestEntry>, BruteRanger<TestEntry>) {
    let mut ranger = VersionedRanger::new();
    let mut brute = BruteRanger::default();
    apply(&mut ranger, ops);
    apply(&mut brute, ops);
    (ranger, brute)
}

/// Addresses worth querying: the given ones, plus the first address, the address just before,
/// and the address just after every network touched by the operations.
fn probes(ops: &[Operation], extra: &[TestAddr]) -> Vec<NetworkNumber> {
    let mut result: Vec<NetworkNumber> = extra.iter().map(|a| a.0).collect();
    for op in ops {
        let n = match op {
            Operation::Add(n, _) | Operation::Remove(n) => n.0,
        };
        result.push(*n.number());
        result.push(n.number().previous());
        result.push(n.number().next());
    }
    result
}

impl Arbitrary for Operation {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let n = TestNetwork::arbitrary(g);
        if g.choose(&[
            true, true, true, true, true, true, true, false, false, false,
        ])
        .copied()
        .unwrap_or_default()
        {
            Self::Add(n, i32::arbitrary(g))
        } else {
            Self::Remove(n)
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match *self {
            Operation::Add(n, t) => Box::new(n.shrink().map(move |n| Operation::Add(n, t))),
            Operation::Remove(n) => Box::new(n.shrink().map(Operation::Remove)),
        }
    }
}

/// A network with a mostly short prefix, such that random networks frequently overlap.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
struct TestNetwork(Network);

impl Debug for TestNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A word that is drawn from a small pool most of the time, such that random numbers often share
/// whole words and deep prefixes still overlap.
fn arbitrary_word(g: &mut quickcheck::Gen) -> u32 {
    let x = u32::arbitrary(g);
    *g.choose(&[0, 1, 0x8000_0000, 0x2001_0db8, u32::MAX, x, x, x])
        .unwrap()
}

fn arbitrary_number(g: &mut quickcheck::Gen, version: IpVersion) -> NetworkNumber {
    let words: Vec<u32> = (0..version.word_count())
        .map(|_| arbitrary_word(g))
        .collect();
    NetworkNumber::new(&words).unwrap()
}

fn arbitrary_version(g: &mut quickcheck::Gen) -> IpVersion {
    *g.choose(&[
        IpVersion::V4,
        IpVersion::V4,
        IpVersion::V4,
        IpVersion::V4,
        IpVersion::V6,
    ])
    .unwrap()
}

impl Arbitrary for TestNetwork {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let version = arbitrary_version(g);
        let number = arbitrary_number(g, version);
        #[rustfmt::skip]
        let len: u8 = *g
            .choose(&[
                0,
                1, 1,
                2, 2, 2,
                3, 3, 3, 3,
                4, 4, 4, 4, 4,
                5, 5, 5, 5, 5, 5,
                6, 6, 6, 6, 6, 6, 6,
                7, 7, 7, 7, 7, 7, 7, 7,
                8, 8, 8, 8, 8, 8, 8, 8, 8,
                9, 9, 9, 9, 9, 9, 9, 9, 9, 9,
                31, 32, 33, 48, 63, 64, 65, 95, 96, 97,
                u8::MAX, u8::MAX,
            ])
            .unwrap();
        let len = len.min(version.total_bits());
        Self(Network::new(number, len).unwrap())
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self.0.prefix_len() {
            0 => quickcheck::empty_shrinker(),
            // host routes shrink down to the short prefixes all at once
            len if len > 9 => quickcheck::single_shrinker(Self(self.0.masked(9).unwrap())),
            len => quickcheck::single_shrinker(Self(self.0.masked(len - 1).unwrap())),
        }
    }
}

/// An address to query.
#[derive(PartialEq, Eq, Clone, Copy)]
struct TestAddr(NetworkNumber);

impl Debug for TestAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Arbitrary for TestAddr {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let version = arbitrary_version(g);
        Self(arbitrary_number(g, version))
    }
}
