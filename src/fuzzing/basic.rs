use super::*;
use itertools::Itertools;

qc!(contains, _contains);
fn _contains((ops, addrs): (Vec<Operation>, Vec<TestAddr>)) -> bool {
    let (ranger, brute) = build(&ops);
    probes(&ops, &addrs)
        .iter()
        .all(|a| ranger.contains(a).unwrap() == Ranger::contains(&brute, a).unwrap())
}

qc!(containing_networks, _containing_networks);
fn _containing_networks((ops, addrs): (Vec<Operation>, Vec<TestAddr>)) -> bool {
    let (ranger, brute) = build(&ops);
    probes(&ops, &addrs).iter().all(|a| {
        ranger.containing_networks(a).unwrap() == Ranger::containing_networks(&brute, a).unwrap()
    })
}

qc!(longest_match, _longest_match);
fn _longest_match((ops, addrs): (Vec<Operation>, Vec<TestAddr>)) -> bool {
    let (ranger, brute) = build(&ops);
    probes(&ops, &addrs).iter().all(|a| {
        ranger.longest_match(a).unwrap()
            == Ranger::containing_networks(&brute, a)
                .unwrap()
                .last()
                .copied()
    })
}

qc!(covered_networks, _covered_networks);
fn _covered_networks((ops, queries): (Vec<Operation>, Vec<TestNetwork>)) -> bool {
    let (ranger, brute) = build(&ops);
    ops.iter()
        .map(|op| match op {
            Operation::Add(n, _) | Operation::Remove(n) => *n,
        })
        .chain(queries)
        .all(|n| {
            ranger.covered_networks(&n.0).unwrap() == Ranger::covered_networks(&brute, &n.0).unwrap()
        })
}

qc!(covered_networks_as_set, _covered_networks_as_set);
fn _covered_networks_as_set((ops, queries): (Vec<Operation>, Vec<TestNetwork>)) -> bool {
    let (ranger, brute) = build(&ops);
    queries.into_iter().all(|n| {
        let want = Ranger::covered_networks(&brute, &n.0)
            .unwrap()
            .into_iter()
            .sorted()
            .collect::<Vec<_>>();
        let got = ranger
            .covered_networks(&n.0)
            .unwrap()
            .into_iter()
            .sorted()
            .collect::<Vec<_>>();
        want == got
    })
}

qc!(len, _len);
fn _len(ops: Vec<Operation>) -> bool {
    let (ranger, brute) = build(&ops);
    ranger.len() == Ranger::len(&brute)
        && ranger.ipv4().len() + ranger.ipv6().len() == ranger.len()
        && ranger.is_empty() == (ranger.len() == 0)
}

qc!(iter, _iter);
fn _iter(ops: Vec<Operation>) -> bool {
    let (ranger, brute) = build(&ops);
    let all = |v: IpVersion| Ranger::covered_networks(&brute, &Network::zero(v)).unwrap();
    ranger
        .iter()
        .eq(all(IpVersion::V4).into_iter().chain(all(IpVersion::V6)))
}

qc!(get, _get);
fn _get(ops: Vec<Operation>) -> bool {
    let (ranger, brute) = build(&ops);
    ops.iter().all(|op| {
        let n = match op {
            Operation::Add(n, _) | Operation::Remove(n) => n.0,
        };
        let want = Ranger::covered_networks(&brute, &n)
            .unwrap()
            .into_iter()
            .find(|(x, _)| *x == n);
        ranger.get(&n).unwrap() == want
    })
}

qc!(insert_twice, _insert_twice);
fn _insert_twice((ops, extra, addrs): (Vec<Operation>, TestNetwork, Vec<TestAddr>)) -> bool {
    let (mut ranger, _) = build(&ops);
    ranger.insert((extra.0, 1)).unwrap();
    let len = ranger.len();
    let before = probes(&ops, &addrs)
        .iter()
        .map(|a| ranger.containing_networks(a).unwrap().into_iter().cloned().collect_vec())
        .collect_vec();
    ranger.insert((extra.0, 1)).unwrap();
    let after = probes(&ops, &addrs)
        .iter()
        .map(|a| ranger.containing_networks(a).unwrap().into_iter().cloned().collect_vec())
        .collect_vec();
    ranger.len() == len && before == after
}

qc!(upsert_replaces, _upsert_replaces);
fn _upsert_replaces((ops, extra): (Vec<Operation>, TestNetwork)) -> bool {
    let (mut ranger, _) = build(&ops);
    ranger.insert((extra.0, 1)).unwrap();
    let len = ranger.len();
    ranger.insert((extra.0, 2)).unwrap() == Some((extra.0, 1))
        && ranger.len() == len
        && ranger.get(&extra.0).unwrap() == Some(&(extra.0, 2))
}

qc!(equality, _equality);
fn _equality(ops: Vec<Operation>) -> bool {
    let (ranger, _) = build(&ops);
    let clone = ranger.clone().into_iter().collect::<VersionedRanger<_>>();
    ranger == clone
}
