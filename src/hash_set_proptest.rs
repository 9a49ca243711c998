#![cfg(test)]

// Property tests for HashSet kept inside the crate so they can inspect
// bucket chains without widening the public API.

use crate::config::LoadPolicy;
use crate::element::{Equality, Hashing};
use crate::hash_set::HashSet;
use proptest::prelude::*;
use std::collections::HashSet as StdSet;
use std::hash::{Hash, Hasher};

// Equality on the full value, hash on the low bits only, so chains fill
// up and collisions get exercised.
#[derive(Clone, Copy, Debug, Default)]
struct LowBits;
impl Equality<u16> for LowBits {
    fn equal(&self, a: &u16, b: &u16) -> bool {
        a == b
    }
}
impl Hashing<u16> for LowBits {
    fn hash<H: Hasher>(&self, v: &u16, state: &mut H) {
        (v & 0x7).hash(state)
    }
}
impl crate::element::Copier<u16> for LowBits {
    fn copy(&self, v: &u16) -> u16 {
        *v
    }
}

#[derive(Clone, Debug)]
enum Op {
    Put(u16),
    Replace(u16),
    Remove(u16),
    Take(u16),
    Contains(u16),
    Get(u16),
    Rehash,
    Iterate,
}

fn arb_op() -> impl Strategy<Value = Op> {
    let v = 0u16..64;
    prop_oneof![
        4 => v.clone().prop_map(Op::Put),
        1 => v.clone().prop_map(Op::Replace),
        2 => v.clone().prop_map(Op::Remove),
        1 => v.clone().prop_map(Op::Take),
        1 => v.clone().prop_map(Op::Contains),
        1 => v.prop_map(Op::Get),
        1 => Just(Op::Rehash),
        1 => Just(Op::Iterate),
    ]
}

fn check_structure<O: Hashing<u16>, S: std::hash::BuildHasher>(
    sut: &HashSet<u16, O, S>,
    model: &StdSet<u16>,
) -> Result<(), TestCaseError> {
    prop_assert_eq!(sut.len(), model.len());
    prop_assert_eq!(sut.is_empty(), model.is_empty());
    let chains = sut.chain_lengths();
    prop_assert_eq!(chains.iter().sum::<usize>(), sut.len());
    let p = sut.policy();
    prop_assert!(sut.bucket_count() >= p.min_buckets());
    prop_assert!(sut.len() * 100 <= sut.bucket_count() * p.max_fill_percent() as usize);
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashSet.
// - put/replace/remove/take/contains/get agree with the model.
// - Chains partition the elements; fill never exceeds the max fill.
// - Iteration yields each element exactly once.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(ops in proptest::collection::vec(arb_op(), 1..200), colliding in any::<bool>()) {
        let mut natural: HashSet<u16> = HashSet::new();
        let mut low: HashSet<u16, LowBits> = HashSet::with_ops(LowBits);
        let mut model: StdSet<u16> = StdSet::new();

        for op in ops {
            match op {
                Op::Put(v) => {
                    let fresh = model.insert(v);
                    if colliding {
                        prop_assert_eq!(low.put(v), fresh);
                    } else {
                        prop_assert_eq!(natural.put(v), fresh);
                    }
                }
                Op::Replace(v) => {
                    let existed = !model.insert(v);
                    if colliding {
                        prop_assert_eq!(low.replace(v), existed);
                    } else {
                        prop_assert_eq!(natural.replace(v), existed);
                    }
                }
                Op::Remove(v) => {
                    let had = model.remove(&v);
                    if colliding {
                        prop_assert_eq!(low.remove(&v), had);
                    } else {
                        prop_assert_eq!(natural.remove(&v), had);
                    }
                }
                Op::Take(v) => {
                    let had = model.take(&v);
                    if colliding {
                        prop_assert_eq!(low.take(&v), had);
                    } else {
                        prop_assert_eq!(natural.take(&v), had);
                    }
                }
                Op::Contains(v) => {
                    let c = if colliding { low.contains(&v) } else { natural.contains(&v) };
                    prop_assert_eq!(c, model.contains(&v));
                }
                Op::Get(v) => {
                    let g = if colliding { low.get(&v).ok().copied() } else { natural.get(&v).ok().copied() };
                    prop_assert_eq!(g, model.get(&v).copied());
                }
                Op::Rehash => {
                    if colliding { low.rehash() } else { natural.rehash() }
                }
                Op::Iterate => {
                    let seen: Vec<u16> = if colliding {
                        low.iter().copied().collect()
                    } else {
                        natural.iter().copied().collect()
                    };
                    let unique: StdSet<u16> = seen.iter().copied().collect();
                    prop_assert_eq!(seen.len(), unique.len());
                    prop_assert_eq!(&unique, &model);
                }
            }
            if colliding {
                check_structure(&low, &model)?;
            } else {
                check_structure(&natural, &model)?;
            }
        }
    }
}

fn arb_set() -> impl Strategy<Value = StdSet<u16>> {
    proptest::collection::hash_set(0u16..48, 0..40)
}

fn build(s: &StdSet<u16>) -> HashSet<u16, LowBits> {
    let mut out = HashSet::with_ops(LowBits);
    out.extend(s.iter().copied());
    out
}

fn contents(s: &HashSet<u16, LowBits>) -> StdSet<u16> {
    s.iter().copied().collect()
}

// Property: the four algebra operations match std set operations and
// leave their argument untouched, under heavy collisions.
proptest! {
    #[test]
    fn prop_algebra_matches_std(a in arb_set(), b in arb_set()) {
        let rhs = build(&b);

        let mut r = build(&a);
        r.retain(&rhs);
        prop_assert_eq!(contents(&r), &a & &b);

        let mut u = build(&a);
        u.include(&rhs);
        prop_assert_eq!(contents(&u), &a | &b);

        let mut d = build(&a);
        d.exclude(&rhs);
        prop_assert_eq!(contents(&d), &a - &b);

        let mut x = build(&a);
        x.invert(&rhs);
        prop_assert_eq!(contents(&x), &a ^ &b);

        prop_assert_eq!(contents(&rhs), b);
        for s in [&r, &u, &d, &x] {
            prop_assert_eq!(s.chain_lengths().iter().sum::<usize>(), s.len());
        }
    }

    #[test]
    fn prop_custom_policy_bounds(vals in proptest::collection::vec(0u16..2000, 0..400), drop_every in 1usize..4) {
        let policy = LoadPolicy::new(4, 10, 60, 300).unwrap();
        let mut s: HashSet<u16> = HashSet::with_policy(policy);
        for &v in &vals {
            s.put(v);
            prop_assert!(s.len() * 100 <= s.bucket_count() * 60);
        }
        let snapshot: Vec<u16> = s.iter().copied().collect();
        for v in snapshot.iter().step_by(drop_every) {
            prop_assert!(s.remove(v));
            prop_assert!(s.bucket_count() >= 4);
        }
        prop_assert!(s.len() * 100 <= s.bucket_count() * 60);
    }
}
