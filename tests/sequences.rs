use value_collections::{
    CollectionError, Construct, Copier, Direction, Equality, List, Ordering, Queue, RefCounted,
    Vector,
};

/// Invariant: resizing away and back restores the length, and resizing to
/// the current length leaves contents alone.
#[test]
fn vector_resize_round_trip() {
    let mut v: Vector<u8> = (1..=4).collect();
    let before: Vec<u8> = v.iter().copied().collect();
    v.resize(v.len());
    assert_eq!(v.as_slice(), &before[..]);
    v.resize(10);
    v.resize(4);
    assert_eq!(v.len(), 4);
    assert_eq!(v.as_slice(), &before[..]);
}

/// Operations value that builds a marker on growth and sorts by length.
#[derive(Clone, Copy, Default)]
struct ByLen;
impl Construct<String> for ByLen {
    fn construct(&self) -> String {
        "?".to_string()
    }
}
impl Copier<String> for ByLen {
    fn copy(&self, v: &String) -> String {
        v.clone()
    }
}
impl Equality<String> for ByLen {
    fn equal(&self, a: &String, b: &String) -> bool {
        a.len() == b.len()
    }
}
impl Ordering<String> for ByLen {
    fn compare(&self, a: &String, b: &String) -> std::cmp::Ordering {
        a.len().cmp(&b.len())
    }
}

#[test]
fn vector_with_custom_operations() {
    let mut v = Vector::with_ops(2, ByLen);
    assert_eq!(v.as_slice(), &["?", "?"]);
    v.set(0, "three".to_string()).unwrap();
    v.set(1, "to".to_string()).unwrap();
    v.resize(3);
    v.sort();
    let sorted: Vec<&str> = v.iter().map(String::as_str).collect();
    assert_eq!(sorted, ["?", "to", "three"]);
    v.sort_in(Direction::Reverse);
    let longest_first: Vec<&str> = v.iter().map(String::as_str).collect();
    assert_eq!(longest_first, ["three", "to", "?"]);
    v.sort();
    let mut w = v.clone();
    w.set(1, "xy".to_string()).unwrap();
    assert!(v == w);
    assert_eq!(
        v.set(3, String::new()),
        Err(CollectionError::OutOfBounds { index: 3, len: 3 })
    );
}

#[test]
fn vector_reverse_iteration() {
    let v: Vector<i32> = (0..5).collect();
    let back: Vec<i32> = v.iter_in(Direction::Reverse).copied().collect();
    assert_eq!(back, [4, 3, 2, 1, 0]);
    let mut it = v.iter();
    it.nth(2);
    it.restart();
    assert_eq!(it.len(), 5);
}

#[test]
fn list_as_a_work_list() {
    let mut l: List<&str> = List::new();
    for w in ["b", "c", "b", "d"] {
        l.push(w);
    }
    l.prepend("a");
    assert_eq!(l.find(&"b"), Ok(&"b"));
    assert_eq!(l.replace_all(&"b", &"B"), 2);
    assert!(l.replace(&"d", "D"));
    assert_eq!(l.iter().copied().collect::<Vec<_>>(), ["a", "B", "c", "B", "D"]);
    assert_eq!(l.remove_all(&"B"), 2);
    assert_eq!(format!("{:?}", l), r#"["a", "c", "D"]"#);
}

/// Invariant: a copied list is independent of its source.
#[test]
fn list_copy_independence() {
    let a: List<i32> = (1..=3).collect();
    let mut b = a.clone();
    assert_eq!(a, b);
    b.push(4);
    assert_ne!(a, b);
    b.chop().unwrap();
    assert_eq!(a, b);
}

#[test]
fn queue_drains_from_both_ends() {
    let mut q: Queue<u32> = (0..6).collect();
    let mut out = Vec::new();
    while let Ok(h) = q.pop_head() {
        out.push(h);
        if let Ok(t) = q.pop_tail() {
            out.push(t);
        }
    }
    assert_eq!(out, [0, 5, 1, 4, 2, 3]);
    assert_eq!(q.peek(), Err(CollectionError::EmptyCollection));
    assert_eq!(q.pop_tail(), Err(CollectionError::EmptyCollection));
}

/// Invariant: purging a queue of shared handles releases every one it held.
#[test]
fn queue_of_shared_handles() {
    let h = RefCounted::new(vec![1u8]);
    let mut q = Queue::new();
    for _ in 0..4 {
        q.push_tail(h.share());
    }
    assert_eq!(RefCounted::strong_count(&h), 5);
    let popped = q.pop().unwrap();
    assert!(RefCounted::ptr_eq(&popped, &h));
    q.purge();
    assert_eq!(RefCounted::strong_count(&h), 2);
    drop(popped);
    assert_eq!(RefCounted::strong_count(&h), 1);
}
