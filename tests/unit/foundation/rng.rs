use super::*;

#[test]
fn matches_reference_sequence() {
    let mut r = Mulberry32::new(1);
    assert_eq!(r.next_u32(), 2_693_262_067);
    assert_eq!(r.next_u32(), 11_749_833);
    assert_eq!(r.next_u32(), 2_265_367_787);
}

#[test]
fn next_f64_is_unit_interval() {
    let mut r = Mulberry32::new(1);
    assert_eq!(r.next_f64(), 0.627_073_940_588_161_3);
    for _ in 0..1000 {
        let v = r.next_f64();
        assert!((0.0..1.0).contains(&v));
    }
}

#[test]
fn range_inclusive_hits_both_ends_in_either_order() {
    let mut r = Mulberry32::new(7);
    let mut seen = [false; 3];
    for _ in 0..200 {
        let v = r.range_inclusive(3, 1);
        assert!((1..=3).contains(&v));
        seen[(v - 1) as usize] = true;
    }
    assert!(seen.iter().all(|s| *s));
}

#[test]
fn pick_some_draws_distinct_items() {
    let items = ["a", "b", "c", "d"];
    let mut r = Mulberry32::new(42);
    let got = r.pick_some(&items, 3);
    assert_eq!(got.len(), 3);
    let mut dedup = got.clone();
    dedup.sort();
    dedup.dedup();
    assert_eq!(dedup.len(), 3);

    assert_eq!(r.pick_some(&items, 9).len(), 4);
    assert!(r.pick_some(&items, -1).is_empty());
}

#[test]
fn pick_some_sorted_sorts_and_pick_one_handles_empty() {
    let mut r = Mulberry32::new(3);
    let got = r.pick_some_sorted(&[5, 1, 4, 2], 4);
    assert_eq!(got, vec![1, 2, 4, 5]);

    let empty: [u8; 0] = [];
    assert_eq!(r.pick_one(&empty), None);
}

#[test]
fn same_seed_same_stream() {
    let mut a = Mulberry32::new(99);
    let mut b = Mulberry32::new(99);
    for _ in 0..32 {
        assert_eq!(a.next_u32(), b.next_u32());
    }
}
