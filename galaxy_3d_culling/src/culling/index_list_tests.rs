use super::*;

#[test]
fn test_with_reserved_is_empty() {
    let list = IndexList::with_reserved(8);
    assert_eq!(list.size(), 0);
    assert_eq!(list.reserved_size(), 8);
    assert!(list.is_empty());
}

#[test]
fn test_push_within_reserve() {
    let mut list = IndexList::with_reserved(4);
    list.push(3);
    list.push(1);
    assert_eq!(list.as_slice(), &[3, 1]);
    assert_eq!(list.reserved_size(), 4);
}

#[test]
fn test_push_grows_when_full() {
    let mut list = IndexList::with_reserved(2);
    for i in 0..5 {
        list.push(i);
    }
    assert_eq!(list.size(), 5);
    assert!(list.reserved_size() >= 5);
    assert!(list.size() <= list.reserved_size());
}

#[test]
fn test_retain_compacts_in_place() {
    let mut list = IndexList::from_range(10);
    let reserved = list.reserved_size();
    list.retain(|i| i % 3 == 0);
    assert_eq!(list.as_slice(), &[0, 3, 6, 9]);
    assert_eq!(list.reserved_size(), reserved);
}

#[test]
fn test_reset_keeps_larger_buffer() {
    let mut list = IndexList::from_range(10);
    list.reset(4);
    assert_eq!(list.size(), 0);
    assert_eq!(list.reserved_size(), 10);
}

#[test]
fn test_assign_and_get() {
    let mut list = IndexList::default();
    list.assign(&[7, 2, 9]);
    assert_eq!(list.get(1), Some(2));
    assert_eq!(list.get(3), None);
    assert_eq!(list.iter().sum::<usize>(), 18);
}
