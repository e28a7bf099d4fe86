//! Registry contract tests.
//!
//! Guarantees that hold for any program registered in a context:
//! - deterministic iteration order
//! - locked entries survive later registrations
//! - registries can be shared across threads

use std::sync::Arc;
use std::thread;

use x404_context::prelude::*;
use x404_context::ProgramRegistry;

#[test]
fn empty_registry_is_stable() {
    let r1 = ProgramRegistry::default();
    let r2 = ProgramRegistry::new();

    assert_eq!(r1.names().len(), 0);
    assert_eq!(r1.names(), r2.names());
}

#[test]
fn registration_order_does_not_matter() {
    let keys: Vec<(String, Pubkey)> = ["c", "a", "b"]
        .iter()
        .map(|n| (n.to_string(), Pubkey::new_unique()))
        .collect();

    let mut forward = ProgramRegistry::new();
    for (n, k) in &keys {
        forward.add(ProgramDescriptor::new(n.as_str(), *k), true).unwrap();
    }
    let mut backward = ProgramRegistry::new();
    for (n, k) in keys.iter().rev() {
        backward.add(ProgramDescriptor::new(n.as_str(), *k), true).unwrap();
    }

    assert_eq!(forward.names(), backward.names());
    for n in forward.names() {
        assert_eq!(forward.get_public_key(&n).unwrap(), backward.get_public_key(&n).unwrap());
    }
}

#[test]
fn locked_entry_survives_any_later_registration() {
    let locked = Pubkey::new_unique();
    let mut r = ProgramRegistry::new();
    r.add(ProgramDescriptor::new("p", locked), false).unwrap();

    for overridable in [true, false] {
        let result = r.add(ProgramDescriptor::new("p", Pubkey::new_unique()), overridable);
        assert!(matches!(result, Err(ContextError::ProgramLocked { .. })), "overridable={overridable}");
        assert_eq!(r.get_public_key("p").unwrap(), locked);
        assert!(r.is_locked("p"));
    }
}

#[test]
fn registry_is_shareable_across_threads() {
    let key = Pubkey::new_unique();
    let mut r = ProgramRegistry::new();
    r.add(ProgramDescriptor::new("p", key), false).unwrap();
    let shared = Arc::new(r);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let r = Arc::clone(&shared);
            thread::spawn(move || r.get_public_key("p").unwrap())
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), key);
    }
}
