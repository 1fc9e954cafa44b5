use crate::collisions::detection::*;
use crate::test_support::body;

#[test]
fn test_no_contacts_when_separated() {
    let bodies = vec![
        body(0, 10.0, [0.0, 0.0], [0.0; 2]),
        body(1, 10.0, [10.0, 0.0], [0.0; 2]),
        body(2, 10.0, [0.0, -25.0], [0.0; 2]),
    ];

    let detector = ContactDetector::default();
    assert!(detector.first_contact(&bodies).is_none());
    assert!(detector.contacts(&bodies).is_empty());
}

#[test]
fn test_threshold_is_strict() {
    let detector = ContactDetector::new(10.0);
    let touching = vec![
        body(0, 10.0, [0.0, 0.0], [0.0; 2]),
        body(1, 10.0, [9.999, 0.0], [0.0; 2]),
    ];
    let apart = vec![
        body(0, 10.0, [0.0, 0.0], [0.0; 2]),
        body(1, 10.0, [6.0, 8.0], [0.0; 2]),
    ];

    assert!(detector.first_contact(&touching).is_some());
    // Exactly 10 apart is not a contact
    assert!(detector.first_contact(&apart).is_none());
}

#[test]
fn test_contacts_use_all_three_axes() {
    let detector = ContactDetector::default();
    let bodies = vec![
        body(0, 10.0, [0.0, 0.0, 0.0], [0.0; 3]),
        body(1, 10.0, [1.0, 1.0, 30.0], [0.0; 3]),
    ];

    // Close in projection, far apart in depth
    assert!(detector.first_contact(&bodies).is_none());
}

#[test]
fn test_contacts_in_scan_order() {
    let bodies = vec![
        body(0, 10.0, [0.0, 0.0], [0.0; 2]),
        body(1, 10.0, [100.0, 0.0], [0.0; 2]),
        body(2, 10.0, [4.0, 0.0], [0.0; 2]),
        body(3, 10.0, [103.0, 0.0], [0.0; 2]),
    ];

    let contacts = ContactDetector::default().contacts(&bodies);
    let pairs: Vec<(usize, usize)> = contacts.iter().map(|c| (c.first, c.second)).collect();

    assert_eq!(pairs, vec![(0, 2), (1, 3)]);
    assert!((contacts[0].separation - 4.0).abs() < 1e-12);
}

#[test]
fn test_first_contact_matches_first_of_all_contacts() {
    let bodies = vec![
        body(0, 10.0, [0.0, 0.0], [0.0; 2]),
        body(1, 10.0, [50.0, 0.0], [0.0; 2]),
        body(2, 10.0, [52.0, 0.0], [0.0; 2]),
        body(3, 10.0, [1.0, 0.0], [0.0; 2]),
    ];

    let detector = ContactDetector::default();
    let first = detector.first_contact(&bodies);
    assert_eq!(first, detector.contacts(&bodies).first().copied());
    assert_eq!(first.map(|c| (c.first, c.second)), Some((0, 3)));
}
