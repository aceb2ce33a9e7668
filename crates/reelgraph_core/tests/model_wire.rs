use chrono::{Duration, NaiveDate};
use reelgraph_core::{MediaItem, Person};

#[test]
fn media_item_serializes_duration_as_minutes() {
    let release = NaiveDate::from_ymd_opt(2010, 7, 16).unwrap();
    let mut item = MediaItem::new("Inception", "dreams", release, Duration::minutes(148));
    item.id = 3;
    item.liked_by.extend([2, 1]);

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["id"], 3);
    assert_eq!(json["release_date"], "2010-07-16");
    assert_eq!(json["duration"], 148);
    assert_eq!(json["liked_by"], serde_json::json!([1, 2]));

    let decoded: MediaItem = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, item);
}

#[test]
fn creation_payload_may_omit_store_owned_fields() {
    let value = serde_json::json!({
        "name": "Short",
        "release_date": "1896-01-25",
        "duration": -3
    });

    let item: MediaItem = serde_json::from_value(value).unwrap();
    assert_eq!(item.id, 0);
    assert_eq!(item.description, "");
    assert_eq!(item.duration, Duration::minutes(-3));
    assert!(item.liked_by.is_empty());
}

#[test]
fn person_payload_defaults_name_and_friends() {
    let value = serde_json::json!({
        "email": "valid@email.test",
        "login": "jdoe",
        "birthday": "2010-01-01"
    });

    let person: Person = serde_json::from_value(value).unwrap();
    assert_eq!(person.id, 0);
    assert_eq!(person.name, "");
    assert!(person.friends.is_empty());
    assert_eq!(
        person.birthday,
        NaiveDate::from_ymd_opt(2010, 1, 1).unwrap()
    );
}
