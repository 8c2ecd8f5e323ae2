use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use pusher_rest::{FieldNamingPolicy, SerializationError, TriggerError, MAX_DEPTH};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::support::{data_field, recording_pusher, MyPojo};

#[test]
fn serialise_pojo() {
    let (pusher, transport) = recording_pusher();

    pusher.trigger("my-channel", "event", &MyPojo::default()).unwrap();

    assert_eq!(
        data_field(&transport),
        r#"{"aString":"value","aNumber":42}"#
    );
}

#[test]
fn custom_serialisation_naming_policy() {
    let (mut pusher, transport) = recording_pusher();
    pusher.set_naming_policy(FieldNamingPolicy::LowerCaseWithDashes);

    pusher.trigger("my-channel", "event", &MyPojo::default()).unwrap();

    assert_eq!(
        data_field(&transport),
        r#"{"a-string":"value","a-number":42}"#
    );
}

#[test]
fn custom_serialisation_by_override() {
    let (pusher, transport) = recording_pusher();
    let pusher = pusher.with_serializer_override(|data| {
        serde_json::to_value(data)
            .ok()
            .and_then(|value| value.as_str().map(|s| s.replace("string", "strong")))
            .unwrap_or_default()
    });

    pusher
        .trigger("my-channel", "event", &"this is my string data")
        .unwrap();

    assert_eq!(data_field(&transport), "this is my strong data");
}

#[test]
fn map_should_be_a_suitable_object_for_data() {
    let (pusher, transport) = recording_pusher();
    let mut data = HashMap::new();
    data.insert("name", "value");

    pusher.trigger("my-channel", "event", &data).unwrap();

    assert_eq!(data_field(&transport), r#"{"name":"value"}"#);
}

#[test]
fn multi_layer_map_should_serialise_fully() {
    let (pusher, transport) = recording_pusher();

    let mut data = Map::new();
    data.insert("k1".into(), Value::from("v1"));
    let mut level2 = Map::new();
    level2.insert("k3".into(), Value::from("v3"));
    let level3 = vec!["v4", "v5"];
    level2.insert("k4".into(), Value::from(level3));
    data.insert("k2".into(), Value::Object(level2));

    pusher.trigger("my-channel", "event", &data).unwrap();

    assert_eq!(
        data_field(&transport),
        r#"{"k1":"v1","k2":{"k3":"v3","k4":["v4","v5"]}}"#
    );
}

#[test]
fn insertion_order_is_kept_not_sorted() {
    let (pusher, transport) = recording_pusher();

    pusher
        .trigger("my-channel", "event", &json!({ "zebra": 1, "apple": { "y": 2, "b": 3 } }))
        .unwrap();

    assert_eq!(
        data_field(&transport),
        r#"{"zebra":1,"apple":{"y":2,"b":3}}"#
    );
}

#[test]
fn naming_policy_leaves_map_keys_alone() {
    #[derive(Serialize)]
    struct Envelope {
        user_name: String,
        extra: HashMap<String, u32>,
    }

    let (pusher, transport) = recording_pusher();
    let pusher = pusher.with_naming_policy(FieldNamingPolicy::LowerCamelCase);
    let mut extra = HashMap::new();
    extra.insert("retry_count".to_string(), 3);

    pusher
        .trigger(
            "my-channel",
            "event",
            &Envelope {
                user_name: "ada".into(),
                extra,
            },
        )
        .unwrap();

    assert_eq!(
        data_field(&transport),
        r#"{"userName":"ada","extra":{"retry_count":3}}"#
    );
}

#[test]
fn escaping_and_numbers() {
    let (pusher, transport) = recording_pusher();

    pusher
        .trigger("my-channel", "event", &json!({ "quote": "say \"hi\"\n", "n": -7, "f": 0.25 }))
        .unwrap();

    assert_eq!(
        data_field(&transport),
        r#"{"quote":"say \"hi\"\n","n":-7,"f":0.25}"#
    );
}

#[test]
fn unserialisable_payload_fails_before_sending() {
    let (pusher, transport) = recording_pusher();

    let err = pusher
        .trigger("my-channel", "event", &vec![1.0, f64::INFINITY])
        .unwrap_err();

    assert!(matches!(
        err,
        TriggerError::Serialization(SerializationError::NonFiniteNumber(_))
    ));
    assert!(transport.is_empty().unwrap());
}

#[test]
fn same_input_same_body() {
    let (pusher, transport) = recording_pusher();
    let data = MyPojo::default();

    pusher.trigger("my-channel", "event", &data).unwrap();
    pusher.trigger("my-channel", "event", &data).unwrap();

    let requests = transport.requests().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].body, requests[1].body);
}

#[test]
fn borrowed_payload_is_accepted() {
    #[derive(Serialize)]
    struct Message<'a> {
        user_name: &'a str,
        tags: &'a [String],
    }

    let (pusher, transport) = recording_pusher();
    let pusher = pusher.with_naming_policy(FieldNamingPolicy::LowerCamelCase);
    let name = String::from("ada");
    let tags = vec!["admin".to_string()];

    pusher
        .trigger(
            "my-channel",
            "event",
            &Message {
                user_name: &name,
                tags: &tags,
            },
        )
        .unwrap();

    assert_eq!(
        data_field(&transport),
        r#"{"userName":"ada","tags":["admin"]}"#
    );
}

#[derive(Serialize)]
struct Link {
    id: u32,
    next: Option<Rc<RefCell<Link>>>,
}

#[test]
fn cyclic_payload_fails_before_sending() {
    let (pusher, transport) = recording_pusher();
    let first = Rc::new(RefCell::new(Link { id: 1, next: None }));
    let second = Rc::new(RefCell::new(Link {
        id: 2,
        next: Some(Rc::clone(&first)),
    }));
    first.borrow_mut().next = Some(Rc::clone(&second));

    let err = pusher.trigger("my-channel", "event", &first).unwrap_err();

    assert!(matches!(
        err,
        TriggerError::Serialization(SerializationError::DepthLimitExceeded(MAX_DEPTH))
    ));
    assert!(transport.is_empty().unwrap());

    second.borrow_mut().next = None;
}

#[test]
fn deep_struct_nesting() {
    fn chain(len: u32) -> Option<Box<Chain>> {
        (0..len).fold(None, |next, id| Some(Box::new(Chain { chain_id: id, next })))
    }

    #[derive(Serialize)]
    struct Chain {
        chain_id: u32,
        next: Option<Box<Chain>>,
    }

    let (pusher, transport) = recording_pusher();
    let pusher = pusher.with_naming_policy(FieldNamingPolicy::LowerCamelCase);

    pusher
        .trigger("my-channel", "event", &chain(MAX_DEPTH as u32))
        .unwrap();
    let body = data_field(&transport);
    assert!(body.starts_with(r#"{"chainId":127,"next":{"chainId":126"#));

    let err = pusher
        .trigger("my-channel", "event", &chain(MAX_DEPTH as u32 + 1))
        .unwrap_err();
    assert!(matches!(
        err,
        TriggerError::Serialization(SerializationError::DepthLimitExceeded(_))
    ));
    assert_eq!(transport.len().unwrap(), 1);
}
