//! Copy-on-write writes backing `set`.
//!
//! Every container along the written path below the root is replaced by a
//! shallow copy holding the updated child. Siblings keep sharing their
//! values with the original containers. Only the root container is updated
//! in place, through [`Arc::make_mut`].

use alloc::string::ToString;
use alloc::sync::Arc;

use kp_value::{Array, Object, Slots, SlotsMut, Value, parse_index};
use log::debug;

use crate::PathStep;

/// Writes `value` at `steps` under `root`.
///
/// A root that cannot hold the first key is replaced by an object, which
/// keeps the elements of an array root under their decimal keys.
/// An empty path leaves `root` untouched.
pub(crate) fn assign(root: &mut Value, steps: &[PathStep], value: Value) {
    let Some((step, rest)) = steps.split_first() else {
        return;
    };

    let rejected = match root {
        Value::Object(obj) => write_in_place(obj, step, rest, value),
        Value::Array(arr) => write_in_place(arr, step, rest, value),
        _ => Err(rebuild_step(None, step, rest, value)),
    };

    if let Err(child) = rejected {
        debug!(
            "set `{step}`: root of kind {} cannot hold `{}`, replacing it with an object",
            root.kind(),
            step.key(),
        );
        *root = match &*root {
            Value::Array(arr) => spread_with(&**arr, step.key(), child),
            _ => spread_with(&Object::new(), step.key(), child),
        };
    }
}

fn write_in_place<C: SlotsMut>(
    container: &mut Arc<C>,
    step: &PathStep,
    rest: &[PathStep],
    value: Value,
) -> Result<(), Value> {
    let child = rebuild_step(container.visible_slot(step.key()), step, rest, value);
    Arc::make_mut(container).set_slot(step.key(), child)
}

/// Returns the new value of the slot `step.key()`, given its current value.
fn rebuild_step(current: Option<Value>, step: &PathStep, rest: &[PathStep], value: Value) -> Value {
    let Some(index) = step.index() else {
        return rebuild(current, rest, value);
    };

    match current {
        Some(Value::Array(arr)) => {
            let element = rebuild(arr.get(index).cloned(), rest, value);
            match arr.with_item(index, element) {
                Ok(copy) => Value::from(copy),
                Err(element) => {
                    debug!("set `{step}`: index is past the maximum array length, writing a key");
                    spread_with(&*arr, &index.to_string(), element)
                }
            }
        }
        // Keyed nodes are indexed by decimal key, as on reads.
        Some(Value::Object(obj)) => {
            let key = index.to_string();
            let element = rebuild(obj.visible_slot(&key), rest, value);
            let mut copy = Object::clone(&obj);
            copy.insert(key, element);
            Value::from(copy)
        }
        other => {
            if let Some(old) = other.and_then(Value::defined) {
                debug!("set `{step}`: overwriting a value of kind {} with an array", old.kind());
            }
            let mut arr = Array::new();
            match arr.set(index, rebuild(None, rest, value)) {
                Ok(()) => Value::from(arr),
                Err(element) => spread_with(&arr, &index.to_string(), element),
            }
        }
    }
}

/// Returns `node` with `value` written at `rest`.
fn rebuild(node: Option<Value>, rest: &[PathStep], value: Value) -> Value {
    let Some((step, tail)) = rest.split_first() else {
        return value;
    };

    match node {
        Some(Value::Object(obj)) => copy_with(&*obj, step, tail, value),
        Some(Value::Array(arr)) => copy_with(&*arr, step, tail, value),
        other => {
            if let Some(old) = other.and_then(Value::defined) {
                debug!("set `{step}`: overwriting a value of kind {} with a container", old.kind());
            }
            if parse_index(step.key()).is_some() {
                copy_with(&Array::new(), step, tail, value)
            } else {
                copy_with(&Object::new(), step, tail, value)
            }
        }
    }
}

/// Returns a shallow copy of `container` with the slot of `step` rebuilt.
///
/// When the container cannot hold the key, it is replaced by an object
/// holding its elements, see [`spread_with`].
fn copy_with<C>(container: &C, step: &PathStep, tail: &[PathStep], value: Value) -> Value
where
    C: SlotsMut + Into<Value>,
{
    let child = rebuild_step(container.visible_slot(step.key()), step, tail, value);
    match container.with_slot(step.key(), child) {
        Ok(copy) => copy.into(),
        Err(child) => {
            debug!("set `{step}`: replacing an array that cannot hold `{}`", step.key());
            spread_with(container, step.key(), child)
        }
    }
}

/// Returns an object holding the own slots of `container` plus `key`.
///
/// Array elements land under their decimal keys. `length` is dropped,
/// as it only describes the elements.
fn spread_with(container: &dyn Slots, key: &str, child: Value) -> Value {
    let mut obj: Object = container
        .own_keys()
        .into_iter()
        .filter(|own| own != "length")
        .filter_map(|own| {
            let value = container.own_slot(&own)?;
            Some((own, value))
        })
        .collect();
    obj.insert(key, child);
    Value::from(obj)
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use super::assign;
    use crate::PathStep;
    use crate::resolve::resolve;
    use kp_value::{Array, Object, Slots, Value};

    fn json(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn writes_into_existing_structure() {
        let mut root = json(r#"{"a": [{"b": {"c": 3}}]}"#);
        let steps = [PathStep::indexed("a", 0), PathStep::new("b"), PathStep::new("c")];
        assign(&mut root, &steps, Value::from(4));
        assert_eq!(root, json(r#"{"a": [{"b": {"c": 4}}]}"#));
    }

    #[test]
    fn creates_missing_containers() {
        let mut root = Value::object();
        let steps = [PathStep::indexed("x", 0), PathStep::new("y"), PathStep::new("z")];
        assign(&mut root, &steps, Value::from(5));
        assert_eq!(root, json(r#"{"x": [{"y": {"z": 5}}]}"#));

        let mut root = Value::object();
        let steps = [PathStep::new("list"), PathStep::new("2")];
        assign(&mut root, &steps, Value::from(true));
        let list = resolve(&root, &steps[..1]).unwrap();
        assert_eq!(list.as_array().unwrap().len(), 3);
        assert_eq!(resolve(&root, &steps), Some(Value::from(true)));
    }

    #[test]
    fn path_containers_are_copied_and_siblings_shared() {
        let mut root = json(r#"{"a": {"x": 1, "s": {"k": 0}}, "b": {"y": 2}}"#);
        let a = resolve(&root, &[PathStep::new("a")]).unwrap();
        let s = resolve(&root, &[PathStep::new("a"), PathStep::new("s")]).unwrap();
        let b = resolve(&root, &[PathStep::new("b")]).unwrap();

        assign(&mut root, &[PathStep::new("a"), PathStep::new("x")], Value::from(99));

        let new_a = resolve(&root, &[PathStep::new("a")]).unwrap();
        assert!(!new_a.ptr_eq(&a));
        assert_eq!(a, json(r#"{"x": 1, "s": {"k": 0}}"#));
        assert!(resolve(&root, &[PathStep::new("a"), PathStep::new("s")]).unwrap().ptr_eq(&s));
        assert!(resolve(&root, &[PathStep::new("b")]).unwrap().ptr_eq(&b));
    }

    #[test]
    fn indexed_writes_keep_other_elements() {
        let mut root = json(r#"{"a": [{"k": 1}, {"k": 2}, {"k": 3}]}"#);
        let first = resolve(&root, &[PathStep::indexed("a", 0)]).unwrap();
        let last = resolve(&root, &[PathStep::indexed("a", 2)]).unwrap();

        assign(&mut root, &[PathStep::indexed("a", 1), PathStep::new("k")], Value::from(20));

        assert_eq!(root, json(r#"{"a": [{"k": 1}, {"k": 20}, {"k": 3}]}"#));
        assert!(resolve(&root, &[PathStep::indexed("a", 0)]).unwrap().ptr_eq(&first));
        assert!(resolve(&root, &[PathStep::indexed("a", 2)]).unwrap().ptr_eq(&last));
    }

    #[test]
    fn root_is_written_in_place() {
        let mut root = json(r#"{"a": 1}"#);
        let before = root.as_object().map(Arc::as_ptr);
        assign(&mut root, &[PathStep::new("b")], Value::from(2));
        assert_eq!(root.as_object().map(Arc::as_ptr), before);
        assert_eq!(root, json(r#"{"a": 1, "b": 2}"#));
    }

    #[test]
    fn primitives_are_overwritten() {
        let mut root = json(r#"{"a": 1, "s": "text"}"#);
        assign(&mut root, &[PathStep::new("a"), PathStep::new("b")], Value::from(2));
        assign(&mut root, &[PathStep::indexed("s", 1)], Value::from("x"));
        assert_eq!(resolve(&root, &[PathStep::new("a")]), Some(json(r#"{"b": 2}"#)));

        let s = resolve(&root, &[PathStep::new("s")]).unwrap();
        let s = s.as_array().unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s[0], Value::Undefined);
        assert_eq!(s[1], Value::from("x"));

        let mut root = Value::from(7);
        assign(&mut root, &[PathStep::new("x")], Value::from(5));
        assert_eq!(root, json(r#"{"x": 5}"#));
    }

    #[test]
    fn named_keys_turn_arrays_into_objects_keeping_elements() {
        let mut root = json(r#"{"a": [1, 2]}"#);
        assign(&mut root, &[PathStep::new("a"), PathStep::new("name")], Value::from("n"));
        assert_eq!(root, json(r#"{"a": {"0": 1, "1": 2, "name": "n"}}"#));

        let mut root = json("[1, 2]");
        assign(&mut root, &[PathStep::new("1")], Value::from(3));
        assert_eq!(root, json("[1, 3]"));
        assign(&mut root, &[PathStep::new("k")], Value::from(3));
        assert_eq!(root, json(r#"{"0": 1, "1": 3, "k": 3}"#));
    }

    #[test]
    fn elements_keep_their_identity_when_spread() {
        let mut root = json(r#"{"a": [{"x": 1}]}"#);
        let first = resolve(&root, &[PathStep::indexed("a", 0)]).unwrap();
        assign(&mut root, &[PathStep::new("a"), PathStep::new("k")], Value::Null);
        let spread = resolve(&root, &[PathStep::new("a"), PathStep::new("0")]).unwrap();
        assert!(spread.ptr_eq(&first));
    }

    #[test]
    fn indices_past_the_maximum_length_become_keys() {
        let huge = usize::MAX;

        let mut root = Value::object();
        assign(&mut root, &[PathStep::indexed("a", huge)], Value::from(1));
        let a = resolve(&root, &[PathStep::new("a")]).unwrap();
        assert!(a.as_object().is_some());
        assert_eq!(resolve(&root, &[PathStep::indexed("a", huge)]), Some(Value::from(1)));

        let past = Array::MAX_LEN;
        let mut root = json(r#"{"a": [1, 2]}"#);
        assign(&mut root, &[PathStep::indexed("a", past), PathStep::new("b")], Value::from(3));
        assert_eq!(resolve(&root, &[PathStep::indexed("a", 0)]), Some(Value::from(1)));
        assert_eq!(resolve(&root, &[PathStep::indexed("a", 1)]), Some(Value::from(2)));
        assert_eq!(
            resolve(&root, &[PathStep::indexed("a", past), PathStep::new("b")]),
            Some(Value::from(3))
        );

        let mut root = json("[1]");
        assign(&mut root, &[PathStep::new("4294967296")], Value::from(2));
        assert_eq!(root, json(r#"{"0": 1, "4294967296": 2}"#));
    }

    #[test]
    fn inherited_children_become_own() {
        let proto = Arc::new(Object::from_iter([("cfg", json(r#"{"a": 1}"#))]));
        let mut root = Value::from(Object::create(proto.clone()));
        assign(&mut root, &[PathStep::new("cfg"), PathStep::new("b")], Value::from(2));

        let obj = root.as_object().unwrap();
        assert_eq!(obj.own_slot("cfg"), Some(json(r#"{"a": 1, "b": 2}"#)));
        assert_eq!(proto.get("cfg"), Some(&json(r#"{"a": 1}"#)));
    }

    #[test]
    fn empty_path_is_a_no_op() {
        let mut root = json(r#"{"a": 1}"#);
        assign(&mut root, &[], Value::from(2));
        assert_eq!(root, json(r#"{"a": 1}"#));
    }
}
