//! Read-side traversal shared by `get`, `has`, `has_in`, `at` and `invoke`.

use alloc::string::ToString;

use kp_value::{CallError, Slots, Value};
use log::{debug, trace};

use crate::PathStep;

/// Walks `steps` from `root`, stopping at the first missing node.
///
/// `None` means the location does not exist or holds `Undefined`.
pub(crate) fn resolve(root: &Value, steps: &[PathStep]) -> Option<Value> {
    let mut node = root.clone();
    for (depth, step) in steps.iter().enumerate() {
        node = match step.read(&node) {
            Some(next) => next,
            None => {
                trace!(
                    "path short-circuits at step {depth} (`{step}`) on a node of kind {}",
                    node.kind()
                );
                return None;
            }
        };
    }
    node.defined()
}

/// Which slots count when testing for existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Visibility {
    /// Only slots held by the node itself.
    Own,
    /// Own slots and those the node inherits.
    Visible,
}

impl Visibility {
    #[inline]
    fn holds(self, slots: &dyn Slots, key: &str) -> bool {
        match self {
            Self::Own => slots.has_own_slot(key),
            Self::Visible => slots.has_visible_slot(key),
        }
    }
}

/// Tests whether the location named by `steps` exists.
///
/// Every step but the last is resolved as a read. The last one only needs
/// its slot to exist, so a slot holding `Undefined` is found.
pub(crate) fn probe(root: &Value, steps: &[PathStep], visibility: Visibility) -> bool {
    let Some((last, init)) = steps.split_last() else {
        return false;
    };
    let Some(owner) = resolve(root, init) else {
        return false;
    };

    match last.index() {
        None => owner
            .slots()
            .is_some_and(|slots| visibility.holds(slots, last.key())),
        Some(index) => last.container(&owner).is_some_and(|container| {
            container
                .slots()
                .is_some_and(|slots| visibility.holds(slots, &index.to_string()))
        }),
    }
}

/// Calls the function found at `steps`, bound to the node holding it.
///
/// A missing or non-callable member yields `Undefined` without a call.
pub(crate) fn invoke(root: &Value, steps: &[PathStep], args: &[Value]) -> Result<Value, CallError> {
    let Some((last, init)) = steps.split_last() else {
        debug!("invoke with an empty path: nothing to call");
        return Ok(Value::Undefined);
    };
    let Some(owner) = resolve(root, init) else {
        debug!("invoke `{last}`: the owner of the member does not exist");
        return Ok(Value::Undefined);
    };

    let (receiver, member) = match last.index() {
        None => {
            let member = last.container(&owner);
            (owner, member)
        }
        Some(index) => {
            let Some(container) = last.container(&owner) else {
                debug!("invoke `{last}`: `{}` does not exist", last.key());
                return Ok(Value::Undefined);
            };
            let member = container.slots().and_then(|slots| slots.slot_at(index));
            (container, member)
        }
    };

    match member {
        Some(Value::Function(func)) => func.call(&receiver, args),
        Some(other) => {
            debug!("invoke `{last}`: member of kind {} is not callable", other.kind());
            Ok(Value::Undefined)
        }
        None => {
            debug!("invoke `{last}`: member does not exist");
            Ok(Value::Undefined)
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{Visibility, invoke, probe, resolve};
    use crate::PathStep;
    use kp_value::{CallError, Function, Object, Value};

    fn json(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    fn path(steps: &[PathStep]) -> Vec<PathStep> {
        steps.to_vec()
    }

    #[test]
    fn resolves_nested_values() {
        let root = json(r#"{"a": [{"b": {"c": 3}}, 4]}"#);
        let steps = path(&[PathStep::indexed("a", 0), PathStep::new("b"), PathStep::new("c")]);
        assert_eq!(resolve(&root, &steps), Some(Value::from(3)));
        assert_eq!(resolve(&root, &[PathStep::indexed("a", 1)]), Some(Value::from(4)));
        assert_eq!(resolve(&root, &[]), Some(root.clone()));
    }

    #[test]
    fn short_circuits_on_missing_intermediates() {
        let root = json(r#"{"a": {"b": null}}"#);
        let steps = path(&[PathStep::new("x"), PathStep::new("y"), PathStep::new("z")]);
        assert_eq!(resolve(&root, &steps), None);

        // `null` is a value, but it has no slots.
        let steps = path(&[PathStep::new("a"), PathStep::new("b"), PathStep::new("c")]);
        assert_eq!(resolve(&root, &steps), None);
        assert_eq!(resolve(&Value::Undefined, &[]), None);
    }

    #[test]
    fn stored_undefined_is_not_found_but_exists() {
        let mut obj = Object::new();
        obj.insert("u", Value::Undefined);
        let root = Value::from(obj);
        let steps = [PathStep::new("u")];

        assert_eq!(resolve(&root, &steps), None);
        assert!(probe(&root, &steps, Visibility::Own));
    }

    #[test]
    fn own_and_visible_probes() {
        let proto = Arc::new(Object::from_iter([("inherited", 1)]));
        let mut child = Object::create(proto);
        child.insert("own", 2);
        let root = Value::from(Object::from_iter([("o", Value::from(child))]));

        let inherited = [PathStep::new("o"), PathStep::new("inherited")];
        assert!(!probe(&root, &inherited, Visibility::Own));
        assert!(probe(&root, &inherited, Visibility::Visible));

        let own = [PathStep::new("o"), PathStep::new("own")];
        assert!(probe(&root, &own, Visibility::Own));
        assert!(!probe(&root, &[], Visibility::Visible));
    }

    #[test]
    fn indexed_probes() {
        let root = json(r#"{"a": [1, null]}"#);
        assert!(probe(&root, &[PathStep::indexed("a", 1)], Visibility::Own));
        assert!(!probe(&root, &[PathStep::indexed("a", 2)], Visibility::Own));
        assert!(!probe(&root, &[PathStep::indexed("b", 0)], Visibility::Own));
    }

    #[test]
    fn invoke_binds_the_owner() {
        let whoami = Function::new("whoami", |this, args| {
            Ok(Value::from(vec![this.clone(), Value::from(args.len())]))
        });
        let mut obj = Object::new();
        obj.insert("f", whoami);
        obj.insert("tag", "owner");
        let root = Value::from(Object::from_iter([("o", Value::from(obj))]));

        let res = invoke(&root, &[PathStep::new("o"), PathStep::new("f")], &[Value::Null]).unwrap();
        let res = res.as_array().unwrap();
        assert!(res[0].ptr_eq(&resolve(&root, &[PathStep::new("o")]).unwrap()));
        assert_eq!(res[1], Value::from(1));
    }

    #[test]
    fn invoke_builtin_method() {
        let root = json(r#"{"a": [{"b": {"c": [1, 2, 3, 4]}}]}"#);
        let steps = path(&[
            PathStep::indexed("a", 0),
            PathStep::new("b"),
            PathStep::new("c"),
            PathStep::new("slice"),
        ]);
        let res = invoke(&root, &steps, &[Value::from(1), Value::from(3)]).unwrap();
        assert_eq!(res, json("[2, 3]"));
    }

    #[test]
    fn invoke_missing_or_not_callable() {
        let root = json(r#"{"a": {"n": 1}}"#);
        let missing = [PathStep::new("x"), PathStep::new("f")];
        assert_eq!(invoke(&root, &missing, &[]).unwrap(), Value::Undefined);

        let number = [PathStep::new("a"), PathStep::new("n")];
        assert_eq!(invoke(&root, &number, &[]).unwrap(), Value::Undefined);
        assert_eq!(invoke(&root, &[], &[]).unwrap(), Value::Undefined);
    }

    #[test]
    fn invoke_propagates_call_errors() {
        let fail = Function::new("fail", |_, _| Err(CallError::msg("boom")));
        let root = Value::from(Object::from_iter([("fs", Value::from(vec![Value::from(fail)]))]));
        let err = invoke(&root, &[PathStep::indexed("fs", 0)], &[]).unwrap_err();
        assert_eq!(alloc::format!("{err}"), "boom");
    }
}
